use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Saved layouts keyed by `<handle>|<title>|<process>`.
pub type LayoutMap = BTreeMap<String, WindowLayout>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(rename = "X", deserialize_with = "coordinate")]
    pub x: i32,
    #[serde(rename = "Y", deserialize_with = "coordinate")]
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    #[serde(rename = "Width", deserialize_with = "coordinate")]
    pub width: i32,
    #[serde(rename = "Height", deserialize_with = "coordinate")]
    pub height: i32,
}

/// Screen geometry of a window: outer top-left corner plus outer size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowLayout {
    #[serde(rename = "TopLeft")]
    pub top_left: Point,
    #[serde(rename = "Size")]
    pub size: Size,
}

impl WindowLayout {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            top_left: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Builds a layout from edge coordinates as returned by the OS (`right`/`bottom` exclusive).
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right.saturating_sub(left), bottom.saturating_sub(top))
    }
}

// Older files were written with floating point coordinates ("X": 10.0).
fn coordinate<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return Err(D::Error::custom(format!("coordinate out of range: {}", value)));
    }
    Ok(value.round() as i32)
}
