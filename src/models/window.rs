use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a top-level window.
///
/// Only meaningful within the OS session that produced it; a handle read back from
/// an older layout file almost never points at the same window again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub i64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    pub process_name: String,
}

impl WindowInfo {
    pub fn new(handle: WindowHandle, title: impl Into<String>, process_name: impl Into<String>) -> Self {
        Self {
            handle,
            title: title.into(),
            process_name: process_name.into(),
        }
    }

    /// Composite identity key used in layout files: `<handle>|<title>|<process>`.
    pub fn layout_key(&self) -> String {
        format!("{}|{}|{}", self.handle, self.title, self.process_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_key_joins_identity_parts() {
        let info = WindowInfo::new(WindowHandle(100), "Notes", "notepad");
        assert_eq!(info.layout_key(), "100|Notes|notepad");
    }

    #[test]
    fn negative_handles_render_as_decimal() {
        let info = WindowInfo::new(WindowHandle(-42), "a", "b");
        assert_eq!(info.layout_key(), "-42|a|b");
    }
}
