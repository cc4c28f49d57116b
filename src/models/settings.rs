use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where layout files live. Relative paths are resolved against the config directory.
    pub layout_dir: Option<PathBuf>,
    pub log_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout_dir: None,
            log_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").expect("deserialize");
        assert!(settings.layout_dir.is_none());
        assert!(settings.log_enabled);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let settings: Settings =
            serde_json::from_str(r#"{"log_enabled":false,"theme":"dark"}"#).expect("deserialize");
        assert!(!settings.log_enabled);
    }
}
