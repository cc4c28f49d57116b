use crate::core::app_log::AppLog;
use crate::core::persistence;
use crate::models::Settings;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "WindowPositionSaver";
pub const DIR_ENV_VAR: &str = "WINDOW_POSITION_SAVER_DIR";
const SETTINGS_FILE_NAME: &str = "settings.json";
const LOG_DIR_NAME: &str = "logs";

/// Resolved locations plus the settings read from the config directory.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_dir: PathBuf,
    pub layout_dir: PathBuf,
    pub log: AppLog,
    pub settings: Settings,
}

/// `--dir` wins over the environment variable, which wins over the per-user config dir.
pub fn resolve_base_dir(cli_override: Option<PathBuf>, env_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = cli_override.or(env_override) {
        return Ok(dir);
    }
    let root = dirs::config_dir().ok_or_else(|| anyhow!("Failed to resolve the user config directory"))?;
    Ok(root.join(APP_DIR_NAME))
}

pub fn settings_path(base_dir: &Path) -> PathBuf {
    base_dir.join(SETTINGS_FILE_NAME)
}

pub fn load_settings(base_dir: &Path) -> Result<Settings> {
    let path = settings_path(base_dir);
    let settings = persistence::read_json::<Settings>(&path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    Ok(settings.unwrap_or_default())
}

impl AppConfig {
    /// Loads settings and creates the layout directory on first run.
    pub fn load(base_dir: PathBuf) -> Result<Self> {
        let settings = load_settings(&base_dir)?;
        let layout_dir = match settings.layout_dir.as_ref() {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => base_dir.join(dir),
            None => base_dir.clone(),
        };
        std::fs::create_dir_all(&layout_dir)
            .with_context(|| format!("Failed to create layout dir {}", layout_dir.display()))?;

        Ok(Self {
            log: AppLog::new(base_dir.join(LOG_DIR_NAME)).enabled(settings.log_enabled),
            base_dir,
            layout_dir,
            settings,
        })
    }

    pub fn from_env(cli_override: Option<PathBuf>) -> Result<Self> {
        let env_override = std::env::var_os(DIR_ENV_VAR).map(PathBuf::from);
        Self::load(resolve_base_dir(cli_override, env_override)?)
    }
}
