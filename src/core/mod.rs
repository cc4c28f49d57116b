pub mod app_log;
pub mod config;
pub mod desktop;
pub mod layout_store;
pub mod persistence;

pub use config::AppConfig;
pub use desktop::Desktop;
