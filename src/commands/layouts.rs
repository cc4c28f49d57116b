use crate::core::layout_store::{self, RestoreReport};
use crate::core::{AppConfig, Desktop};
use std::fmt::Write as _;

pub fn save_layout(config: &AppConfig, desktop: &dyn Desktop, name: Option<String>) -> Result<String, String> {
    let file_name = match name {
        Some(name) => {
            layout_store::validate_layout_name(&name).map_err(|e| format!("Failed to save layout: {:#}", e))?;
            name
        }
        None => layout_store::timestamped_file_name(&chrono::Local::now()),
    };
    let windows = desktop
        .enumerate_windows()
        .map_err(|e| format!("Failed to enumerate windows: {:#}", e))?;

    let summary = layout_store::save_layout(desktop, &windows, &config.layout_dir, &file_name).map_err(|e| {
        let message = format!("Failed to save layout: {:#}", e);
        let _ = config.log.error("layout/save", &message, None);
        message
    })?;

    let _ = config.log.info(
        "layout/save",
        "saved",
        Some(serde_json::json!({
            "path": summary.path.display().to_string(),
            "saved": summary.saved,
        })),
    );

    Ok(format!("Saved {} window(s) to {}", summary.saved, summary.path.display()))
}

pub fn list_layouts(config: &AppConfig) -> Result<String, String> {
    let names = layout_store::list_layouts(&config.layout_dir)
        .map_err(|e| format!("Failed to list layouts: {:#}", e))?;
    if names.is_empty() {
        return Ok(format!("No saved layouts in {}", config.layout_dir.display()));
    }
    Ok(names.join("\n"))
}

pub fn show_layout(config: &AppConfig, name: &str) -> Result<String, String> {
    let path = layout_store::resolve_layout_path(&config.layout_dir, name);
    let layouts = layout_store::load_layout(&path).map_err(|e| format!("Failed to load layout: {:#}", e))?;

    let mut out = String::new();
    for (key, layout) in &layouts {
        let _ = writeln!(
            out,
            "{}  at {},{}  size {}x{}",
            key, layout.top_left.x, layout.top_left.y, layout.size.width, layout.size.height
        );
    }
    let _ = write!(out, "{} entr{}", layouts.len(), if layouts.len() == 1 { "y" } else { "ies" });
    Ok(out)
}

pub fn format_restore_report(report: &RestoreReport) -> String {
    let mut out = format!(
        "Restored {} window(s); {} not found",
        report.applied.len(),
        report.unmatched.len()
    );
    if !report.malformed.is_empty() {
        let _ = write!(out, "; {} malformed", report.malformed.len());
    }
    for failed in &report.failed {
        let _ = write!(out, "\nFailed to move window {} ({}): {}", failed.handle, failed.key, failed.error);
    }
    out
}

pub fn restore_layout(config: &AppConfig, desktop: &dyn Desktop, name: &str) -> Result<String, String> {
    let path = layout_store::resolve_layout_path(&config.layout_dir, name);
    let live = desktop
        .enumerate_windows()
        .map_err(|e| format!("Failed to enumerate windows: {:#}", e))?;

    let report = layout_store::restore_layout_file(desktop, &path, &live).map_err(|e| {
        let message = format!("Failed to restore layout: {:#}", e);
        let _ = config.log.error("layout/restore", &message, None);
        message
    })?;

    let data = serde_json::to_value(&report).ok();
    let _ = if report.failed.is_empty() {
        config.log.info("layout/restore", "restored", data)
    } else {
        config.log.warn("layout/restore", "restored with failures", data)
    };

    Ok(format_restore_report(&report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::desktop::fake::FakeDesktop;
    use crate::models::WindowLayout;

    fn config() -> (tempfile::TempDir, AppConfig) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load(tmp.path().to_path_buf()).expect("config");
        (tmp, config)
    }

    #[test]
    fn save_then_restore_by_name() {
        let (_tmp, config) = config();
        let desktop = FakeDesktop::new().with_window(100, "Notes", "notepad", WindowLayout::new(10, 10, 100, 200));

        let out = save_layout(&config, &desktop, Some("layout_manual.json".to_string())).expect("save");
        assert!(out.starts_with("Saved 1 window(s)"));
        assert_eq!(list_layouts(&config).expect("list"), "layout_manual.json");

        desktop.move_window(100, WindowLayout::new(500, 500, 100, 200));
        let out = restore_layout(&config, &desktop, "layout_manual.json").expect("restore");

        assert_eq!(out, "Restored 1 window(s); 0 not found");
        assert_eq!(desktop.layout_of(100), Some(WindowLayout::new(10, 10, 100, 200)));
    }

    #[test]
    fn default_name_is_timestamped() {
        let (_tmp, config) = config();
        let desktop = FakeDesktop::new().with_window(1, "a", "b", WindowLayout::default());

        save_layout(&config, &desktop, None).expect("save");

        let names = layout_store::list_layouts(&config.layout_dir).expect("list");
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("layout_"));
        assert_eq!(names[0].len(), "layout_2024-01-01-00-00-00.json".len());
    }

    #[test]
    fn show_prints_every_entry() {
        let (_tmp, config) = config();
        let desktop = FakeDesktop::new()
            .with_window(1, "Notes", "notepad", WindowLayout::new(10, 20, 30, 40))
            .with_window(2, "Inbox", "outlook", WindowLayout::new(0, 0, 800, 600));
        save_layout(&config, &desktop, Some("layout_x.json".to_string())).expect("save");

        let out = show_layout(&config, "layout_x.json").expect("show");

        assert!(out.contains("1|Notes|notepad  at 10,20  size 30x40"));
        assert!(out.ends_with("2 entries"));
    }

    #[test]
    fn restoring_missing_layout_fails_and_is_logged() {
        let (_tmp, config) = config();
        let desktop = FakeDesktop::new();

        let err = restore_layout(&config, &desktop, "layout_missing.json").expect_err("missing");

        assert!(err.contains("Failed to restore layout"));
        let records = config.log.read(10, Some("layout/restore".to_string()), None).expect("read");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, "error");
    }

    #[test]
    fn save_rejects_names_outside_the_layout_directory() {
        let (tmp, config) = config();
        let desktop = FakeDesktop::new().with_window(1, "a", "b", WindowLayout::default());

        for name in ["../layout_x.json", "sub/layout_x.json", "sub\\layout_x.json", "notes.json"] {
            let err = save_layout(&config, &desktop, Some(name.to_string())).expect_err(name);
            assert!(err.starts_with("Failed to save layout"), "{}", err);
        }

        assert!(!tmp.path().parent().expect("parent").join("layout_x.json").exists());
        assert!(layout_store::list_layouts(&config.layout_dir).expect("list").is_empty());
    }

    #[test]
    fn failed_restore_with_logging_disabled_writes_no_log() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(tmp.path().join("settings.json"), br#"{"log_enabled":false}"#).expect("write");
        let config = AppConfig::load(tmp.path().to_path_buf()).expect("config");

        restore_layout(&config, &FakeDesktop::new(), "layout_missing.json").expect_err("missing");

        assert!(config.log.read(10, None, None).expect("read").is_empty());
    }

    #[test]
    fn list_reports_empty_directory() {
        let (_tmp, config) = config();
        assert!(list_layouts(&config).expect("list").starts_with("No saved layouts"));
    }
}
