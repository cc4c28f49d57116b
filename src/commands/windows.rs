use crate::core::{AppConfig, Desktop};
use crate::models::WindowInfo;

pub fn format_window_list(windows: &[WindowInfo]) -> String {
    let mut out = format!("{:>12}  {:<24} {}\n", "HANDLE", "PROCESS", "TITLE");
    for window in windows {
        out.push_str(&format!(
            "{:>12}  {:<24} {}\n",
            window.handle, window.process_name, window.title
        ));
    }
    out.push_str(&format!("{} window(s)", windows.len()));
    out
}

pub fn list_windows(config: &AppConfig, desktop: &dyn Desktop) -> Result<String, String> {
    let windows = desktop.enumerate_windows().map_err(|e| {
        let message = format!("Failed to enumerate windows: {:#}", e);
        let _ = config.log.error("windows/list", &message, None);
        message
    })?;
    Ok(format_window_list(&windows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::desktop::fake::FakeDesktop;
    use crate::models::WindowLayout;

    #[test]
    fn lists_every_enumerated_window() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load(tmp.path().to_path_buf()).expect("config");
        let desktop = FakeDesktop::new()
            .with_window(100, "Notes", "notepad", WindowLayout::default())
            .with_window(200, "Inbox", "outlook", WindowLayout::default());

        let out = list_windows(&config, &desktop).expect("list");

        assert!(out.contains("notepad"));
        assert!(out.contains("Inbox"));
        assert!(out.ends_with("2 window(s)"));
    }
}
