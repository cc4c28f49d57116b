//! Access to the desktop's top-level windows.
//!
//! Layout logic only talks to the [`Desktop`] trait. Each supported OS has one
//! backend; [`platform`] returns the backend for the current target.

use crate::models::{WindowHandle, WindowInfo, WindowLayout};
use anyhow::Result;

#[cfg(test)]
pub(crate) mod fake;

#[cfg(not(target_os = "windows"))]
mod unsupported;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(not(target_os = "windows"))]
pub use unsupported::UnsupportedDesktop as PlatformDesktop;
#[cfg(target_os = "windows")]
pub use windows::Win32Desktop as PlatformDesktop;

pub trait Desktop {
    /// Visible top-level windows with a non-empty title, in the order the OS reports them.
    ///
    /// Windows whose owning process can no longer be resolved are left out.
    fn enumerate_windows(&self) -> Result<Vec<WindowInfo>>;

    /// Current outer rectangle of the window.
    fn window_layout(&self, handle: WindowHandle) -> Result<WindowLayout>;

    /// Moves and resizes the window without changing its z-order or activating it.
    fn set_window_layout(&self, handle: WindowHandle, layout: &WindowLayout) -> Result<()>;
}

pub fn platform() -> PlatformDesktop {
    PlatformDesktop::default()
}

/// Untitled and hidden windows are never listed.
pub fn is_listed(title: &str, visible: bool) -> bool {
    visible && !title.is_empty()
}

/// A top-level window as a backend sees it, before filtering.
#[derive(Debug, Clone)]
pub struct RawWindow {
    pub handle: WindowHandle,
    pub title: String,
    pub visible: bool,
    /// `None` when the owning process could not be resolved, e.g. it already exited.
    pub process_name: Option<String>,
}

/// Keeps listed windows whose process is known, preserving order.
///
/// A window whose process lookup failed is dropped; the rest are still returned.
pub fn listed_windows(raw: impl IntoIterator<Item = RawWindow>) -> Vec<WindowInfo> {
    raw.into_iter()
        .filter(|w| is_listed(&w.title, w.visible))
        .filter_map(|w| {
            let process_name = w.process_name?;
            Some(WindowInfo::new(w.handle, w.title, process_name))
        })
        .collect()
}

/// Extracts a short process name from a full executable path:
/// `C:\Windows\System32\notepad.exe` becomes `notepad`.
pub fn process_name_from_image_path(path: &str) -> Option<String> {
    let file_name = path.rsplit(&['\\', '/'][..]).next()?.trim();
    if file_name.is_empty() {
        return None;
    }
    let stem = match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(idx) => &file_name[..idx],
    };
    Some(stem.to_string())
}
