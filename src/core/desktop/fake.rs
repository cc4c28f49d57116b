use super::{listed_windows, Desktop, RawWindow};
use crate::models::{WindowHandle, WindowInfo, WindowLayout};
use anyhow::{anyhow, Result};
use std::cell::RefCell;

#[derive(Debug, Clone)]
struct FakeWindow {
    info: WindowInfo,
    visible: bool,
    process_resolves: bool,
    layout: WindowLayout,
}

/// In-memory desktop used by tests. Records every positioning call.
#[derive(Debug, Default)]
pub(crate) struct FakeDesktop {
    windows: RefCell<Vec<FakeWindow>>,
    moves: RefCell<Vec<WindowHandle>>,
    read_only: RefCell<Vec<WindowHandle>>,
}

impl FakeDesktop {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_window(self, handle: i64, title: &str, process: &str, layout: WindowLayout) -> Self {
        self.windows.borrow_mut().push(FakeWindow {
            info: WindowInfo::new(WindowHandle(handle), title, process),
            visible: true,
            process_resolves: true,
            layout,
        });
        self
    }

    pub(crate) fn with_hidden_window(self, handle: i64, title: &str, process: &str) -> Self {
        self.windows.borrow_mut().push(FakeWindow {
            info: WindowInfo::new(WindowHandle(handle), title, process),
            visible: false,
            process_resolves: true,
            layout: WindowLayout::default(),
        });
        self
    }

    /// A visible window whose owning process can no longer be looked up.
    pub(crate) fn with_orphaned_window(self, handle: i64, title: &str) -> Self {
        self.windows.borrow_mut().push(FakeWindow {
            info: WindowInfo::new(WindowHandle(handle), title, ""),
            visible: true,
            process_resolves: false,
            layout: WindowLayout::default(),
        });
        self
    }

    /// Positioning calls for this window fail.
    pub(crate) fn lock_window(&self, handle: i64) {
        self.read_only.borrow_mut().push(WindowHandle(handle));
    }

    pub(crate) fn close_window(&self, handle: i64) {
        self.windows
            .borrow_mut()
            .retain(|w| w.info.handle != WindowHandle(handle));
    }

    pub(crate) fn move_window(&self, handle: i64, layout: WindowLayout) {
        if let Some(w) = self
            .windows
            .borrow_mut()
            .iter_mut()
            .find(|w| w.info.handle == WindowHandle(handle))
        {
            w.layout = layout;
        }
    }

    pub(crate) fn layout_of(&self, handle: i64) -> Option<WindowLayout> {
        self.windows
            .borrow()
            .iter()
            .find(|w| w.info.handle == WindowHandle(handle))
            .map(|w| w.layout)
    }

    pub(crate) fn moved(&self) -> Vec<WindowHandle> {
        self.moves.borrow().clone()
    }
}

impl Desktop for FakeDesktop {
    fn enumerate_windows(&self) -> Result<Vec<WindowInfo>> {
        let raw: Vec<RawWindow> = self
            .windows
            .borrow()
            .iter()
            .map(|w| RawWindow {
                handle: w.info.handle,
                title: w.info.title.clone(),
                visible: w.visible,
                process_name: w.process_resolves.then(|| w.info.process_name.clone()),
            })
            .collect();
        Ok(listed_windows(raw))
    }

    fn window_layout(&self, handle: WindowHandle) -> Result<WindowLayout> {
        self.windows
            .borrow()
            .iter()
            .find(|w| w.info.handle == handle)
            .map(|w| w.layout)
            .ok_or_else(|| anyhow!("invalid window handle {}", handle))
    }

    fn set_window_layout(&self, handle: WindowHandle, layout: &WindowLayout) -> Result<()> {
        if self.read_only.borrow().contains(&handle) {
            return Err(anyhow!("access denied for window {}", handle));
        }
        let mut windows = self.windows.borrow_mut();
        let window = windows
            .iter_mut()
            .find(|w| w.info.handle == handle)
            .ok_or_else(|| anyhow!("invalid window handle {}", handle))?;
        window.layout = *layout;
        self.moves.borrow_mut().push(handle);
        Ok(())
    }
}
