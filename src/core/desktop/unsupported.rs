use super::Desktop;
use crate::models::{WindowHandle, WindowInfo, WindowLayout};
use anyhow::{anyhow, Result};

/// Backend for targets without a window positioning implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedDesktop;

fn unsupported() -> anyhow::Error {
    anyhow!(
        "Window management is not supported on this platform ({}).",
        std::env::consts::OS
    )
}

impl Desktop for UnsupportedDesktop {
    fn enumerate_windows(&self) -> Result<Vec<WindowInfo>> {
        Err(unsupported())
    }

    fn window_layout(&self, _handle: WindowHandle) -> Result<WindowLayout> {
        Err(unsupported())
    }

    fn set_window_layout(&self, _handle: WindowHandle, _layout: &WindowLayout) -> Result<()> {
        Err(unsupported())
    }
}
