use super::{is_listed, listed_windows, process_name_from_image_path, Desktop, RawWindow};
use crate::models::{WindowHandle, WindowInfo, WindowLayout};
use anyhow::{anyhow, Context, Result};
use std::ffi::OsString;
use std::io;
use std::os::windows::ffi::OsStringExt;
use windows_sys::Win32::Foundation::{CloseHandle, BOOL, HANDLE, HWND, LPARAM, RECT};
use windows_sys::Win32::System::Threading::{
    OpenProcess, QueryFullProcessImageNameW, PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowRect, GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId,
    IsWindowVisible, SetWindowPos, SWP_NOACTIVATE, SWP_NOZORDER,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Desktop;

unsafe extern "system" fn collect_handle(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let handles = &mut *(lparam as *mut Vec<HWND>);
    handles.push(hwnd);
    1
}

fn top_level_handles() -> Result<Vec<HWND>> {
    let mut handles: Vec<HWND> = Vec::new();
    let ok = unsafe {
        EnumWindows(
            Some(collect_handle),
            &mut handles as *mut Vec<HWND> as LPARAM,
        )
    };
    if ok == 0 {
        return Err(io::Error::last_os_error()).context("EnumWindows failed");
    }
    Ok(handles)
}

fn window_title(hwnd: HWND) -> String {
    unsafe {
        let len = GetWindowTextLengthW(hwnd);
        if len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u16; len as usize + 1];
        let copied = GetWindowTextW(hwnd, buf.as_mut_ptr(), buf.len() as i32);
        if copied <= 0 {
            return String::new();
        }
        buf.truncate(copied as usize);
        OsString::from_wide(&buf).to_string_lossy().to_string()
    }
}

fn process_image_path(hwnd: HWND) -> Option<String> {
    unsafe {
        let mut pid: u32 = 0;
        GetWindowThreadProcessId(hwnd, &mut pid);
        if pid == 0 {
            return None;
        }

        let handle: HANDLE = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
        if handle == 0 {
            return None;
        }

        let mut buf = vec![0u16; 2048];
        let mut size: u32 = buf.len() as u32;
        let ok = QueryFullProcessImageNameW(handle, 0, buf.as_mut_ptr(), &mut size);
        let _ = CloseHandle(handle);
        if ok == 0 || size == 0 {
            return None;
        }

        buf.truncate(size as usize);
        Some(OsString::from_wide(&buf).to_string_lossy().to_string())
    }
}

impl Desktop for Win32Desktop {
    fn enumerate_windows(&self) -> Result<Vec<WindowInfo>> {
        let raw = top_level_handles()?.into_iter().map(|hwnd| {
            let visible = unsafe { IsWindowVisible(hwnd) } != 0;
            let title = if visible { window_title(hwnd) } else { String::new() };
            // Only listed windows need their process; it may have exited since EnumWindows.
            let process_name = is_listed(&title, visible)
                .then(|| process_image_path(hwnd))
                .flatten()
                .as_deref()
                .and_then(process_name_from_image_path);
            RawWindow {
                handle: WindowHandle(hwnd as i64),
                title,
                visible,
                process_name,
            }
        });
        Ok(listed_windows(raw))
    }

    fn window_layout(&self, handle: WindowHandle) -> Result<WindowLayout> {
        let mut rect = RECT {
            left: 0,
            top: 0,
            right: 0,
            bottom: 0,
        };
        let ok = unsafe { GetWindowRect(handle.0 as HWND, &mut rect) };
        if ok == 0 {
            return Err(io::Error::last_os_error())
                .with_context(|| format!("GetWindowRect failed for window {}", handle));
        }
        Ok(WindowLayout::from_edges(rect.left, rect.top, rect.right, rect.bottom))
    }

    fn set_window_layout(&self, handle: WindowHandle, layout: &WindowLayout) -> Result<()> {
        if layout.size.width < 0 || layout.size.height < 0 {
            return Err(anyhow!(
                "refusing negative size {}x{} for window {}",
                layout.size.width,
                layout.size.height,
                handle
            ));
        }
        let ok = unsafe {
            SetWindowPos(
                handle.0 as HWND,
                0,
                layout.top_left.x,
                layout.top_left.y,
                layout.size.width,
                layout.size.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )
        };
        if ok == 0 {
            return Err(io::Error::last_os_error())
                .with_context(|| format!("SetWindowPos failed for window {}", handle));
        }
        Ok(())
    }
}
