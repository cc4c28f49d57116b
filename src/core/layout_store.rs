use crate::core::desktop::Desktop;
use crate::core::persistence;
use crate::models::{LayoutMap, WindowHandle, WindowInfo};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

const LAYOUT_FILE_PREFIX: &str = "layout_";
const LAYOUT_FILE_EXTENSION: &str = ".json";
const KEY_SEPARATOR: char = '|';

/// A stored identity key split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutKey {
    /// `None` when the handle part is not an integer; title + process matching still applies.
    pub handle: Option<WindowHandle>,
    pub title: String,
    pub process_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Handle,
    TitleAndProcess,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestoredWindow {
    pub key: String,
    pub handle: WindowHandle,
    pub matched_by: MatchKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedRestore {
    pub key: String,
    pub handle: WindowHandle,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RestoreReport {
    pub applied: Vec<RestoredWindow>,
    pub unmatched: Vec<String>,
    pub malformed: Vec<String>,
    pub failed: Vec<FailedRestore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveSummary {
    pub path: PathBuf,
    pub saved: usize,
}

/// Splits `<handle>|<title>|<process>`. The title may itself contain `|`, so the handle
/// ends at the first separator and the process name starts after the last one.
pub fn parse_key(key: &str) -> Option<LayoutKey> {
    let (handle, rest) = key.split_once(KEY_SEPARATOR)?;
    let (title, process_name) = rest.rsplit_once(KEY_SEPARATOR)?;
    Some(LayoutKey {
        handle: handle.trim().parse::<i64>().ok().map(WindowHandle),
        title: title.to_string(),
        process_name: process_name.to_string(),
    })
}

/// Finds the live window a stored key refers to.
///
/// An exact handle match wins. Otherwise the first window in `live` with the same title
/// and process name is chosen, so duplicates resolve to the earliest enumerated window.
pub fn find_match<'a>(key: &LayoutKey, live: &'a [WindowInfo]) -> Option<(&'a WindowInfo, MatchKind)> {
    if let Some(handle) = key.handle {
        if let Some(window) = live.iter().find(|w| w.handle == handle) {
            return Some((window, MatchKind::Handle));
        }
    }
    live.iter()
        .find(|w| w.title == key.title && w.process_name == key.process_name)
        .map(|w| (w, MatchKind::TitleAndProcess))
}

/// Reads the geometry of every window in `windows` and writes it to `dir/file_name`.
///
/// Every window is recorded; if one rectangle cannot be read the save fails and no
/// file is written.
pub fn save_layout(
    desktop: &dyn Desktop,
    windows: &[WindowInfo],
    dir: &Path,
    file_name: &str,
) -> Result<SaveSummary> {
    let mut layouts = LayoutMap::new();
    for window in windows {
        let layout = desktop
            .window_layout(window.handle)
            .with_context(|| format!("Failed to read rectangle of window {}", window.handle))?;
        layouts.insert(window.layout_key(), layout);
    }

    let path = dir.join(file_name);
    persistence::write_json_atomically(&path, &layouts)
        .with_context(|| format!("Failed to write layout {}", path.display()))?;

    Ok(SaveSummary {
        path,
        saved: layouts.len(),
    })
}

pub fn load_layout(path: &Path) -> Result<LayoutMap> {
    persistence::read_json::<LayoutMap>(path)
        .with_context(|| format!("Failed to read layout {}", path.display()))?
        .ok_or_else(|| anyhow!("Layout file not found: {}", path.display()))
}

/// Applies every stored geometry to its matching live window.
///
/// Entries without a match are skipped. A failing positioning call does not stop the
/// remaining entries.
pub fn restore_layout(desktop: &dyn Desktop, layouts: &LayoutMap, live: &[WindowInfo]) -> RestoreReport {
    let mut report = RestoreReport::default();

    for (key, layout) in layouts {
        let Some(parsed) = parse_key(key) else {
            report.malformed.push(key.clone());
            continue;
        };
        let Some((window, matched_by)) = find_match(&parsed, live) else {
            report.unmatched.push(key.clone());
            continue;
        };

        match desktop.set_window_layout(window.handle, layout) {
            Ok(()) => report.applied.push(RestoredWindow {
                key: key.clone(),
                handle: window.handle,
                matched_by,
            }),
            Err(e) => report.failed.push(FailedRestore {
                key: key.clone(),
                handle: window.handle,
                error: format!("{:#}", e),
            }),
        }
    }

    report
}

pub fn restore_layout_file(desktop: &dyn Desktop, path: &Path, live: &[WindowInfo]) -> Result<RestoreReport> {
    let layouts = load_layout(path)?;
    Ok(restore_layout(desktop, &layouts, live))
}

/// `layout_<yyyy-MM-dd-HH-mm-ss>.json`
pub fn timestamped_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}{}{}",
        LAYOUT_FILE_PREFIX,
        now.format("%Y-%m-%d-%H-%M-%S"),
        LAYOUT_FILE_EXTENSION
    )
}

pub fn is_layout_file_name(name: &str) -> bool {
    name.len() > LAYOUT_FILE_PREFIX.len() + LAYOUT_FILE_EXTENSION.len()
        && name.starts_with(LAYOUT_FILE_PREFIX)
        && name.ends_with(LAYOUT_FILE_EXTENSION)
}

/// Names given for a new layout must be a bare `layout_*.json` file name, so the file
/// lands in the layout directory and shows up in [`list_layouts`].
pub fn validate_layout_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let is_bare = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(&['/', '\\'][..]);
    if !is_bare {
        return Err(anyhow!("Layout name must be a plain file name: {}", name));
    }
    if !is_layout_file_name(name) {
        return Err(anyhow!(
            "Layout name must look like {}<name>{}: {}",
            LAYOUT_FILE_PREFIX,
            LAYOUT_FILE_EXTENSION,
            name
        ));
    }
    Ok(())
}

/// Saved layout file names in `dir`, oldest first.
pub fn list_layouts(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if is_layout_file_name(&name) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Bare names live in the layout directory; anything with a path component is taken as-is.
pub fn resolve_layout_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        dir.join(candidate)
    }
}
