//! Append-only JSON-lines application log with size-based rotation.
//!
//! `app.log.jsonl` is the live file; once it reaches the size limit it becomes
//! `app.log.1.jsonl`, older rotations shift up, and the oldest beyond
//! [`MAX_ROTATIONS`] is dropped.

use chrono::Utc;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs::{self, File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

const LOG_FILE_NAME: &str = "app.log.jsonl";
const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;
pub const MAX_ROTATIONS: usize = 3;
const DEFAULT_TAIL_BYTES: u64 = 2 * 1024 * 1024;

static LOG_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppLogRecord {
    pub ts_ms: i64,
    pub level: String,
    pub scope: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl AppLogRecord {
    pub fn now(level: &str, scope: &str, message: &str, data: Option<Value>) -> Self {
        Self {
            ts_ms: Utc::now().timestamp_millis(),
            level: level.to_string(),
            scope: scope.to_string(),
            message: message.to_string(),
            data,
        }
    }

    fn matches(&self, query: &str) -> bool {
        format!("{} {} {}", self.level, self.scope, self.message)
            .to_lowercase()
            .contains(query)
    }
}

#[derive(Debug, Clone)]
pub struct AppLog {
    dir: PathBuf,
    max_bytes: u64,
    enabled: bool,
}

impl AppLog {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            max_bytes: MAX_LOG_BYTES,
            enabled: true,
        }
    }

    /// A disabled log accepts every append and writes nothing.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn live_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE_NAME)
    }

    fn rotated_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("app.log.{}.jsonl", index))
    }

    /// Rotated files oldest first, then the live file.
    fn files_oldest_first(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = (1..=MAX_ROTATIONS).rev().map(|i| self.rotated_path(i)).collect();
        paths.push(self.live_path());
        paths
    }

    fn rotate_if_needed(&self) -> Result<(), String> {
        let live = self.live_path();
        match fs::metadata(&live) {
            Ok(meta) if meta.len() >= self.max_bytes => {}
            _ => return Ok(()),
        }

        let oldest = self.rotated_path(MAX_ROTATIONS);
        if oldest.exists() {
            fs::remove_file(&oldest)
                .map_err(|e| format!("Failed to remove old log {}: {}", oldest.display(), e))?;
        }

        // shift N-1 -> N, ..., live -> 1
        for i in (0..MAX_ROTATIONS).rev() {
            let src = if i == 0 { live.clone() } else { self.rotated_path(i) };
            let dst = self.rotated_path(i + 1);
            if src.exists() {
                fs::rename(&src, &dst).map_err(|e| {
                    format!("Failed to rotate log ({} -> {}): {}", src.display(), dst.display(), e)
                })?;
            }
        }
        Ok(())
    }

    pub fn append(&self, record: AppLogRecord) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }
        let _guard = LOG_LOCK.lock();
        fs::create_dir_all(&self.dir).map_err(|e| format!("Failed to create log dir: {}", e))?;
        self.rotate_if_needed()?;

        let mut line =
            serde_json::to_string(&record).map_err(|e| format!("Failed to serialize log record: {}", e))?;
        line.push('\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.live_path())
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|e| format!("Failed to write log record: {}", e))
    }

    pub fn info(&self, scope: &str, message: &str, data: Option<Value>) -> Result<(), String> {
        self.append(AppLogRecord::now("info", scope, message, data))
    }

    pub fn warn(&self, scope: &str, message: &str, data: Option<Value>) -> Result<(), String> {
        self.append(AppLogRecord::now("warn", scope, message, data))
    }

    pub fn error(&self, scope: &str, message: &str, data: Option<Value>) -> Result<(), String> {
        self.append(AppLogRecord::now("error", scope, message, data))
    }

    /// Returns at most `limit` of the newest records (oldest first), optionally filtered
    /// by a case-insensitive substring of level, scope or message.
    pub fn read(
        &self,
        limit: usize,
        query: Option<String>,
        tail_bytes: Option<u64>,
    ) -> Result<Vec<AppLogRecord>, String> {
        let _guard = LOG_LOCK.lock();
        let query = query.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());
        let tail_bytes = tail_bytes.unwrap_or(DEFAULT_TAIL_BYTES);

        let mut records = Vec::new();
        for path in self.files_oldest_first() {
            if !path.exists() {
                continue;
            }
            let content = read_tail(&path, tail_bytes)?;
            records.extend(
                content
                    .lines()
                    .filter_map(|line| serde_json::from_str::<AppLogRecord>(line).ok())
                    .filter(|rec| query.as_deref().map_or(true, |q| rec.matches(q))),
            );
        }

        let excess = records.len().saturating_sub(limit);
        records.drain(..excess);
        Ok(records)
    }

    pub fn clear(&self) -> Result<(), String> {
        let _guard = LOG_LOCK.lock();
        for path in self.files_oldest_first() {
            if path.exists() {
                fs::remove_file(&path)
                    .map_err(|e| format!("Failed to remove log file {}: {}", path.display(), e))?;
            }
        }
        Ok(())
    }
}

fn read_tail(path: &Path, max_bytes: u64) -> Result<String, String> {
    let mut file = File::open(path).map_err(|e| format!("Failed to open log file: {}", e))?;
    let size = file
        .metadata()
        .map_err(|e| format!("Failed to read log metadata: {}", e))?
        .len();

    let start = size.saturating_sub(max_bytes);
    file.seek(SeekFrom::Start(start))
        .map_err(|e| format!("Failed to seek log file: {}", e))?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| format!("Failed to read log file: {}", e))?;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    // A seek into the middle of the file leaves a partial first line.
    if start == 0 {
        return Ok(text);
    }
    Ok(text
        .split_once('\n')
        .map(|(_, rest)| rest.to_string())
        .unwrap_or_default())
}

pub fn install_panic_hook(log: AppLog) {
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "panic".to_string()
        };
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let _ = log.error("panic", &format!("{} ({})", payload, location), None);

        prev(info);
    }));
}
