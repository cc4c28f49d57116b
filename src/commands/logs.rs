use crate::core::app_log::AppLogRecord;
use crate::core::AppConfig;
use chrono::{Local, TimeZone};
use std::fmt::Write as _;

fn format_record(record: &AppLogRecord) -> String {
    let ts = Local
        .timestamp_millis_opt(record.ts_ms)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| record.ts_ms.to_string());
    let mut line = format!("{} {:<5} [{}] {}", ts, record.level, record.scope, record.message);
    if let Some(data) = &record.data {
        let _ = write!(line, " {}", data);
    }
    line
}

pub fn read_logs(config: &AppConfig, limit: Option<u32>, query: Option<String>) -> Result<String, String> {
    let limit = limit.unwrap_or(500).clamp(1, 5000) as usize;
    let records = config.log.read(limit, query, None)?;
    if records.is_empty() {
        return Ok("No log records".to_string());
    }
    Ok(records.iter().map(format_record).collect::<Vec<_>>().join("\n"))
}

pub fn clear_logs(config: &AppConfig) -> Result<String, String> {
    config.log.clear()?;
    Ok(format!("Cleared logs in {}", config.log.dir().display()))
}
