use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use sift_config::AppConfig;
use sift_core::time::offset_from_seconds;

/// Picks the `--tz-offset` override or the configured default, and validates it.
pub fn resolve_offset(override_secs: Option<i32>, config: &AppConfig) -> Result<i32> {
    let offset = override_secs.unwrap_or(config.time_zone_offset);
    offset_from_seconds(offset)?;
    Ok(offset)
}

pub fn format_millis(ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => "out of range".to_string(),
    }
}
