use crate::error::{GraderError, Result};
use chrono::{DateTime, FixedOffset, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTimestamp {
    pub date: String,
    pub time: String,
}

/// Renders `now` at a fixed UTC offset as `YYYY-MM-DD` and `HH:MM:SS`.
pub fn stamp(now: DateTime<Utc>, utc_offset_hours: i32) -> Result<RunTimestamp> {
    let offset = FixedOffset::east_opt(utc_offset_hours * 3600).ok_or_else(|| {
        GraderError::ConfigParse(format!("invalid UTC offset: {utc_offset_hours} hours"))
    })?;
    let local = now.with_timezone(&offset);
    Ok(RunTimestamp {
        date: local.format("%Y-%m-%d").to_string(),
        time: local.format("%H:%M:%S").to_string(),
    })
}
