// Row -> model mapping. Nullable text columns map to empty strings, unreadable timestamps to None.

use crate::date_range::DATE_FORMAT;
use crate::models::{CrashCountRecord, CrashEvent};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

pub(super) fn parse_event_row(row: &SqliteRow) -> anyhow::Result<CrashEvent> {
    let container_id: Option<String> = row.try_get("container_id")?;
    let container_name: Option<String> = row.try_get("container_name")?;
    let logs: Option<String> = row.try_get("logs")?;
    let crashed_on: Option<String> = row.try_get("crashedon")?;
    let crashed_on = crashed_on.as_deref().and_then(parse_crash_timestamp);

    Ok(CrashEvent {
        container_id: container_id.unwrap_or_default(),
        container_name: container_name.unwrap_or_default(),
        crashed_on,
        log_text: logs.unwrap_or_default(),
    })
}

pub(super) fn parse_count_row(row: &SqliteRow) -> anyhow::Result<CrashCountRecord> {
    let crash_date: Option<String> = row.try_get("crash_date")?;
    let container_id: Option<String> = row.try_get("container_id")?;
    let container_name: Option<String> = row.try_get("container_name")?;
    let crash_count: i64 = row.try_get("crash_count")?;

    // date() is NULL for timestamps SQLite cannot read; such rows map to an undated record.
    let crashed_on = match crash_date.as_deref() {
        Some(s) => Some(
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map_err(|e| anyhow::anyhow!("crash_date {:?}: {}", s, e))?,
        ),
        None => None,
    };

    Ok(CrashCountRecord {
        container_id: container_id.unwrap_or_default(),
        container_name: container_name.unwrap_or_default(),
        crashed_on,
        crash_count: u32::try_from(crash_count)?,
    })
}

/// Timestamp layouts the monitor (or a hand-edited row) may leave in `crashedon`.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const OFFSET_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

/// Lenient decode of a stored crash time. A value chrono cannot read becomes `None`
/// so one bad row never hides the rest of the batch.
pub(super) fn parse_crash_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let parsed = TIMESTAMP_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
        .or_else(|| {
            OFFSET_TIMESTAMP_FORMATS
                .iter()
                .find_map(|f| DateTime::parse_from_str(raw, f).ok())
                .map(|t| t.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });
    if parsed.is_none() {
        tracing::debug!(crashedon = %raw, "unreadable crash timestamp, keeping event undated");
    }
    parsed
}
