// Shared test helpers
#![allow(dead_code)]

use chrono::NaiveDate;
use crashwatch::models::{CrashCountRecord, CrashEvent};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn event(id: &str, name: &str, on: NaiveDate, text: &str) -> CrashEvent {
    CrashEvent {
        container_id: id.into(),
        container_name: name.into(),
        crashed_on: Some(on.and_hms_opt(12, 0, 0).unwrap()),
        log_text: text.into(),
    }
}

pub fn record(id: &str, name: &str, on: NaiveDate, count: u32) -> CrashCountRecord {
    CrashCountRecord {
        container_id: id.into(),
        container_name: name.into(),
        crashed_on: Some(on),
        crash_count: count,
    }
}
