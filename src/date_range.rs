// Validated inclusive calendar-day range used to scope a crash query.

use chrono::{NaiveDate, NaiveDateTime};

/// Wire format for range endpoints (`date_from` / `date_to`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("date range is incomplete: both start and end dates are required")]
    InvalidRange,

    #[error("date range is inverted: start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("Incorrect date format, should be YYYY-MM-DD (got {0:?})")]
    MalformedDate(String),
}

/// Inclusive on both ends; `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn validate(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, RangeError> {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(RangeError::InvalidRange);
        };
        if start > end {
            return Err(RangeError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Drops time-of-day first, so two instants on the same calendar day always validate.
    pub fn from_datetimes(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Self, RangeError> {
        Self::validate(start.map(|t| t.date()), end.map(|t| t.date()))
    }

    /// Parse `YYYY-MM-DD` endpoints as they arrive from the date picker / query string.
    /// Blank strings count as missing.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, RangeError> {
        Self::validate(parse_day(start)?, parse_day(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `(date_from, date_to)` as calendar-day strings for the crash source.
    pub fn as_query_bounds(&self) -> (String, String) {
        (
            self.start.format(DATE_FORMAT).to_string(),
            self.end.format(DATE_FORMAT).to_string(),
        )
    }
}

fn parse_day(raw: Option<&str>) -> Result<Option<NaiveDate>, RangeError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|_| RangeError::MalformedDate(s.to_string())),
    }
}
