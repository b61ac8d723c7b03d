// Query orchestration: fetch raw events and daily counts side by side, then derive the report.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::binner;
use crate::consolidate;
use crate::date_range::{DateRange, RangeError};
use crate::models::{CrashCountRecord, CrashEvent, CrashReport};

/// Where crash data comes from. Both reads cover the inclusive calendar-day `range`.
///
/// Errors are returned, not swallowed; [`QueryOrchestrator`] decides how to recover.
pub trait CrashEventSource: Send + Sync {
    /// Raw crash events (one per crash, with its log tail), in the order the source delivers them.
    fn fetch_events(
        &self,
        range: &DateRange,
    ) -> impl Future<Output = anyhow::Result<Vec<CrashEvent>>> + Send;

    /// Pre-aggregated per-day, per-container crash counts.
    fn fetch_count_records(
        &self,
        range: &DateRange,
    ) -> impl Future<Output = anyhow::Result<Vec<CrashCountRecord>>> + Send;
}

pub struct QueryOrchestrator<S> {
    source: Arc<S>,
}

impl<S: CrashEventSource> QueryOrchestrator<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Validate raw endpoints, then query. A bad range never reaches the source.
    pub async fn query_days(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<CrashReport, RangeError> {
        let range = DateRange::parse(start, end)?;
        Ok(self.query(&range).await)
    }

    /// Both fetches run concurrently and are awaited together. A failed fetch is logged and
    /// replaced by an empty result without affecting the other one, so a report can carry
    /// transcripts with no chart data or the other way round.
    #[instrument(skip(self), fields(start = %range.start(), end = %range.end()))]
    pub async fn query(&self, range: &DateRange) -> CrashReport {
        let (events, records) = tokio::join!(
            self.source.fetch_events(range),
            self.source.fetch_count_records(range),
        );

        let events = events.unwrap_or_else(|e| {
            warn!(branch = "events", error = %e, "crash event fetch failed, using empty result");
            Vec::new()
        });
        let records = records.unwrap_or_else(|e| {
            warn!(branch = "count_records", error = %e, "crash count fetch failed, using empty result");
            Vec::new()
        });

        let report = CrashReport {
            transcripts: consolidate::consolidate(&events),
            series: binner::bin(&records),
        };
        debug!(
            events = events.len(),
            count_records = records.len(),
            transcripts = report.transcripts.len(),
            dates = report.series.dates.len(),
            containers = report.series.containers.len(),
            "crash report built"
        );
        report
    }
}
