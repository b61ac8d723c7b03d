// Crash records as delivered by the collector, plus the consolidated log view

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ChartSeries;

/// One crash as recorded by the collector: who crashed, when, and the log tail captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashEvent {
    pub container_id: String,
    #[serde(default)]
    pub container_name: String,
    #[serde(default)]
    pub crashed_on: Option<NaiveDateTime>,
    #[serde(default, rename = "logs")]
    pub log_text: String,
}

/// Pre-aggregated crash count for one container on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashCountRecord {
    pub container_id: String,
    #[serde(default)]
    pub container_name: String,
    #[serde(default)]
    pub crashed_on: Option<NaiveDate>,
    pub crash_count: u32,
}

/// All log fragments of one container joined in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerLogTranscript {
    pub container_id: String,
    pub container_name: String,
    #[serde(rename = "logs")]
    pub log_text: String,
}

/// Result of one range query: log transcripts for the viewer and the chart matrix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrashReport {
    pub transcripts: Vec<ContainerLogTranscript>,
    pub series: ChartSeries,
}

impl CrashReport {
    /// Transcript for the container picked in the log viewer.
    pub fn transcript(&self, container_id: &str) -> Option<&ContainerLogTranscript> {
        self.transcripts
            .iter()
            .find(|t| t.container_id == container_id)
    }
}
