// Dense date x container crash matrix for the grouped bar chart

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Legend entry: stable identity plus the display label seen first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerKey {
    pub container_id: String,
    pub container_name: String,
}

/// `counts[c][d]` is the crash count of `containers[c]` on `dates[d]`.
/// Every row has exactly `dates.len()` cells; absent combinations hold 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub dates: Vec<NaiveDate>,
    pub containers: Vec<ContainerKey>,
    pub counts: Vec<Vec<u32>>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.containers.is_empty()
    }

    /// Number of cells in the matrix (`dates x containers`).
    pub fn cell_count(&self) -> usize {
        self.counts.iter().map(Vec::len).sum()
    }

    /// Count for one cell. Pairs outside the axes read as 0, same as zero-filled cells.
    pub fn count(&self, date: NaiveDate, container_id: &str) -> u32 {
        let Ok(d) = self.dates.binary_search(&date) else {
            return 0;
        };
        self.series(container_id)
            .and_then(|row| row.get(d).copied())
            .unwrap_or(0)
    }

    /// Per-date counts for one container, aligned with `dates`.
    pub fn series(&self, container_id: &str) -> Option<&[u32]> {
        let c = self
            .containers
            .iter()
            .position(|k| k.container_id == container_id)?;
        self.counts.get(c).map(Vec::as_slice)
    }
}
