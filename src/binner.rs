// Time-series binning: daily count records -> dense date x container matrix.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::models::{ChartSeries, ContainerKey, CrashCountRecord};

/// Builds the chart matrix from pre-aggregated daily counts.
///
/// - `dates`: distinct crash days, ascending. Only observed days form the axis (no gap filling).
/// - `containers`: distinct `container_id`s in first-appearance order.
/// - Cells without a record are 0. If two records hit the same cell, the first one wins.
///
/// Records without a `crashed_on` day are dropped entirely: they add neither a date nor a container.
pub fn bin(records: &[CrashCountRecord]) -> ChartSeries {
    let dated: Vec<(NaiveDate, &CrashCountRecord)> = records
        .iter()
        .filter_map(|r| r.crashed_on.map(|day| (day, r)))
        .collect();

    let dates: Vec<_> = dated
        .iter()
        .map(|(day, _)| *day)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut containers: Vec<ContainerKey> = Vec::new();
    let mut row_by_id: HashMap<&str, usize> = HashMap::new();
    for (_, r) in &dated {
        if !row_by_id.contains_key(r.container_id.as_str()) {
            row_by_id.insert(r.container_id.as_str(), containers.len());
            containers.push(ContainerKey {
                container_id: r.container_id.clone(),
                container_name: r.container_name.clone(),
            });
        }
    }

    let mut cells: Vec<Vec<Option<u32>>> = vec![vec![None; dates.len()]; containers.len()];
    for (day, r) in &dated {
        // Both lookups succeed: every dated record contributed its day and container above.
        let (Ok(col), Some(&row)) = (
            dates.binary_search(day),
            row_by_id.get(r.container_id.as_str()),
        ) else {
            continue;
        };
        let cell = &mut cells[row][col];
        if cell.is_none() {
            *cell = Some(r.crash_count);
        }
    }

    let counts = cells
        .into_iter()
        .map(|row| row.into_iter().map(|c| c.unwrap_or(0)).collect())
        .collect();

    ChartSeries {
        dates,
        containers,
        counts,
    }
}
