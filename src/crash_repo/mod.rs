// SQLite crash store written by the container monitor. This side only reads it.

mod row_map;

use crate::date_range::DateRange;
use crate::models::{CrashCountRecord, CrashEvent};
use crate::query::CrashEventSource;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

pub struct CrashRepo {
    pool: SqlitePool,
}

impl CrashRepo {
    pub async fn connect(
        path: &str,
        max_pool_size: u32,
        busy_timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(busy_timeout_secs))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    /// Creates the crash table if the monitor has not run yet. Never touches existing rows.
    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS crashedcontainers (
                id INTEGER PRIMARY KEY,
                container_id VARCHAR(100),
                container_name VARCHAR(100),
                logs VARCHAR(5000),
                crashedon DATETIME NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_crashedcontainers_crashedon ON crashedcontainers(crashedon)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Crashes whose calendar day lies in `range`, oldest first.
    #[instrument(skip(self), fields(repo = "crash", operation = "get_crash_events"))]
    pub async fn get_crash_events(&self, range: &DateRange) -> anyhow::Result<Vec<CrashEvent>> {
        let (date_from, date_to) = range.as_query_bounds();
        let rows = sqlx::query(
            "SELECT container_id, container_name, logs, CAST(crashedon AS TEXT) AS crashedon
             FROM crashedcontainers
             WHERE date(crashedon) >= $1 AND date(crashedon) <= $2
             ORDER BY crashedon ASC, id ASC",
        )
        .bind(date_from)
        .bind(date_to)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(row_map::parse_event_row(&row)?);
        }
        Ok(out)
    }

    /// Crash counts per (day, container) in `range`, ordered by day then name.
    /// The name reported for a group is the one on its earliest crash.
    #[instrument(skip(self), fields(repo = "crash", operation = "get_daily_crash_counts"))]
    pub async fn get_daily_crash_counts(
        &self,
        range: &DateRange,
    ) -> anyhow::Result<Vec<CrashCountRecord>> {
        let (date_from, date_to) = range.as_query_bounds();
        // SQLite fills bare columns from the row that produced MIN(crashedon).
        let rows = sqlx::query(
            "SELECT date(crashedon) AS crash_date, container_id, container_name,
                    MIN(crashedon) AS first_crash, COUNT(*) AS crash_count
             FROM crashedcontainers
             WHERE date(crashedon) >= $1 AND date(crashedon) <= $2
             GROUP BY crash_date, container_id
             ORDER BY crash_date ASC, container_name ASC",
        )
        .bind(date_from)
        .bind(date_to)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(row_map::parse_count_row(&row)?);
        }
        Ok(out)
    }
}

impl CrashEventSource for CrashRepo {
    async fn fetch_events(&self, range: &DateRange) -> anyhow::Result<Vec<CrashEvent>> {
        self.get_crash_events(range).await
    }

    async fn fetch_count_records(
        &self,
        range: &DateRange,
    ) -> anyhow::Result<Vec<CrashCountRecord>> {
        self.get_daily_crash_counts(range).await
    }
}
