// GET handlers: version, raw crash data, consolidated crash report

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::AppState;
use crate::date_range::{DateRange, RangeError};
use crate::query::QueryOrchestrator;
use crate::version::{NAME, VERSION};

/// `?date_from=YYYY-MM-DD&date_to=YYYY-MM-DD`; both inclusive.
#[derive(Debug, Deserialize)]
pub(super) struct RangeParams {
    date_from: Option<String>,
    date_to: Option<String>,
}

impl RangeParams {
    fn range(&self) -> Result<DateRange, RangeError> {
        DateRange::parse(self.date_from.as_deref(), self.date_to.as_deref())
    }
}

pub(super) enum ApiError {
    Range(RangeError),
    Source(anyhow::Error),
}

impl From<RangeError> for ApiError {
    fn from(e: RangeError) -> Self {
        ApiError::Range(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Source(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Range(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Source(e) => {
                tracing::warn!(error = %e, "crash store query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "crash store unavailable".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/crashed_containers — one entry per crash, oldest first.
pub(super) async fn crash_events_handler(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let range = params.range()?;
    let events = state.crash_repo.get_crash_events(&range).await?;
    Ok(Json(events))
}

/// GET /api/crashed_containers/chart-stats — crash counts per day and container.
pub(super) async fn chart_stats_handler(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let range = params.range()?;
    let records = state.crash_repo.get_daily_crash_counts(&range).await?;
    Ok(Json(records))
}

/// GET /api/crash-report — log transcripts plus chart matrix. Store failures degrade to
/// empty sections instead of an error status.
pub(super) async fn crash_report_handler(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let report = QueryOrchestrator::new(state.crash_repo.clone())
        .query_days(params.date_from.as_deref(), params.date_to.as_deref())
        .await?;
    Ok(Json(report))
}
