// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::crash_repo::CrashRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) crash_repo: Arc<CrashRepo>,
}

pub fn app(crash_repo: Arc<CrashRepo>) -> Router {
    let state = AppState { crash_repo };
    Router::new()
        .route("/", get(|| async { "crashwatch: container crash reports" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/crashed_containers", get(http::crash_events_handler)) // GET /api/crashed_containers
        .route(
            "/api/crashed_containers/chart-stats",
            get(http::chart_stats_handler),
        ) // GET /api/crashed_containers/chart-stats
        .route("/api/crash-report", get(http::crash_report_handler)) // GET /api/crash-report
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
