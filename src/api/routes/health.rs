//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Dashboard health with load phase

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::dashboard::LoadPhase;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Reports whether the dashboard has data and how the last refresh went.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dashboard = state.dashboard.state().await;

    let status = match dashboard.phase() {
        LoadPhase::Loaded => "healthy",
        LoadPhase::Stale => "degraded",
        LoadPhase::Loading if dashboard.last_updated().is_some() => "healthy",
        LoadPhase::Idle | LoadPhase::Loading => "starting",
    };

    Json(HealthResponse {
        status: status.to_string(),
        phase: dashboard.phase(),
        last_updated: dashboard.last_updated(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
