//! Dashboard Routes
//!
//! - GET /api/v1/dashboard - Full view-model
//! - POST /api/v1/dashboard/refresh - Re-run the fetch sequence
//! - GET /api/v1/cards - Condition cards only
//! - GET /api/v1/alerts - Alert feed

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::RefreshResponse;
use crate::api::state::AppState;
use crate::dashboard::{Alert, DashboardView, WeatherCard};

/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.dashboard.view().await)
}

/// POST /api/v1/dashboard/refresh
///
/// Always answers 200; a failed fetch shows up in `outcome` and the view
/// keeps whatever data was already loaded.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    let outcome = state.dashboard.handle_refresh_data().await;
    let view = state.dashboard.view().await;
    Json(RefreshResponse { outcome, view })
}

/// GET /api/v1/cards
pub async fn list_cards(State(state): State<Arc<AppState>>) -> Json<Vec<WeatherCard>> {
    Json(state.dashboard.weather_cards().await)
}

/// GET /api/v1/alerts
pub async fn list_alerts(State(state): State<Arc<AppState>>) -> Json<Vec<Alert>> {
    Json(state.dashboard.alerts().await)
}
