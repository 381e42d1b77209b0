//! Vessel Routes
//!
//! - GET /api/v1/vessels - Fleet monitor tiles
//! - GET /api/v1/vessels/:id - Vessel details
//! - POST /api/v1/vessels/:id/optimize - Route to recommendations

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{NavigateResponse, VesselDetailsResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{panels::vessel_tiles, VesselTile};

/// GET /api/v1/vessels
pub async fn list_vessels(State(state): State<Arc<AppState>>) -> Json<Vec<VesselTile>> {
    Json(vessel_tiles(&state.dashboard.vessels()))
}

/// GET /api/v1/vessels/:id
pub async fn get_vessel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<VesselDetailsResponse>> {
    let details = state
        .dashboard
        .handle_view_details(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Vessel '{}' not found", id)))?;

    let vessel = vessel_tiles(&state.dashboard.vessels())
        .into_iter()
        .find(|tile| tile.id.matches(&id))
        .ok_or_else(|| ApiError::NotFound(format!("Vessel '{}' not found", id)))?;

    Ok(Json(VesselDetailsResponse { vessel, details }))
}

/// POST /api/v1/vessels/:id/optimize
pub async fn optimize_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<NavigateResponse> {
    Json(state.dashboard.handle_optimize_route(&id).into())
}
