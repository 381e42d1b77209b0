//! SeaState View-Model API
//!
//! Serves the dashboard view-model over HTTP for a front end, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Full view-model
//! - `POST /api/v1/dashboard/refresh` - Re-fetch all feeds
//! - `GET /api/v1/cards` - Condition cards
//! - `GET /api/v1/alerts` - Alert feed
//!
//! ## Vessels
//! - `GET /api/v1/vessels` - Fleet monitor tiles
//! - `GET /api/v1/vessels/:id` - Vessel details
//! - `POST /api/v1/vessels/:id/optimize` - Route to recommendations
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use seastate::api::{serve, AppState};
//! use seastate::backend::BackendClient;
//! use seastate::config::Config;
//! use seastate::dashboard::Dashboard;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default();
//!     let source = Arc::new(BackendClient::new(config.client_config())?);
//!     let dashboard = Arc::new(Dashboard::new(source, config.location.clone()));
//!     dashboard.fetch_all_data().await;
//!
//!     serve(AppState::new(dashboard), &config.api).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Dashboard routes
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/dashboard/refresh", post(routes::dashboard::refresh))
        .route("/cards", get(routes::dashboard::list_cards))
        .route("/alerts", get(routes::dashboard::list_alerts))
        // Vessel routes
        .route("/vessels", get(routes::vessels::list_vessels))
        .route("/vessels/:id", get(routes::vessels::get_vessel))
        .route("/vessels/:id/optimize", post(routes::vessels::optimize_route));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("SeaState API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("SeaState API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{stub, BackendClient, ClientConfig};
    use crate::dashboard::{Dashboard, Location, StaticFleet};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    const FLEET: &str = r#"[
        {"id": 1, "name": "Northern Star", "type": "Cargo", "status": "Optimal",
         "speed": "14.2 knots", "weather": {"wind": 12.5, "temp": 18.0}},
        {"id": 2, "name": "Ocean Pearl", "type": "Tanker", "status": "Caution",
         "speed": "9.8 knots", "weather": {"wind": 22.1, "temp": 15.5}}
    ]"#;

    async fn create_test_app(fetch: bool) -> Router {
        let base_url = stub::spawn(stub::reference_backend()).await;
        let client = BackendClient::new(ClientConfig {
            base_url,
            request_timeout_ms: None,
        })
        .unwrap();

        let fleet = StaticFleet::from_json(FLEET).unwrap();
        let dashboard = Dashboard::new(Arc::new(client), Location::default())
            .with_fleet(Arc::new(fleet));
        if fetch {
            dashboard.fetch_all_data().await;
        }

        build_router(AppState::new(Arc::new(dashboard)))
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app(false).await;
        let (status, _) = send(app, "GET", "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_before_first_fetch() {
        let app = create_test_app(false).await;
        let (status, body) = send(app, "GET", "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "starting");
        assert_eq!(body["phase"], "idle");
        assert!(body["last_updated"].is_null());
    }

    #[tokio::test]
    async fn test_health_after_fetch() {
        let app = create_test_app(true).await;
        let (_, body) = send(app, "GET", "/health").await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["phase"], "loaded");
        assert!(body["last_updated"].is_string());
    }

    #[tokio::test]
    async fn test_dashboard_view() {
        let app = create_test_app(true).await;
        let (status, body) = send(app, "GET", "/api/v1/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loading"], false);
        assert_eq!(body["cards"].as_array().unwrap().len(), 4);
        assert_eq!(body["cards"][0]["value"], "23 knots");
        assert_eq!(body["cards"][1]["value"], "3.1m");
        assert!(body["alert_banner"].is_null());
        assert_eq!(body["metrics"]["vessels_monitored"], 252);
    }

    #[tokio::test]
    async fn test_cards_empty_before_fetch() {
        let app = create_test_app(false).await;
        let (status, body) = send(app, "GET", "/api/v1/cards").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_refresh() {
        let app = create_test_app(false).await;
        let (status, body) = send(app, "POST", "/api/v1/dashboard/refresh").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["status"], "completed");
        assert_eq!(body["view"]["phase"], "loaded");
        assert_eq!(body["view"]["cards"][2]["value"], "30°C");
    }

    #[tokio::test]
    async fn test_alerts_empty() {
        let app = create_test_app(true).await;
        let (status, body) = send(app, "GET", "/api/v1/alerts").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_list_vessels() {
        let app = create_test_app(false).await;
        let (status, body) = send(app, "GET", "/api/v1/vessels").await;

        assert_eq!(status, StatusCode::OK);
        let tiles = body.as_array().unwrap();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0]["name"], "Northern Star");
        assert_eq!(tiles[1]["badge"], "warning");
    }

    #[tokio::test]
    async fn test_vessel_details() {
        let app = create_test_app(false).await;
        let (status, body) = send(app, "GET", "/api/v1/vessels/2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vessel"]["name"], "Ocean Pearl");
        let details = body["details"].as_str().unwrap();
        assert!(details.starts_with("Vessel Details:\nName: Ocean Pearl"));
        assert!(details.contains("Wind: 22.1 knots"));
    }

    #[tokio::test]
    async fn test_vessel_not_found() {
        let app = create_test_app(false).await;
        let (status, body) = send(app, "GET", "/api/v1/vessels/99").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_optimize_route() {
        let app = create_test_app(false).await;
        let (status, body) = send(app, "POST", "/api/v1/vessels/1/optimize").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"], "/recommendations");
    }
}
