//! In-process stand-in for the weather backend, used by tests.

use axum::{routing::get, Json, Router};

/// Serve `router` on an ephemeral local port and return its base URL
pub(crate) async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Backend answering with the reference conditions: 12 m/s wind, 30°C,
/// 9 km visibility, 3.1 m waves and no alerts
pub(crate) fn reference_backend() -> Router {
    Router::new()
        .route(
            "/api/weather/city",
            get(|| async {
                Json(serde_json::json!({
                    "wind": {"speed": 12},
                    "main": {"temp": 30},
                    "visibility": 9000
                }))
            }),
        )
        .route(
            "/api/marine",
            get(|| async { Json(serde_json::json!({"current": {"wave_height": 3.1}})) }),
        )
        .route("/api/alerts", get(|| async { Json(serde_json::json!([])) }))
}
