use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// GET /
pub async fn home_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Hello world!\n")
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME")
    }))
}
