use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Liveness message served at `/` for any method.
pub async fn hello() -> impl IntoResponse {
    Json(json!({ "message": "Hello, World!" }))
}
