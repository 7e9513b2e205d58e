use axum::Json;
use serde_json::{Value, json};

/// Liveness probe. Makes no outbound calls.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "pr-review-backend",
    }))
}
