use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /health - Liveness plus a store ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.queries.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            let error = ApiError::service_unavailable("database unavailable");
            let mut body = error.to_json();
            body["status"] = json!("degraded");
            body["timestamp"] = json!(now);
            (error.status_code(), Json(body)).into_response()
        }
    }
}
