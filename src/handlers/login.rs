use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::AppState;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

use super::utils::{decode_json, require_non_empty};

/// Same message for unknown user and wrong password
const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub message: String,
}

/// POST /login - Check a username/password pair
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "id": 1, "username": "alice", "email": "alice@example.com", "message": "Login successful" }
/// ```
///
/// Unknown usernames and wrong passwords both answer 401 with the same body.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let credentials = decode_json(payload)?;
    require_non_empty("username", &credentials.username)?;
    require_non_empty("password", &credentials.password)?;

    let user = match state.queries.get_user_by_username(&credentials.username).await {
        Ok(user) => user,
        Err(DatabaseError::NotFound(_)) => {
            warn!("Rejected login attempt");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
        Err(e) => return Err(e.into()),
    };

    if !user.password_matches(&credentials.password) {
        warn!("Rejected login attempt");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    info!(user_id = user.id, "Login succeeded");
    Ok(ApiResponse::success(LoginResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        message: "Login successful".to_string(),
    }))
}
