use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::app::AppState;
use crate::database::models::{User, UserParams};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

use super::utils::{decode_json, parse_id, require_non_empty};

/// Body accepted by POST /users and PUT /users/:id; every field is required
#[derive(Debug, Deserialize)]
pub struct UserInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl UserInput {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty("username", &self.username)?;
        require_non_empty("email", &self.email)?;
        require_non_empty("password", &self.password)?;
        Ok(())
    }

    fn into_params(self) -> UserParams {
        UserParams {
            username: self.username,
            email: self.email,
            password: self.password,
        }
    }
}

// `User` never serializes its password, so every response below is safe to return as-is.

/// GET /users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.queries.list_users().await?;
    Ok(ApiResponse::success(users))
}

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> ApiResult<User> {
    let input = decode_json(payload)?;
    input.validate()?;

    let user = state.queries.create_user(input.into_params()).await?;
    info!(user_id = user.id, username = %user.username, "Created user");
    Ok(ApiResponse::created(user))
}

/// GET /users/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    let id = parse_id(&id)?;
    let user = state.queries.get_user(id).await?;
    Ok(ApiResponse::success(user))
}

/// PUT /users/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> ApiResult<User> {
    let input = decode_json(payload)?;
    input.validate()?;
    let id = parse_id(&id)?;

    state.queries.get_user(id).await?;
    let user = state.queries.update_user(id, input.into_params()).await?;
    info!(user_id = id, "Updated user");
    Ok(ApiResponse::success(user))
}

/// DELETE /users/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.queries.delete_user(id).await?;
    info!(user_id = id, "Deleted user");
    Ok(ApiResponse::no_content())
}
