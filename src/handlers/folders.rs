use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::app::AppState;
use crate::database::models::{Folder, FolderParams};
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::Field;

use super::utils::{decode_json, parse_id, require_non_empty};

/// Body accepted by POST /folders and PUT /folders/:id
#[derive(Debug, Deserialize)]
pub struct FolderInput {
    #[serde(default)]
    pub user_id: Field<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Field<String>,
    #[serde(default)]
    pub parent_folder_id: Field<i32>,
}

impl FolderInput {
    fn into_params(self) -> FolderParams {
        FolderParams {
            user_id: self.user_id.into_option(),
            name: self.name,
            description: self.description.into_option(),
            parent_folder_id: self.parent_folder_id.into_option(),
        }
    }
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Folder>> {
    let folders = state.queries.list_folders().await?;
    Ok(ApiResponse::success(folders))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<FolderInput>, JsonRejection>,
) -> ApiResult<Folder> {
    let input = decode_json(payload)?;
    require_non_empty("name", &input.name)?;

    let folder = state.queries.create_folder(input.into_params()).await?;
    info!(folder_id = folder.id, "Created folder");
    Ok(ApiResponse::created(folder))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Folder> {
    let id = parse_id(&id)?;
    let folder = state.queries.get_folder(id).await?;
    Ok(ApiResponse::success(folder))
}

/// PUT /folders/:id - Full replace. `user_id`, `description` and
/// `parent_folder_id` must be resent to be kept.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FolderInput>, JsonRejection>,
) -> ApiResult<Folder> {
    let input = decode_json(payload)?;
    require_non_empty("name", &input.name)?;
    let id = parse_id(&id)?;

    let current = state.queries.get_folder(id).await?;
    if input.parent_folder_id.is_absent() && current.parent_folder_id.is_some() {
        debug!(folder_id = id, "parent_folder_id omitted, clearing it");
    }

    let folder = state.queries.update_folder(id, input.into_params()).await?;
    info!(folder_id = id, "Updated folder");
    Ok(ApiResponse::success(folder))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.queries.delete_folder(id).await?;
    info!(folder_id = id, "Deleted folder");
    Ok(ApiResponse::no_content())
}
