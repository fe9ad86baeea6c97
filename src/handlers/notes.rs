use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::app::AppState;
use crate::database::models::{Note, NoteParams};
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::Field;

use super::utils::{decode_json, parse_id, require_non_empty};

/// Body accepted by POST /notes and PUT /notes/:id
#[derive(Debug, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Field<String>,
    #[serde(default)]
    pub folder_id: Field<i32>,
}

impl NoteInput {
    fn into_params(self) -> NoteParams {
        NoteParams {
            title: self.title,
            body: self.body.into_option(),
            folder_id: self.folder_id.into_option(),
        }
    }
}

/// GET /notes - List all notes
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Note>> {
    let notes = state.queries.list_notes().await?;
    Ok(ApiResponse::success(notes))
}

/// POST /notes - Create a note
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> ApiResult<Note> {
    let input = decode_json(payload)?;
    require_non_empty("title", &input.title)?;

    let note = state.queries.create_note(input.into_params()).await?;
    info!(note_id = note.id, "Created note");
    Ok(ApiResponse::created(note))
}

/// GET /notes/:id - Get a single note
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Note> {
    let id = parse_id(&id)?;
    let note = state.queries.get_note(id).await?;
    Ok(ApiResponse::success(note))
}

/// PUT /notes/:id - Replace a note; omitted optional fields become null
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> ApiResult<Note> {
    let input = decode_json(payload)?;
    require_non_empty("title", &input.title)?;
    let id = parse_id(&id)?;

    state.queries.get_note(id).await?;
    let note = state.queries.update_note(id, input.into_params()).await?;
    info!(note_id = id, "Updated note");
    Ok(ApiResponse::success(note))
}

/// DELETE /notes/:id - Delete a note; missing ids are not an error
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.queries.delete_note(id).await?;
    info!(note_id = id, "Deleted note");
    Ok(ApiResponse::no_content())
}
