//! Handlers for the note endpoints.
//!
//! # Responsibility
//! - Decode request bodies and credentials.
//! - Call the delivery service and shape its results into wire JSON.
//!
//! # See also
//! - docs/architecture/wire-contract.md

use crate::auth::BearerToken;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::info;
use pong_core::Note;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of `POST /pong`.
#[derive(Debug, Deserialize)]
pub struct SendNoteRequest {
    pub to_user: String,
    pub message: String,
    pub token: String,
}

/// One delivered note in the `GET /pongs` response.
#[derive(Debug, Serialize)]
pub struct NoteView {
    pub from_user: String,
    pub message: String,
    pub created_at: i64,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        Self {
            from_user: note.sender,
            message: note.body,
            created_at: note.created_at,
        }
    }
}

/// `POST /pong`: leave a note for a recipient, replacing any unread
/// note from the same sender.
pub async fn send_note(
    State(state): State<AppState>,
    payload: Result<Json<SendNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(request) = payload?;

    state
        .delivery
        .send(&request.token, &request.to_user, &request.message)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "status": "sent" }))))
}

/// `GET /pongs`: drain the caller's inbox, newest first.
pub async fn fetch_notes(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Vec<NoteView>>, ApiError> {
    let notes = state.delivery.fetch(&token).await?;
    Ok(Json(notes.into_iter().map(NoteView::from).collect()))
}

/// `POST /clear`: purge notes older than the retention window now
/// instead of waiting for the next sweep.
pub async fn clear_old_notes(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let cleared = state.delivery.clear_old(state.retention)?;
    info!("event=manual_purge module=server status=ok cleared={cleared}");
    Ok(Json(json!({ "cleared": cleared })))
}
