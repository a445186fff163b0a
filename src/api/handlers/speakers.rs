//! Handlers for the read-only speakers surface.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::speaker::SpeakerResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all speakers.
///
/// # Endpoint
///
/// `GET /api/speakers`
pub async fn list_speakers_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpeakerResponse>>, AppError> {
    let repo = state.repositories.repository();

    let speakers = repo
        .get_all_speakers()
        .await
        .map_err(|e| e.masked_internal("Failed to get speakers"))?;

    Ok(Json(
        speakers.into_iter().map(SpeakerResponse::from).collect(),
    ))
}

/// Lists the speakers with a talk in the given camp.
///
/// # Endpoint
///
/// `GET /api/camps/{moniker}/speakers`
pub async fn camp_speakers_handler(
    State(state): State<AppState>,
    Path(moniker): Path<String>,
) -> Result<Json<Vec<SpeakerResponse>>, AppError> {
    let repo = state.repositories.repository();

    let speakers = repo
        .get_speakers_by_moniker(&moniker)
        .await
        .map_err(|e| e.masked_internal("Failed to get speakers"))?;

    Ok(Json(
        speakers.into_iter().map(SpeakerResponse::from).collect(),
    ))
}

/// Fetches one speaker by id.
///
/// # Endpoint
///
/// `GET /api/speakers/{id}`
///
/// A non-integer id does not address a speaker and maps to 404.
pub async fn get_speaker_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SpeakerResponse>, AppError> {
    let id: i32 = id
        .parse()
        .map_err(|_| AppError::not_found("Resource not found", json!({ "id": id })))?;

    let repo = state.repositories.repository();

    let speaker = repo
        .get_speaker(id)
        .await
        .map_err(|e| e.masked_internal("Failed to get speaker"))?
        .ok_or_else(|| AppError::not_found("Could not find the speaker", json!({ "id": id })))?;

    Ok(Json(speaker.into()))
}
