//! Handlers for the talks resource under `api/camps/{moniker}/talks`.
//!
//! Every persistence failure path is a terminal response; nothing is
//! retried. Unexpected storage failures surface as a fixed, per-endpoint
//! 500 message via [`AppError::masked_internal`].

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::talk::{CreateTalkRequest, TalkResponse, UpdateTalkRequest};
use crate::domain::entities::NewTalk;
use crate::error::AppError;
use crate::state::AppState;

/// Talk ids are integer-constrained at the routing layer: a non-integer id
/// segment does not address a talk at all, so it maps to 404 rather than a
/// validation error.
fn parse_talk_id(raw: &str) -> Result<i32, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found("Resource not found", json!({ "id": raw })))
}

/// Lists all talks for a camp, with speaker data.
///
/// # Endpoint
///
/// `GET /api/camps/{moniker}/talks`
///
/// An unknown moniker yields an empty collection.
pub async fn list_talks_handler(
    State(state): State<AppState>,
    Path(moniker): Path<String>,
) -> Result<Json<Vec<TalkResponse>>, AppError> {
    let repo = state.repositories.repository();

    let talks = repo
        .get_talks_by_moniker(&moniker, true)
        .await
        .map_err(|e| e.masked_internal("Failed to get talks"))?;

    Ok(Json(talks.into_iter().map(TalkResponse::from).collect()))
}

/// Fetches a single talk by `(moniker, id)`.
///
/// # Endpoint
///
/// `GET /api/camps/{moniker}/talks/{id}`
pub async fn get_talk_handler(
    State(state): State<AppState>,
    Path((moniker, id)): Path<(String, String)>,
) -> Result<Json<TalkResponse>, AppError> {
    let id = parse_talk_id(&id)?;
    let repo = state.repositories.repository();

    let talk = repo
        .get_talk_by_moniker(&moniker, id, true)
        .await
        .map_err(|e| e.masked_internal("Failed to get talks"))?
        .ok_or_else(|| {
            AppError::not_found(
                "Could not find the talk",
                json!({ "moniker": moniker, "id": id }),
            )
        })?;

    Ok(Json(talk.into()))
}

/// Creates a talk under a camp.
///
/// # Endpoint
///
/// `POST /api/camps/{moniker}/talks`
///
/// # Errors
///
/// Returns 400 Bad Request when the camp does not resolve, the payload
/// carries no speaker id, the speaker does not resolve, or the commit
/// reports no effect. On success returns 201 Created with a `Location`
/// header resolving to the new talk's Get endpoint.
pub async fn create_talk_handler(
    State(state): State<AppState>,
    Path(moniker): Path<String>,
    Json(payload): Json<CreateTalkRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let repo = state.repositories.repository();

    let camp = repo
        .get_camp(&moniker, false)
        .await
        .map_err(|e| e.masked_internal("Failed to create talk"))?
        .ok_or_else(|| {
            AppError::bad_request("Camp does not exist", json!({ "moniker": moniker }))
        })?;

    let speaker_id = payload
        .speaker
        .as_ref()
        .and_then(|s| s.id)
        .ok_or_else(|| AppError::bad_request("Speaker id is required", json!({})))?;

    let speaker = repo
        .get_speaker(speaker_id)
        .await
        .map_err(|e| e.masked_internal("Failed to create talk"))?
        .ok_or_else(|| {
            AppError::bad_request(
                "Speaker could not be found",
                json!({ "speaker_id": speaker_id }),
            )
        })?;

    let staged = repo.add_talk(NewTalk {
        camp_id: camp.id,
        speaker_id: speaker.id,
        title: payload.title,
        abstract_text: payload.abstract_text,
        level: payload.level,
    });

    let committed = repo
        .save_changes()
        .await
        .map_err(|e| e.masked_internal("Failed to create talk"))?;
    if !committed {
        return Err(AppError::commit_failed("Failed to save new talk", json!({})));
    }

    let mut talk = staged
        .created()
        .ok_or_else(|| AppError::internal("Failed to create talk", json!({})))?;
    talk.speaker = Some(speaker);

    let location = state.links.talk_location(&moniker, talk.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TalkResponse::from(talk)),
    ))
}

/// Partially updates a talk.
///
/// # Endpoint
///
/// `PUT /api/camps/{moniker}/talks/{id}`
///
/// # Overlay semantics
///
/// Absent or `null` fields leave stored values untouched. A supplied
/// speaker id is re-resolved and reattached; one that does not resolve is
/// silently ignored and the existing speaker stays.
pub async fn update_talk_handler(
    State(state): State<AppState>,
    Path((moniker, id)): Path<(String, String)>,
    Json(payload): Json<UpdateTalkRequest>,
) -> Result<Json<TalkResponse>, AppError> {
    payload.validate()?;
    let id = parse_talk_id(&id)?;

    let repo = state.repositories.repository();

    let mut talk = repo
        .get_talk_by_moniker(&moniker, id, true)
        .await
        .map_err(|e| e.masked_internal("Failed to update talk"))?
        .ok_or_else(|| {
            AppError::not_found(
                "Could not find the talk",
                json!({ "moniker": moniker, "id": id }),
            )
        })?;

    let speaker_id = payload.speaker.as_ref().and_then(|s| s.id);
    talk.apply(payload.into_patch());

    if let Some(speaker_id) = speaker_id
        && let Some(speaker) = repo
            .get_speaker(speaker_id)
            .await
            .map_err(|e| e.masked_internal("Failed to update talk"))?
    {
        talk.reassign_speaker(speaker);
    }

    repo.update_talk(talk.clone());

    let committed = repo
        .save_changes()
        .await
        .map_err(|e| e.masked_internal("Failed to update talk"))?;
    if !committed {
        return Err(AppError::commit_failed("Failed to update database", json!({})));
    }

    Ok(Json(talk.into()))
}

/// Deletes a talk.
///
/// # Endpoint
///
/// `DELETE /api/camps/{moniker}/talks/{id}`
///
/// A located talk whose commit reports no effect yields 400, a distinct
/// outcome from the 404 of a talk that never resolved.
pub async fn delete_talk_handler(
    State(state): State<AppState>,
    Path((moniker, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let id = parse_talk_id(&id)?;
    let repo = state.repositories.repository();

    let talk = repo
        .get_talk_by_moniker(&moniker, id, false)
        .await
        .map_err(|e| e.masked_internal("Database failure"))?
        .ok_or_else(|| {
            AppError::not_found(
                "Could not find the talk to delete",
                json!({ "moniker": moniker, "id": id }),
            )
        })?;

    repo.delete_talk(talk);

    let committed = repo
        .save_changes()
        .await
        .map_err(|e| e.masked_internal("Database failure"))?;
    if !committed {
        return Err(AppError::commit_failed("Failed to delete the talk", json!({})));
    }

    Ok(StatusCode::OK)
}
