//! Handlers for the camps resource under `api/camps`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::api::dto::camp::{CampResponse, CreateCampRequest, UpdateCampRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Query parameters shared by camp read endpoints.
#[derive(Debug, Deserialize)]
pub struct CampsQuery {
    #[serde(default)]
    pub include_talks: bool,
}

/// Query parameters for `GET /api/camps/search`.
#[derive(Debug, Deserialize)]
pub struct CampSearchQuery {
    /// Calendar date of the event, `YYYY-MM-DD`.
    pub date: NaiveDate,
    #[serde(default)]
    pub include_talks: bool,
}

/// Lists all camps.
///
/// # Endpoint
///
/// `GET /api/camps?include_talks=`
pub async fn list_camps_handler(
    State(state): State<AppState>,
    Query(query): Query<CampsQuery>,
) -> Result<Json<Vec<CampResponse>>, AppError> {
    let repo = state.repositories.repository();

    let camps = repo
        .get_all_camps(query.include_talks)
        .await
        .map_err(|e| e.masked_internal("Failed to get camps"))?;

    Ok(Json(camps.into_iter().map(CampResponse::from).collect()))
}

/// Fetches one camp by moniker.
///
/// # Endpoint
///
/// `GET /api/camps/{moniker}?include_talks=`
pub async fn get_camp_handler(
    State(state): State<AppState>,
    Path(moniker): Path<String>,
    Query(query): Query<CampsQuery>,
) -> Result<Json<CampResponse>, AppError> {
    let repo = state.repositories.repository();

    let camp = repo
        .get_camp(&moniker, query.include_talks)
        .await
        .map_err(|e| e.masked_internal("Failed to get camp"))?
        .ok_or_else(|| {
            AppError::not_found("Could not find the camp", json!({ "moniker": moniker }))
        })?;

    Ok(Json(camp.into()))
}

/// Searches camps by event date.
///
/// # Endpoint
///
/// `GET /api/camps/search?date=YYYY-MM-DD&include_talks=`
///
/// An empty result is 404, not an empty collection.
pub async fn search_camps_handler(
    State(state): State<AppState>,
    Query(query): Query<CampSearchQuery>,
) -> Result<Json<Vec<CampResponse>>, AppError> {
    let repo = state.repositories.repository();

    let camps = repo
        .get_camps_by_event_date(query.date, query.include_talks)
        .await
        .map_err(|e| e.masked_internal("Failed to search camps"))?;

    if camps.is_empty() {
        return Err(AppError::not_found(
            "No camps found for that date",
            json!({ "date": query.date }),
        ));
    }

    Ok(Json(camps.into_iter().map(CampResponse::from).collect()))
}

/// Creates a camp.
///
/// # Endpoint
///
/// `POST /api/camps`
///
/// # Errors
///
/// Returns 400 Bad Request when the moniker is already in use or the commit
/// reports no effect. On success returns 201 Created with a `Location`
/// header resolving to the camp's Get endpoint.
pub async fn create_camp_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCampRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let repo = state.repositories.repository();

    let existing = repo
        .get_camp(&payload.moniker, false)
        .await
        .map_err(|e| e.masked_internal("Failed to create camp"))?;
    if existing.is_some() {
        return Err(AppError::bad_request(
            "Moniker already in use",
            json!({ "moniker": payload.moniker }),
        ));
    }

    let new_camp = payload.into_new_camp();
    let location = state.links.camp_location(&new_camp.moniker);

    repo.add_camp(new_camp.clone());

    let committed = repo
        .save_changes()
        .await
        .map_err(|e| e.masked_internal("Failed to create camp"))?;
    if !committed {
        return Err(AppError::commit_failed("Failed to save new camp", json!({})));
    }

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CampResponse::from(new_camp)),
    ))
}

/// Partially updates a camp.
///
/// # Endpoint
///
/// `PUT /api/camps/{moniker}`
///
/// Absent or `null` fields leave stored values untouched; the moniker
/// itself is not updatable.
pub async fn update_camp_handler(
    State(state): State<AppState>,
    Path(moniker): Path<String>,
    Json(payload): Json<UpdateCampRequest>,
) -> Result<Json<CampResponse>, AppError> {
    payload.validate()?;

    let repo = state.repositories.repository();

    let mut camp = repo
        .get_camp(&moniker, false)
        .await
        .map_err(|e| e.masked_internal("Failed to update camp"))?
        .ok_or_else(|| {
            AppError::not_found("Could not find the camp", json!({ "moniker": moniker }))
        })?;

    camp.apply(payload.into_patch());
    repo.update_camp(camp.clone());

    let committed = repo
        .save_changes()
        .await
        .map_err(|e| e.masked_internal("Failed to update camp"))?;
    if !committed {
        return Err(AppError::commit_failed("Failed to update database", json!({})));
    }

    Ok(Json(camp.into()))
}

/// Deletes a camp and the talks it owns.
///
/// # Endpoint
///
/// `DELETE /api/camps/{moniker}`
pub async fn delete_camp_handler(
    State(state): State<AppState>,
    Path(moniker): Path<String>,
) -> Result<StatusCode, AppError> {
    let repo = state.repositories.repository();

    let camp = repo
        .get_camp(&moniker, false)
        .await
        .map_err(|e| e.masked_internal("Failed to delete camp"))?
        .ok_or_else(|| {
            AppError::not_found(
                "Could not find the camp to delete",
                json!({ "moniker": moniker }),
            )
        })?;

    repo.delete_camp(camp);

    let committed = repo
        .save_changes()
        .await
        .map_err(|e| e.masked_internal("Failed to delete camp"))?;
    if !committed {
        return Err(AppError::commit_failed("Failed to delete the camp", json!({})));
    }

    Ok(StatusCode::OK)
}
