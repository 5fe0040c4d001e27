//! Gestion des chaînes et de leur programmation

use super::{map_status, map_store_error};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boomstore::{ChannelUpdate, MediaFile, NewChannel};
use serde::Deserialize;
use serde_json::json;

pub async fn list(State(state): State<AppState>) -> Response {
    match state.library.channels() {
        Ok(channels) => (StatusCode::OK, Json(channels)).into_response(),
        Err(err) => map_store_error(err),
    }
}

pub async fn create(State(state): State<AppState>, Json(req): Json<NewChannel>) -> Response {
    if req.name.trim().is_empty() {
        return map_status(
            StatusCode::BAD_REQUEST,
            "INVALID_NAME",
            "Channel name cannot be empty",
        );
    }
    match state.library.add_channel(req) {
        Ok(channel) => (StatusCode::CREATED, Json(channel)).into_response(),
        Err(err) => map_store_error(err),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ChannelUpdate>,
) -> Response {
    match state.library.update_channel(id, patch) {
        Ok(channel) => (StatusCode::OK, Json(channel)).into_response(),
        Err(err) => map_store_error(err),
    }
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.library.delete_channel(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_store_error(err),
    }
}

/// Remplace toute la programmation d'une chaîne (dernier écrit gagne)
pub async fn replace_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(schedule): Json<Vec<MediaFile>>,
) -> Response {
    match state.library.replace_schedule(id, &schedule) {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(err) => map_store_error(err),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToScheduleRequest {
    pub media_id: i64,
}

pub async fn add_to_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AddToScheduleRequest>,
) -> Response {
    match state.library.add_media_to_schedule(id, req.media_id) {
        Ok(media) => (StatusCode::CREATED, Json(media)).into_response(),
        Err(err) => map_store_error(err),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddManyRequest {
    pub media_ids: Vec<i64>,
}

pub async fn add_many(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AddManyRequest>,
) -> Response {
    match state.library.add_many_to_schedule(id, &req.media_ids) {
        Ok(added) => (
            StatusCode::OK,
            Json(json!({ "success": true, "added": added })),
        )
            .into_response(),
        Err(err) => map_store_error(err),
    }
}
