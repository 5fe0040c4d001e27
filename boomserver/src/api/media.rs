//! Consultation et édition des fichiers média, import YouTube

use super::{map_status, map_store_error, map_tube_error};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boomstore::MediaFileUpdate;
use serde::Deserialize;
use serde_json::json;

pub async fn list(State(state): State<AppState>) -> Response {
    match state.library.media_files() {
        Ok(files) => (StatusCode::OK, Json(files)).into_response(),
        Err(err) => map_store_error(err),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<MediaFileUpdate>,
) -> Response {
    match state.library.update_media_file(id, patch) {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(err) => map_store_error(err),
    }
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.library.delete_media_file(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_store_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkCategoryRequest {
    pub ids: Vec<i64>,
    pub category: String,
}

pub async fn bulk_category(
    State(state): State<AppState>,
    Json(req): Json<BulkCategoryRequest>,
) -> Response {
    if req.category.trim().is_empty() {
        return map_status(
            StatusCode::BAD_REQUEST,
            "INVALID_CATEGORY",
            "Category cannot be empty",
        );
    }
    match state.library.bulk_update_category(&req.ids, req.category.trim()) {
        Ok(updated) => (
            StatusCode::OK,
            Json(json!({ "success": true, "updated": updated })),
        )
            .into_response(),
        Err(err) => map_store_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub url: String,
}

pub async fn import(State(state): State<AppState>, Json(req): Json<ImportRequest>) -> Response {
    match state.tube.import(&req.url, &state.library).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => map_tube_error(err),
    }
}
