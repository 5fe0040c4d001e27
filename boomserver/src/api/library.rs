//! Gestion des chemins de bibliothèque et du scan

use super::{map_status, map_store_error};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

#[derive(Debug, Deserialize)]
pub struct AddPathRequest {
    pub path: String,
}

pub async fn list_paths(State(state): State<AppState>) -> Response {
    match state.library.library_paths() {
        Ok(paths) => (StatusCode::OK, Json(paths)).into_response(),
        Err(err) => map_store_error(err),
    }
}

pub async fn add_path(
    State(state): State<AppState>,
    Json(req): Json<AddPathRequest>,
) -> Response {
    if req.path.trim().is_empty() {
        return map_status(
            StatusCode::BAD_REQUEST,
            "INVALID_PATH",
            "Library path cannot be empty",
        );
    }
    match state.library.add_library_path(req.path.trim()) {
        Ok(path) => (StatusCode::CREATED, Json(path)).into_response(),
        Err(err) => map_store_error(err),
    }
}

pub async fn delete_path(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.library.delete_library_path(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_store_error(err),
    }
}

/// Lance le scan en tâche de fond et répond immédiatement
pub async fn scan(State(state): State<AppState>) -> Response {
    let library = state.library.clone();
    let ffprobe = state.config.get_ffprobe_path().to_string_lossy().into_owned();

    tokio::spawn(async move {
        if let Err(err) = boomscan::run_scan(&library, &ffprobe).await {
            error!("Library scan failed: {}", err);
        }
    });

    (
        StatusCode::ACCEPTED,
        Json(json!({ "success": true, "message": "Scan started" })),
    )
        .into_response()
}

pub async fn purge(State(state): State<AppState>) -> Response {
    match state.library.purge_media() {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(err) => map_store_error(err),
    }
}
