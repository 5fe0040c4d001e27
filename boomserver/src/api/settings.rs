//! Réglages globaux exposés à l'interface

use super::map_store_error;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boomstore::Settings;

pub async fn get_settings(State(state): State<AppState>) -> Response {
    match state.library.settings() {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(err) => map_store_error(err),
    }
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Response {
    match state.library.update_settings(&settings) {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(err) => map_store_error(err),
    }
}
