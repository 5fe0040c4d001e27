//! Routes BomCast : planning, réglages publicitaires, génération

use super::{map_cast_error, map_store_error};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use boomcast::{
    pack, render_epg, render_m3u, write_artifact, AdOptionsUpdate, NewScheduledItem, Segment,
    ScheduledItemUpdate, MAIN_CHANNEL,
};
use boomstore::MediaFile;
use chrono::{NaiveTime, Utc};
use serde_json::json;
use std::collections::HashMap;

pub async fn schedule(State(state): State<AppState>) -> Response {
    match state.cast.schedule() {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(err) => map_cast_error(err),
    }
}

pub async fn add_item(
    State(state): State<AppState>,
    Json(req): Json<NewScheduledItem>,
) -> Response {
    match state.cast.add_item(req) {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(err) => map_cast_error(err),
    }
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ScheduledItemUpdate>,
) -> Response {
    match state.cast.update_item(id, patch) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(err) => map_cast_error(err),
    }
}

pub async fn remove_item(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.cast.remove_item(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_cast_error(err),
    }
}

pub async fn clear(State(state): State<AppState>) -> Response {
    match state.cast.clear() {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(err) => map_cast_error(err),
    }
}

pub async fn shuffle(State(state): State<AppState>) -> Response {
    match state.cast.shuffle() {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(err) => map_cast_error(err),
    }
}

pub async fn ad_options(State(state): State<AppState>) -> Response {
    match state.cast.ad_options() {
        Ok(options) => (StatusCode::OK, Json(options)).into_response(),
        Err(err) => map_cast_error(err),
    }
}

pub async fn update_ad_options(
    State(state): State<AppState>,
    Json(patch): Json<AdOptionsUpdate>,
) -> Response {
    match state.cast.update_ad_options(patch) {
        Ok(options) => (StatusCode::OK, Json(options)).into_response(),
        Err(err) => map_cast_error(err),
    }
}

/// Une passe de pack sur l'état courant du planning
fn pack_current(state: &AppState) -> Result<Vec<Segment>, Response> {
    let main = state
        .cast
        .items_for_channel(MAIN_CHANNEL)
        .map_err(map_cast_error)?;
    let ads = state.cast.ad_track().map_err(map_cast_error)?;
    let options = state.cast.ad_options().map_err(map_cast_error)?;
    let ceiling = state.config.get_max_generate_duration();

    Ok(pack(&main, &ads, &options, ceiling))
}

fn media_index(state: &AppState) -> Result<HashMap<i64, MediaFile>, Response> {
    let files = state.library.media_files().map_err(map_store_error)?;
    Ok(files.into_iter().map(|m| (m.id, m)).collect())
}

pub async fn generate_m3u(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let segments = match pack_current(&state) {
        Ok(segments) => segments,
        Err(response) => return response,
    };
    let index = match media_index(&state) {
        Ok(index) => index,
        Err(response) => return response,
    };
    let options = match state.cast.ad_options() {
        Ok(options) => options,
        Err(err) => return map_cast_error(err),
    };

    let m3u = render_m3u(&segments, &index, &options.public_stream_base_url);
    let file_name = match write_artifact(&state.bomcast_dir, "bomcast_playlist", "m3u", &m3u) {
        Ok(name) => name,
        Err(err) => return map_cast_error(err),
    };

    let settings = match state.library.settings() {
        Ok(settings) => settings,
        Err(err) => return map_store_error(err),
    };
    let base = super::resolve_base_url(&settings.public_url_base, &headers);

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "url": format!("{}/bomcast/{}", base, file_name),
        })),
    )
        .into_response()
}

pub async fn generate_epg(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let segments = match pack_current(&state) {
        Ok(segments) => segments,
        Err(response) => return response,
    };

    let day_start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let xml = render_epg(&segments, day_start);
    let file_name = match write_artifact(&state.bomcast_dir, "bomcast_epg", "xml", &xml) {
        Ok(name) => name,
        Err(err) => return map_cast_error(err),
    };

    let settings = match state.library.settings() {
        Ok(settings) => settings,
        Err(err) => return map_store_error(err),
    };
    let base = super::resolve_base_url(&settings.public_url_base, &headers);

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "url": format!("{}/bomcast/{}", base, file_name),
        })),
    )
        .into_response()
}
