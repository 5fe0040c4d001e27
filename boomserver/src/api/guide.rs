//! Rendus M3U et XMLTV des chaînes BoomServer
//!
//! Chaque requête matérialise la programmation à la volée : la publicité
//! tirée change d'un rendu à l'autre, la programmation de base non.

use super::map_store_error;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use boomschedule::{materialize, render_channel_m3u, render_guide, GuideChannel, RandomPicker};
use chrono::{NaiveTime, Utc};

fn today_midnight() -> chrono::DateTime<Utc> {
    Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc()
}

pub async fn channel_m3u(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let channel = match state.library.channel_by_id(id) {
        Ok(channel) => channel,
        Err(err) => return map_store_error(err),
    };
    let pool = match state.library.ad_pool() {
        Ok(pool) => pool,
        Err(err) => return map_store_error(err),
    };
    let settings = match state.library.settings() {
        Ok(settings) => settings,
        Err(err) => return map_store_error(err),
    };

    let base_url = super::resolve_base_url(&settings.public_url_base, &headers);
    let mut picker = RandomPicker;
    let schedule = materialize(&channel.schedule, &channel.ad_settings, &pool, &mut picker);
    let m3u = render_channel_m3u(&channel, &schedule, &base_url);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/x-mpegurl")],
        m3u,
    )
        .into_response()
}

pub async fn guide_xml(State(state): State<AppState>) -> Response {
    let channels = match state.library.channels() {
        Ok(channels) => channels,
        Err(err) => return map_store_error(err),
    };
    let pool = match state.library.ad_pool() {
        Ok(pool) => pool,
        Err(err) => return map_store_error(err),
    };

    let mut picker = RandomPicker;
    let entries: Vec<GuideChannel<'_>> = channels
        .iter()
        .map(|channel| GuideChannel {
            channel,
            schedule: materialize(&channel.schedule, &channel.ad_settings, &pool, &mut picker),
        })
        .collect();

    let xml = render_guide(&entries, today_midnight());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        xml,
    )
        .into_response()
}
