//! API REST de BoomServer
//!
//! Toutes les routes JSON sous `/api`, plus les points de diffusion
//! (`/stream`, `/media`) et le service statique des artefacts BomCast.

pub mod cast;
pub mod channels;
pub mod guide;
pub mod library;
pub mod media;
pub mod settings;
pub mod stream;

use crate::state::AppState;
use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;

/// Router complet de l'application
pub fn router(state: AppState) -> Router {
    let artifacts = ServeDir::new(&state.bomcast_dir);

    Router::new()
        .route(
            "/api/library/paths",
            get(library::list_paths).post(library::add_path),
        )
        .route("/api/library/paths/{id}", delete(library::delete_path))
        .route("/api/library/scan", post(library::scan))
        .route("/api/library/purge", delete(library::purge))
        .route("/api/media", get(media::list))
        .route("/api/media/{id}", put(media::update).delete(media::remove))
        .route("/api/media/bulk-category", post(media::bulk_category))
        .route("/api/media/import", post(media::import))
        .route("/api/channels", get(channels::list).post(channels::create))
        .route(
            "/api/channels/{id}",
            put(channels::update).delete(channels::remove),
        )
        .route(
            "/api/channels/{id}/schedule",
            put(channels::replace_schedule).post(channels::add_to_schedule),
        )
        .route("/api/channels/{id}/schedule/bulk", post(channels::add_many))
        .route("/api/channels/{id}/m3u", get(guide::channel_m3u))
        .route("/api/guide.xml", get(guide::guide_xml))
        .route(
            "/api/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route(
            "/api/bomcast/schedule",
            get(cast::schedule)
                .post(cast::add_item)
                .delete(cast::clear),
        )
        .route(
            "/api/bomcast/schedule/{id}",
            put(cast::update_item).delete(cast::remove_item),
        )
        .route("/api/bomcast/shuffle", post(cast::shuffle))
        .route(
            "/api/bomcast/ad-options",
            get(cast::ad_options).put(cast::update_ad_options),
        )
        .route("/api/bomcast/generate/m3u", post(cast::generate_m3u))
        .route("/api/bomcast/generate/epg", post(cast::generate_epg))
        .route("/stream/{id}", get(stream::stream_media))
        .route("/media/{file_name}", get(stream::stream_by_name))
        .nest_service("/bomcast", artifacts)
        .with_state(state)
}

/// Réponse d'erreur REST générique
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub(crate) fn map_status<S: Into<String>>(status: StatusCode, error: &str, message: S) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
        }),
    )
        .into_response()
}

pub(crate) fn map_store_error(error: boomstore::Error) -> Response {
    let status = match error {
        boomstore::Error::MediaNotFound(_)
        | boomstore::Error::ChannelNotFound(_)
        | boomstore::Error::LibraryPathNotFound(_) => StatusCode::NOT_FOUND,
        boomstore::Error::Store(_) | boomstore::Error::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: format!("{:?}", error),
            message: error.to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn map_cast_error(error: boomcast::Error) -> Response {
    let status = match error {
        boomcast::Error::ItemNotFound(_) => StatusCode::NOT_FOUND,
        boomcast::Error::Store(_) | boomcast::Error::Artifact(_) | boomcast::Error::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: format!("{:?}", error),
            message: error.to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn map_tube_error(error: boomtube::Error) -> Response {
    let status = match error {
        boomtube::Error::UnsupportedUrl(_) | boomtube::Error::MissingApiKey => {
            StatusCode::BAD_REQUEST
        }
        boomtube::Error::NotFound(_) => StatusCode::NOT_FOUND,
        boomtube::Error::Http(_) => StatusCode::BAD_GATEWAY,
        boomtube::Error::Store(_) | boomtube::Error::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: format!("{:?}", error),
            message: error.to_string(),
        }),
    )
        .into_response()
}

/// URL publique de base servant à construire les liens des playlists
///
/// Le réglage `publicUrlBase` prime ; à défaut l'hôte de la requête fait
/// foi (`x-forwarded-host` derrière un proxy, sinon `host`).
pub(crate) fn resolve_base_url(configured: &str, headers: &HeaderMap) -> String {
    if !configured.trim().is_empty() {
        return configured.trim().trim_end_matches('/').to_string();
    }

    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get("host"))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("http://{}", host)
}
