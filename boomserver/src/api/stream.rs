//! Diffusion des fichiers média locaux et redirection des imports YouTube

use super::{map_status, map_store_error};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path as RoutePath, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use std::path::Path;
use tokio_util::io::ReaderStream;
use tracing::warn;

/// Type MIME déduit de l'extension du fichier
fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp4") => "video/mp4",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}

async fn serve_local_file(path_str: &str) -> Response {
    let path = Path::new(path_str);
    let file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), "Cannot open media file: {}", err);
            return map_status(
                StatusCode::NOT_FOUND,
                "FILE_NOT_FOUND",
                "Media file is no longer on disk",
            );
        }
    };

    let stream = ReaderStream::new(file);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type_for(path))],
        Body::from_stream(stream),
    )
        .into_response()
}

/// `GET /stream/{id}` : fichier local en flux, import YouTube en redirection
pub async fn stream_media(State(state): State<AppState>, RoutePath(id): RoutePath<i64>) -> Response {
    let media = match state.library.media_by_id(id) {
        Ok(media) => media,
        Err(err) => return map_store_error(err),
    };

    if media.is_remote() {
        return Redirect::temporary(&media.path).into_response();
    }

    serve_local_file(&media.path).await
}

/// `GET /media/{file_name}` : résolution par nom de fichier (URLs BomCast)
pub async fn stream_by_name(
    State(state): State<AppState>,
    RoutePath(file_name): RoutePath<String>,
) -> Response {
    // Le nom doit être un simple composant, pas un chemin
    if file_name.contains('/') || file_name.contains("..") {
        return map_status(StatusCode::BAD_REQUEST, "INVALID_NAME", "Invalid file name");
    }

    let files = match state.library.media_files() {
        Ok(files) => files,
        Err(err) => return map_store_error(err),
    };

    let media = files.iter().find(|m| {
        Path::new(&m.path)
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n == file_name)
            .unwrap_or(false)
    });

    match media {
        Some(media) if media.is_remote() => Redirect::temporary(&media.path).into_response(),
        Some(media) => serve_local_file(&media.path).await,
        None => map_status(
            StatusCode::NOT_FOUND,
            "MEDIA_NOT_FOUND",
            format!("No media named '{}'", file_name),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for(Path::new("/tv/a.mp4")), "video/mp4");
        assert_eq!(content_type_for(Path::new("/tv/a.MKV")), "video/x-matroska");
        assert_eq!(content_type_for(Path::new("/tv/a.webm")), "video/webm");
        assert_eq!(
            content_type_for(Path::new("/tv/a.bin")),
            "application/octet-stream"
        );
    }
}
