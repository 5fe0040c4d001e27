//! Client d'import YouTube
//!
//! Deux sources de métadonnées : l'API Data v3 quand une clé est
//! configurée (titre, durée, vignette), sinon le point oEmbed public qui
//! donne titre et vignette mais pas la durée. L'import d'une playlist
//! exige l'API Data, oEmbed ne sachant pas l'énumérer.

use crate::url::{classify_url, parse_iso8601_duration, UrlKind};
use crate::{Error, Result};
use boomstore::{category, LibraryStore, NewMediaFile};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const DATA_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const OEMBED_URL: &str = "https://www.youtube.com/oembed";

/// Bilan d'un import réussi
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub success: bool,
    #[serde(rename = "type")]
    pub import_type: String,
    pub count: usize,
}

/// Métadonnées d'une vidéo, quelle que soit la source
#[derive(Debug, Clone)]
struct VideoMeta {
    title: String,
    duration: Option<f64>,
    thumbnail: Option<String>,
}

// --- Formes de réponse de l'API Data v3 ---

#[derive(Debug, Deserialize)]
struct ApiList<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(rename = "nextPageToken", default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiVideo {
    snippet: ApiSnippet,
    #[serde(rename = "contentDetails")]
    content_details: ApiContentDetails,
}

#[derive(Debug, Deserialize)]
struct ApiPlaylist {
    snippet: ApiSnippet,
}

#[derive(Debug, Deserialize)]
struct ApiPlaylistItem {
    snippet: ApiSnippet,
    #[serde(rename = "contentDetails")]
    content_details: ApiPlaylistItemDetails,
}

#[derive(Debug, Deserialize)]
struct ApiSnippet {
    title: String,
    #[serde(default)]
    thumbnails: ApiThumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct ApiThumbnails {
    high: Option<ApiThumbnail>,
    default: Option<ApiThumbnail>,
}

impl ApiThumbnails {
    fn best(&self) -> Option<String> {
        self.high
            .as_ref()
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
    }
}

#[derive(Debug, Deserialize)]
struct ApiThumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ApiContentDetails {
    duration: String,
}

#[derive(Debug, Deserialize)]
struct ApiPlaylistItemDetails {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: String,
    thumbnail_url: Option<String>,
}

fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Construit l'enregistrement bibliothèque d'une vidéo isolée
fn video_record(video_id: &str, meta: &VideoMeta) -> NewMediaFile {
    NewMediaFile {
        path: watch_url(video_id),
        file_name: format!("yt-{}", video_id),
        title: Some(meta.title.clone()),
        category: Some(category::YOUTUBE.to_string()),
        duration: meta.duration,
        video_id: Some(video_id.to_string()),
        thumbnail: meta.thumbnail.clone(),
        ..NewMediaFile::default()
    }
}

/// Construit l'enregistrement d'un épisode de playlist (série, saison 1)
fn playlist_record(
    video_id: &str,
    meta: &VideoMeta,
    show_name: &str,
    episode: usize,
) -> NewMediaFile {
    NewMediaFile {
        category: Some(category::TV_SHOW.to_string()),
        show_name: Some(show_name.to_string()),
        season: Some("1".to_string()),
        episode: Some(episode.to_string()),
        ..video_record(video_id, meta)
    }
}

/// Client des points d'accès YouTube
pub struct TubeClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl TubeClient {
    /// Crée un client ; une clé vide vaut absence de clé
    pub fn new(api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: if api_key.is_empty() {
                None
            } else {
                Some(api_key.to_string())
            },
        }
    }

    /// Importe l'URL dans la bibliothèque (vidéo ou playlist)
    pub async fn import(&self, url: &str, store: &LibraryStore) -> Result<ImportOutcome> {
        match classify_url(url) {
            Some(UrlKind::Video(id)) => self.import_video(&id, store).await,
            Some(UrlKind::Playlist(id)) => self.import_playlist(&id, store).await,
            None => Err(Error::UnsupportedUrl(url.to_string())),
        }
    }

    async fn import_video(&self, video_id: &str, store: &LibraryStore) -> Result<ImportOutcome> {
        let meta = match &self.api_key {
            Some(key) => self.video_meta_from_api(video_id, key).await?,
            None => self.video_meta_from_oembed(video_id).await?,
        };

        store.add_media_file(video_record(video_id, &meta))?;
        info!(video_id, title = %meta.title, "Imported YouTube video");

        Ok(ImportOutcome {
            success: true,
            import_type: "video".to_string(),
            count: 1,
        })
    }

    async fn import_playlist(
        &self,
        playlist_id: &str,
        store: &LibraryStore,
    ) -> Result<ImportOutcome> {
        let key = self.api_key.as_ref().ok_or(Error::MissingApiKey)?;

        let playlist: ApiList<ApiPlaylist> = self
            .http
            .get(format!("{}/playlists", DATA_API_BASE))
            .query(&[("part", "snippet"), ("id", playlist_id), ("key", key)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let show_name = playlist
            .items
            .first()
            .map(|p| p.snippet.title.clone())
            .ok_or_else(|| Error::NotFound(playlist_id.to_string()))?;

        let entries = self.all_playlist_items(playlist_id, key).await?;

        let mut count = 0;
        for (index, entry) in entries.iter().enumerate() {
            let video_id = &entry.content_details.video_id;
            if video_id.is_empty() || entry.snippet.title.is_empty() {
                warn!(playlist_id, index, "Skipping playlist entry without id or title");
                continue;
            }
            let meta = match self.video_meta_from_api(video_id, key).await {
                Ok(meta) => meta,
                Err(e) => {
                    warn!(video_id, "Skipping playlist entry: {}", e);
                    continue;
                }
            };
            store.add_media_file(playlist_record(video_id, &meta, &show_name, index + 1))?;
            count += 1;
        }

        info!(playlist_id, show = %show_name, count, "Imported YouTube playlist");

        Ok(ImportOutcome {
            success: true,
            import_type: "playlist".to_string(),
            count,
        })
    }

    /// Énumère la playlist page par page jusqu'à épuisement du `nextPageToken`
    async fn all_playlist_items(
        &self,
        playlist_id: &str,
        key: &str,
    ) -> Result<Vec<ApiPlaylistItem>> {
        let mut entries = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(format!("{}/playlistItems", DATA_API_BASE))
                .query(&[
                    ("part", "snippet,contentDetails"),
                    ("playlistId", playlist_id),
                    ("maxResults", "50"),
                    ("key", key),
                ]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ApiList<ApiPlaylistItem> = request
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            entries.extend(page.items);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(entries)
    }

    async fn video_meta_from_api(&self, video_id: &str, key: &str) -> Result<VideoMeta> {
        let videos: ApiList<ApiVideo> = self
            .http
            .get(format!("{}/videos", DATA_API_BASE))
            .query(&[
                ("part", "snippet,contentDetails"),
                ("id", video_id),
                ("key", key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let video = videos
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(video_id.to_string()))?;

        Ok(VideoMeta {
            title: video.snippet.title,
            duration: parse_iso8601_duration(&video.content_details.duration),
            thumbnail: video.snippet.thumbnails.best(),
        })
    }

    async fn video_meta_from_oembed(&self, video_id: &str) -> Result<VideoMeta> {
        let response: OembedResponse = self
            .http
            .get(OEMBED_URL)
            .query(&[("url", watch_url(video_id).as_str()), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(VideoMeta {
            title: response.title,
            duration: None,
            thumbnail: response.thumbnail_url,
        })
    }
}
