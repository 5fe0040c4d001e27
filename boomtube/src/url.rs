//! Classification des URL YouTube et analyse des durées ISO-8601

use once_cell::sync::Lazy;
use regex::Regex;

static PLAYLIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]list=([^#&?]+)").expect("invalid playlist regex"));
static VIDEO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\.be/|v=)([\w-]{11})").expect("invalid video regex"));
static ISO_DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("invalid duration regex")
});

/// Ce qu'une URL YouTube désigne
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlKind {
    /// Une playlist complète (l'id `list=` prime sur un éventuel id vidéo)
    Playlist(String),
    /// Une vidéo isolée
    Video(String),
}

/// Classe une URL YouTube en vidéo ou playlist
pub fn classify_url(url: &str) -> Option<UrlKind> {
    if let Some(caps) = PLAYLIST_RE.captures(url) {
        return Some(UrlKind::Playlist(caps[1].to_string()));
    }
    if let Some(caps) = VIDEO_RE.captures(url) {
        return Some(UrlKind::Video(caps[1].to_string()));
    }
    None
}

/// Convertit une durée ISO-8601 de l'API YouTube (`PT1H2M3S`) en secondes
pub fn parse_iso8601_duration(value: &str) -> Option<f64> {
    let caps = ISO_DURATION_RE.captures(value)?;
    let part = |i: usize| {
        caps.get(i)
            .map(|m| m.as_str().parse::<f64>().unwrap_or(0.0))
            .unwrap_or(0.0)
    };
    let seconds = part(1) * 3600.0 + part(2) * 60.0 + part(3);
    if seconds > 0.0 {
        Some(seconds)
    } else {
        None
    }
}
