//! # boomtube - Importateur YouTube
//!
//! Classe une URL collée par l'utilisateur (vidéo ou playlist), récupère
//! les métadonnées via l'API Data v3 ou, à défaut de clé, via oEmbed, et
//! insère les enregistrements correspondants dans la bibliothèque.

mod client;
mod error;
mod url;

pub use client::{ImportOutcome, TubeClient};
pub use error::{Error, Result};
pub use url::{classify_url, parse_iso8601_duration, UrlKind};
