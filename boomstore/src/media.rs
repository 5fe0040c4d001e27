//! Modèle des fichiers média de la bibliothèque

use serde::{Deserialize, Serialize};

/// Catégories connues (la colonne reste une chaîne libre)
pub mod category {
    pub const UNCATEGORIZED: &str = "Uncategorized";
    pub const TV_SHOW: &str = "TV Show";
    pub const AD_BUMP: &str = "Ad Bump";
    pub const MOVIE: &str = "Movie";
    pub const YOUTUBE: &str = "YouTube";
}

/// Un élément jouable de la bibliothèque
///
/// `path` est soit un chemin local, soit une URL distante (import YouTube).
/// La durée est absente tant que le probe n'a pas abouti.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub id: i64,
    pub path: String,
    pub file_name: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub show_name: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub episode: String,
    pub duration: Option<f64>,
    pub video_id: Option<String>,
    pub thumbnail: Option<String>,
}

fn default_category() -> String {
    category::UNCATEGORIZED.to_string()
}

impl MediaFile {
    /// Vrai si l'élément provient d'un import YouTube
    pub fn is_remote(&self) -> bool {
        self.video_id.is_some()
    }
}

/// Données d'un média à insérer (l'id est attribué par le magasin)
///
/// Les champs optionnels reçoivent leurs défauts à l'insertion :
/// titre = nom de fichier, catégorie = `Uncategorized`, le reste vide.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaFile {
    pub path: String,
    pub file_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub show_name: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub episode: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Patch d'édition utilisateur (métadonnées seulement)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFileUpdate {
    pub title: String,
    pub summary: String,
    pub category: String,
    pub show_name: String,
    pub season: String,
    pub episode: String,
}
