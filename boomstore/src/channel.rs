//! Modèle des chaînes et de leur politique de coupures publicitaires

use crate::media::MediaFile;
use serde::{Deserialize, Deserializer, Serialize};

/// Règle de déclenchement des coupures publicitaires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdRule {
    #[serde(rename = "programCount")]
    ProgramCount,
    #[serde(rename = "timedInterval")]
    TimedInterval,
}

/// Politique d'insertion publicitaire d'une chaîne
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSettings {
    pub active: bool,
    pub rule: AdRule,
    pub programs_per_ad: u32,
    pub ad_count: u32,
    pub interval_minutes: u32,
}

impl Default for AdSettings {
    fn default() -> Self {
        Self {
            active: false,
            rule: AdRule::ProgramCount,
            programs_per_ad: 3,
            ad_count: 1,
            interval_minutes: 30,
        }
    }
}

/// Une ligne de diffusion logique
///
/// `schedule` contient des copies des médias au moment de leur ajout
/// (instantanés, pas des références) : une édition ultérieure du média
/// canonique ne modifie pas les entrées déjà placées.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub number: i64,
    pub thumbnail: Option<String>,
    pub m3u_file_name: String,
    pub schedule: Vec<MediaFile>,
    pub ad_settings: AdSettings,
}

/// Données de création d'une chaîne
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChannel {
    pub name: String,
    pub number: i64,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Patch d'édition d'une chaîne (champs fournis seulement)
///
/// `thumbnail` distingue trois cas sur le fil : champ absent (inchangé),
/// `null` explicite (vignette effacée), chaîne (vignette remplacée).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelUpdate {
    pub name: Option<String>,
    pub number: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub thumbnail: Option<Option<String>>,
    pub ad_settings: Option<AdSettings>,
    pub m3u_file_name: Option<String>,
}

/// Un champ présent, même `null`, devient `Some(...)` ; absent reste `None`
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Dérive le nom de fichier M3U d'une chaîne
///
/// Tout caractère non alphanumérique devient `_`.
pub fn m3u_file_name(channel_name: &str) -> String {
    let sanitized: String = channel_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}.m3u", sanitized)
}
