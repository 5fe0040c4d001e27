//! Modèle du planning linéaire BomCast

use serde::{Deserialize, Serialize};

/// Identifiant du canal logique principal
pub const MAIN_CHANNEL: &str = "main";
/// Identifiant du canal logique des publicités
pub const ADS_CHANNEL: &str = "ads";

/// Un canal logique du planning (partition d'items)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastChannel {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Un élément placé sur la ligne de temps d'un canal
///
/// Au sein d'un canal, les items restent contigus et sans chevauchement :
/// la passe de recalcul réécrit `start_time`/`end_time` après chaque
/// mutation (voir `CastStore::recalculate_channel`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledItem {
    pub id: i64,
    pub channel_id: String,
    pub media_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub item_type: String,
    pub duration: f64,
    pub start_time: f64,
    pub end_time: f64,
}

/// Données d'un item à placer (les horaires sont calculés par le magasin)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduledItem {
    pub channel_id: String,
    pub media_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub item_type: String,
    pub duration: f64,
}

/// Patch d'un item planifié (champs fournis seulement)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledItemUpdate {
    pub channel_id: Option<String>,
    pub media_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub duration: Option<f64>,
    pub start_time: Option<f64>,
}

/// Réglages publicitaires globaux de BomCast
///
/// `frequency` et `duration` sont en secondes. Contrairement à la politique
/// par chaîne de BoomServer, ces réglages pilotent le packer : ils sont
/// passés explicitement aux appels, jamais lus depuis un état global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdOptions {
    pub enabled: bool,
    pub frequency: f64,
    pub duration: f64,
    pub public_stream_base_url: String,
}

impl Default for AdOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency: 1800.0,
            duration: 90.0,
            public_stream_base_url: "http://localhost:8000".to_string(),
        }
    }
}

/// Patch des réglages publicitaires
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdOptionsUpdate {
    pub enabled: Option<bool>,
    pub frequency: Option<f64>,
    pub duration: Option<f64>,
    pub public_stream_base_url: Option<String>,
}
