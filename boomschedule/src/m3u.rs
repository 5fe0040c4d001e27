//! Rendu M3U de la programmation matérialisée d'une chaîne

use boomstore::{Channel, MediaFile};
use std::fmt::Write;

/// Sérialise une programmation en playlist M3U
///
/// Une durée absente (ou nulle) est rendue `-1`, le signal "inconnue/live"
/// des lecteurs IPTV. Chaque entrée pointe vers l'endpoint de streaming du
/// serveur, jamais vers le chemin local brut.
pub fn render_channel_m3u(channel: &Channel, schedule: &[MediaFile], base_url: &str) -> String {
    let mut out = String::from("#EXTM3U\n");
    let logo = channel.thumbnail.as_deref().unwrap_or("");

    for program in schedule {
        let duration = match program.duration {
            Some(d) if d > 0.0 => format_duration(d),
            _ => "-1".to_string(),
        };
        let _ = writeln!(
            out,
            "#EXTINF:{}, tvg-id=\"{}\" tvg-name=\"{}\" tvg-logo=\"{}\",{}",
            duration, channel.id, channel.name, logo, program.title
        );
        let _ = writeln!(out, "{}/stream/{}", base_url, program.id);
    }

    out
}

/// Durées entières sans partie décimale, sinon la valeur flottante telle quelle
fn format_duration(d: f64) -> String {
    if d.fract() == 0.0 {
        format!("{}", d as i64)
    } else {
        format!("{}", d)
    }
}
