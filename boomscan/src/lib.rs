//! # boomscan - Scanner de bibliothèque et sonde de durée
//!
//! Parcourt les racines de bibliothèque enregistrées, repère les fichiers
//! vidéo non encore indexés et interroge `ffprobe` pour leur durée avant
//! de les insérer dans le magasin. L'échec de sonde d'un fichier isolé ne
//! fait jamais échouer le scan complet ; seule l'absence du binaire
//! `ffprobe` interrompt tout.

mod error;

pub use error::{Error, Result};

use boomstore::{LibraryStore, NewMediaFile};
use serde::Serialize;
use std::path::Path;
use tokio::process::Command;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Extensions vidéo reconnues (comparaison insensible à la casse)
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mkv", "avi", "mov", "webm"];

/// Bilan d'un scan de bibliothèque
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ScanReport {
    /// Fichiers vidéo rencontrés
    pub scanned: usize,
    /// Fichiers nouvellement indexés
    pub indexed: usize,
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// Interroge `ffprobe` pour la durée d'un fichier, en secondes
///
/// Un fichier que `ffprobe` ne sait pas lire donne `None` avec un
/// avertissement ; l'erreur n'est remontée que si le binaire lui-même
/// est introuvable.
pub async fn probe_duration(ffprobe_path: &str, file: &Path) -> Result<Option<f64>> {
    let output = Command::new(ffprobe_path)
        .arg("-v")
        .arg("error")
        .arg("-show_entries")
        .arg("format=duration")
        .arg("-of")
        .arg("default=noprint_wrappers=1:nokey=1")
        .arg(file)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ProberMissing(format!("ffprobe not found at '{}'", ffprobe_path))
            } else {
                Error::Other(anyhow::anyhow!("Failed to run ffprobe: {}", e))
            }
        })?;

    if !output.status.success() {
        warn!(file = %file.display(), "ffprobe failed for file");
        return Ok(None);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match stdout.trim().parse::<f64>() {
        Ok(duration) if duration.is_finite() && duration > 0.0 => Ok(Some(duration)),
        _ => {
            warn!(file = %file.display(), "ffprobe returned no usable duration");
            Ok(None)
        }
    }
}

/// Vérifie que le binaire ffprobe est exécutable avant de scanner
async fn check_prober(ffprobe_path: &str) -> Result<()> {
    Command::new(ffprobe_path)
        .arg("-version")
        .output()
        .await
        .map_err(|_| Error::ProberMissing(format!("ffprobe not found at '{}'", ffprobe_path)))?;
    Ok(())
}

/// Scanne toutes les racines de bibliothèque et indexe les nouveaux fichiers
pub async fn run_scan(store: &LibraryStore, ffprobe_path: &str) -> Result<ScanReport> {
    let roots = store.library_paths()?;
    if roots.is_empty() {
        info!("No library paths configured, nothing to scan");
        return Ok(ScanReport::default());
    }

    check_prober(ffprobe_path).await?;

    let mut report = ScanReport::default();

    for root in &roots {
        info!(path = %root.path, "Scanning library path");

        for entry in WalkDir::new(&root.path)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !has_video_extension(path) {
                continue;
            }
            report.scanned += 1;

            let path_str = path.to_string_lossy().into_owned();
            if store.media_by_path(&path_str)?.is_some() {
                continue;
            }

            let Some(duration) = probe_duration(ffprobe_path, path).await? else {
                continue;
            };

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path_str.clone());

            store.add_media_file(NewMediaFile {
                path: path_str,
                file_name,
                duration: Some(duration),
                ..NewMediaFile::default()
            })?;
            report.indexed += 1;
        }
    }

    info!(
        scanned = report.scanned,
        indexed = report.indexed,
        "Library scan finished"
    );
    Ok(report)
}
