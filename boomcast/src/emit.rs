//! Rendu M3U et XMLTV de la ligne de temps packée
//!
//! Les deux sorties sont produites depuis la même passe de pack : la
//! playlist énumère chaque tranche (programmes et publicités une à une),
//! le guide agrège chaque coupure en un unique programme « Commercial
//! Break ». Les artefacts sont écrits dans le répertoire de données avec
//! un nom horodaté.

use crate::packer::Segment;
use crate::{Error, Result};
use boomschedule::format_timestamp;
use boomstore::MediaFile;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;
use xmltree::{Element, EmitterConfig, XMLNode};

/// Identifiant XMLTV du canal BomCast
pub const EPG_CHANNEL_ID: &str = "main.bomcasttv";

/// URL de diffusion d'un média : les entrées distantes gardent leur URL,
/// les fichiers locaux passent par le point de service `/media`
fn stream_url(media: &MediaFile, base_url: &str) -> Option<String> {
    if media.is_remote() {
        return Some(media.path.clone());
    }
    let name = Path::new(&media.path).file_name()?.to_str()?;
    Some(format!("{}/media/{}", base_url.trim_end_matches('/'), name))
}

fn format_duration(duration: f64) -> String {
    if duration.fract() == 0.0 {
        format!("{}", duration as i64)
    } else {
        format!("{}", duration)
    }
}

/// Rend la playlist M3U de la ligne de temps
///
/// `media_by_id` sert à résoudre le chemin source de chaque tranche ; une
/// tranche dont le média n'existe plus est sautée avec un avertissement.
pub fn render_m3u(
    segments: &[Segment],
    media_by_id: &HashMap<i64, MediaFile>,
    base_url: &str,
) -> String {
    let mut out = String::from("#EXTM3U\n");

    let mut push_entry = |media_id: i64, title: &str, duration: f64| {
        let Some(media) = media_by_id.get(&media_id) else {
            warn!(media_id, title, "Skipping segment: media no longer in library");
            return;
        };
        let Some(url) = stream_url(media, base_url) else {
            warn!(media_id, path = %media.path, "Skipping segment: unusable media path");
            return;
        };
        out.push_str(&format!(
            "#EXTINF:{},{}\n{}\n",
            format_duration(duration),
            title,
            url
        ));
    };

    for segment in segments {
        match segment {
            Segment::Program { item, duration, .. } => {
                push_entry(item.media_id, &item.title, *duration);
            }
            Segment::AdBreak { ads, .. } => {
                for slot in ads {
                    push_entry(slot.item.media_id, &slot.item.title, slot.duration);
                }
            }
        }
    }

    out
}

/// Rend le guide XMLTV de la ligne de temps
///
/// Les horaires absolus partent de `day_start` (minuit UTC du jour de
/// génération) et suivent les offsets des segments. Chaque coupure devient
/// un seul programme « Commercial Break » listant les publicités diffusées.
pub fn render_epg(segments: &[Segment], day_start: DateTime<Utc>) -> String {
    let mut tv = Element::new("tv");
    tv.attributes
        .insert("date".to_string(), day_start.format("%Y%m%d").to_string());
    tv.attributes.insert(
        "generator-info-name".to_string(),
        "BomCast EPG Generator".to_string(),
    );

    let mut channel_elem = Element::new("channel");
    channel_elem
        .attributes
        .insert("id".to_string(), EPG_CHANNEL_ID.to_string());
    let mut display_name = Element::new("display-name");
    display_name
        .children
        .push(XMLNode::Text("BomCast TV".to_string()));
    channel_elem.children.push(XMLNode::Element(display_name));
    tv.children.push(XMLNode::Element(channel_elem));

    for segment in segments {
        let start = day_start + millis(segment.start_offset());
        let stop = start + millis(segment.duration());

        let (title, desc) = match segment {
            Segment::Program { item, .. } => {
                let desc = item
                    .description
                    .clone()
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| "No description available.".to_string());
                (item.title.clone(), desc)
            }
            Segment::AdBreak { ads, .. } => {
                let titles: Vec<&str> = ads.iter().map(|s| s.item.title.as_str()).collect();
                (
                    "Commercial Break".to_string(),
                    format!("Ads: {}", titles.join(", ")),
                )
            }
        };

        let mut programme = Element::new("programme");
        programme
            .attributes
            .insert("start".to_string(), format_timestamp(start));
        programme
            .attributes
            .insert("stop".to_string(), format_timestamp(stop));
        programme
            .attributes
            .insert("channel".to_string(), EPG_CHANNEL_ID.to_string());

        let mut title_elem = Element::new("title");
        title_elem
            .attributes
            .insert("lang".to_string(), "en".to_string());
        title_elem.children.push(XMLNode::Text(title));
        programme.children.push(XMLNode::Element(title_elem));

        let mut desc_elem = Element::new("desc");
        desc_elem
            .attributes
            .insert("lang".to_string(), "en".to_string());
        desc_elem.children.push(XMLNode::Text(desc));
        programme.children.push(XMLNode::Element(desc_elem));

        tv.children.push(XMLNode::Element(programme));
    }

    to_xml(&tv)
}

fn millis(seconds: f64) -> Duration {
    Duration::milliseconds((seconds * 1000.0) as i64)
}

fn to_xml(elem: &Element) -> String {
    let config = EmitterConfig::new()
        .write_document_declaration(false)
        .perform_indent(true)
        .indent_string("  ");

    let mut buf = Vec::new();
    elem.write_with_config(&mut buf, config)
        .expect("Failed to write XML");

    let mut xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n".to_string();
    xml.push_str(&String::from_utf8(buf).expect("Invalid UTF-8"));
    xml
}

/// Écrit un artefact horodaté dans le répertoire BomCast
///
/// Retourne le nom du fichier créé (`<prefix>_<ts>.<ext>`), à partir
/// duquel l'appelant construit l'URL publique.
pub fn write_artifact(dir: &Path, prefix: &str, ext: &str, content: &str) -> Result<String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::Artifact(format!("Failed to create directory: {}", e)))?;

    let file_name = format!("{}_{}.{}", prefix, Utc::now().timestamp_millis(), ext);
    let path: PathBuf = dir.join(&file_name);
    std::fs::write(&path, content)
        .map_err(|e| Error::Artifact(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AdOptions, ScheduledItem, ADS_CHANNEL, MAIN_CHANNEL};
    use crate::packer::pack;
    use chrono::TimeZone;

    fn media(id: i64, path: &str) -> MediaFile {
        MediaFile {
            id,
            path: path.to_string(),
            file_name: Path::new(path)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned(),
            title: format!("Media {}", id),
            summary: String::new(),
            category: boomstore::category::TV_SHOW.to_string(),
            show_name: String::new(),
            season: String::new(),
            episode: String::new(),
            duration: Some(60.0),
            video_id: None,
            thumbnail: None,
        }
    }

    fn item(id: i64, channel: &str, start: f64, duration: f64) -> ScheduledItem {
        ScheduledItem {
            id,
            channel_id: channel.to_string(),
            media_id: id,
            title: format!("Item {}", id),
            description: None,
            item_type: "video".to_string(),
            duration,
            start_time: start,
            end_time: start + duration,
        }
    }

    fn midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    fn library(items: &[(i64, &str)]) -> HashMap<i64, MediaFile> {
        items.iter().map(|(id, p)| (*id, media(*id, p))).collect()
    }

    #[test]
    fn test_m3u_lists_programs_and_individual_ads() {
        let main = vec![item(1, MAIN_CHANNEL, 0.0, 100.0)];
        let ads = vec![item(10, ADS_CHANNEL, 0.0, 30.0)];
        let options = AdOptions {
            enabled: true,
            frequency: 50.0,
            duration: 30.0,
            public_stream_base_url: String::new(),
        };
        let segments = pack(&main, &ads, &options, 3600.0);
        let lib = library(&[(1, "/tv/show.mp4"), (10, "/ads/spot.mp4")]);

        let m3u = render_m3u(&segments, &lib, "http://host:8000");
        assert!(m3u.starts_with("#EXTM3U\n"));
        assert!(m3u.contains("#EXTINF:50,Item 1\nhttp://host:8000/media/show.mp4"));
        assert!(m3u.contains("#EXTINF:30,Item 10\nhttp://host:8000/media/spot.mp4"));
    }

    #[test]
    fn test_m3u_skips_unresolvable_media() {
        let main = vec![item(1, MAIN_CHANNEL, 0.0, 100.0)];
        let segments = pack(&main, &[], &AdOptions::default(), 3600.0);

        let m3u = render_m3u(&segments, &HashMap::new(), "http://host:8000");
        assert_eq!(m3u, "#EXTM3U\n");
    }

    #[test]
    fn test_m3u_remote_media_keeps_its_url() {
        let main = vec![item(1, MAIN_CHANNEL, 0.0, 100.0)];
        let segments = pack(&main, &[], &AdOptions::default(), 3600.0);
        let mut lib = HashMap::new();
        let mut remote = media(1, "https://www.youtube.com/watch?v=abc12345678");
        remote.video_id = Some("abc12345678".to_string());
        lib.insert(1, remote);

        let m3u = render_m3u(&segments, &lib, "http://host:8000");
        assert!(m3u.contains("https://www.youtube.com/watch?v=abc12345678"));
        assert!(!m3u.contains("/media/"));
    }

    #[test]
    fn test_epg_groups_break_into_commercial_programme() {
        let main = vec![item(1, MAIN_CHANNEL, 0.0, 100.0)];
        let ads = vec![item(10, ADS_CHANNEL, 0.0, 15.0), item(11, ADS_CHANNEL, 0.0, 15.0)];
        let options = AdOptions {
            enabled: true,
            frequency: 50.0,
            duration: 30.0,
            public_stream_base_url: String::new(),
        };
        let segments = pack(&main, &ads, &options, 3600.0);

        let xml = render_epg(&segments, midnight());
        assert!(xml.contains("<channel id=\"main.bomcasttv\">"));
        assert!(xml.contains("Commercial Break"));
        assert!(xml.contains("Ads: Item 10, Item 11"));
        // Coupure à t=50 pendant 30s
        assert!(xml.contains("start=\"20240301000050 +0000\" stop=\"20240301000120 +0000\""));
    }

    #[test]
    fn test_m3u_and_epg_agree_on_timeline() {
        // Même passe de pack : la durée totale de la playlist doit être la
        // fenêtre couverte par le guide.
        let main = vec![
            item(1, MAIN_CHANNEL, 0.0, 90.0),
            item(2, MAIN_CHANNEL, 90.0, 100.0),
        ];
        let ads = vec![item(10, ADS_CHANNEL, 0.0, 30.0)];
        let options = AdOptions {
            enabled: true,
            frequency: 100.0,
            duration: 30.0,
            public_stream_base_url: String::new(),
        };
        let segments = pack(&main, &ads, &options, 3600.0);

        let last = segments.last().unwrap();
        let total = last.start_offset() + last.duration();
        assert_eq!(total, 220.0);

        let xml = render_epg(&segments, midnight());
        // 220s après minuit
        assert!(xml.contains("stop=\"20240301000340 +0000\""));
    }

    #[test]
    fn test_write_artifact_creates_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let name = write_artifact(dir.path(), "bomcast_playlist", "m3u", "#EXTM3U\n").unwrap();

        assert!(name.starts_with("bomcast_playlist_"));
        assert!(name.ends_with(".m3u"));
        let content = std::fs::read_to_string(dir.path().join(&name)).unwrap();
        assert_eq!(content, "#EXTM3U\n");
    }
}
