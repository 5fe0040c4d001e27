//! Magasin SQLite de la bibliothèque (chemins, médias, chaînes, réglages)
//!
//! Une seule base pour les trois collections. Les identifiants sont des
//! compteurs monotones par table (AUTOINCREMENT). Les structures imbriquées
//! d'une chaîne (programmation, politique publicitaire) sont des colonnes
//! JSON : la programmation est remplacée en bloc, dernière écriture gagnante.

use crate::channel::{self, AdSettings, Channel, ChannelUpdate, NewChannel};
use crate::media::{category, MediaFile, MediaFileUpdate, NewMediaFile};
use crate::{Error, Result};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Un chemin racine de bibliothèque
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryPath {
    pub id: i64,
    pub path: String,
}

/// Réglages globaux du serveur
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub public_url_base: String,
}

/// Magasin de la bibliothèque
pub struct LibraryStore {
    conn: Arc<Mutex<Connection>>,
}

impl LibraryStore {
    /// Ouvre (ou crée) la base et son schéma
    pub fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Store(format!("Failed to create directory: {}", e)))?;
        }

        let conn = Connection::open(db_path)
            .map_err(|e| Error::Store(format!("Failed to open database: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS library_paths (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                path TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS media_files (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                path TEXT NOT NULL,
                file_name TEXT NOT NULL,
                title TEXT NOT NULL,
                summary TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT 'Uncategorized',
                show_name TEXT NOT NULL DEFAULT '',
                season TEXT NOT NULL DEFAULT '',
                episode TEXT NOT NULL DEFAULT '',
                duration REAL,
                video_id TEXT,
                thumbnail TEXT
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_media_path ON media_files(path)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS channels (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                number INTEGER NOT NULL,
                thumbnail TEXT,
                m3u_file_name TEXT NOT NULL,
                schedule TEXT NOT NULL DEFAULT '[]',
                ad_settings TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                public_url_base TEXT NOT NULL DEFAULT ''
            )",
            [],
        )?;
        conn.execute(
            "INSERT OR IGNORE INTO settings (id, public_url_base) VALUES (1, '')",
            [],
        )?;

        info!(db = %db_path.display(), "Library store ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // --- Chemins de bibliothèque ---

    pub fn library_paths(&self) -> Result<Vec<LibraryPath>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, path FROM library_paths ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(LibraryPath {
                id: row.get(0)?,
                path: row.get(1)?,
            })
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    pub fn add_library_path(&self, path: &str) -> Result<LibraryPath> {
        let conn = self.conn.lock().unwrap();
        conn.execute("INSERT INTO library_paths (path) VALUES (?1)", params![path])?;
        Ok(LibraryPath {
            id: conn.last_insert_rowid(),
            path: path.to_string(),
        })
    }

    pub fn delete_library_path(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM library_paths WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(Error::LibraryPathNotFound(id));
        }
        Ok(())
    }

    // --- Médias ---

    /// Liste triée par nom de fichier
    pub fn media_files(&self) -> Result<Vec<MediaFile>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM media_files ORDER BY file_name",
            MEDIA_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_media)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    pub fn media_by_id(&self, id: i64) -> Result<MediaFile> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM media_files WHERE id = ?1",
            MEDIA_COLUMNS
        ))?;
        match stmt.query_row(params![id], row_to_media) {
            Ok(media) => Ok(media),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(Error::MediaNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Pré-vérification du scanner : un média existe-t-il déjà pour ce chemin ?
    pub fn media_by_path(&self, path: &str) -> Result<Option<MediaFile>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM media_files WHERE path = ?1 LIMIT 1",
            MEDIA_COLUMNS
        ))?;
        match stmt.query_row(params![path], row_to_media) {
            Ok(media) => Ok(Some(media)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn add_media_file(&self, new: NewMediaFile) -> Result<MediaFile> {
        let title = new.title.unwrap_or_else(|| new.file_name.clone());
        let summary = new.summary.unwrap_or_default();
        let category = new
            .category
            .unwrap_or_else(|| category::UNCATEGORIZED.to_string());
        let show_name = new.show_name.unwrap_or_default();
        let season = new.season.unwrap_or_default();
        let episode = new.episode.unwrap_or_default();

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO media_files
                (path, file_name, title, summary, category, show_name, season, episode,
                 duration, video_id, thumbnail)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                new.path,
                new.file_name,
                title,
                summary,
                category,
                show_name,
                season,
                episode,
                new.duration,
                new.video_id,
                new.thumbnail,
            ],
        )?;

        Ok(MediaFile {
            id: conn.last_insert_rowid(),
            path: new.path,
            file_name: new.file_name,
            title,
            summary,
            category,
            show_name,
            season,
            episode,
            duration: new.duration,
            video_id: new.video_id,
            thumbnail: new.thumbnail,
        })
    }

    /// Édition utilisateur : métadonnées seulement, jamais le chemin ni la durée
    pub fn update_media_file(&self, id: i64, update: MediaFileUpdate) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE media_files
             SET title = ?1, summary = ?2, category = ?3,
                 show_name = ?4, season = ?5, episode = ?6
             WHERE id = ?7",
            params![
                update.title,
                update.summary,
                update.category,
                update.show_name,
                update.season,
                update.episode,
                id
            ],
        )?;
        if updated == 0 {
            return Err(Error::MediaNotFound(id));
        }
        Ok(())
    }

    pub fn delete_media_file(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM media_files WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(Error::MediaNotFound(id));
        }
        Ok(())
    }

    /// Vide entièrement la bibliothèque de médias
    pub fn purge_media(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM media_files", [])?;
        info!("Media store has been purged");
        Ok(())
    }

    /// Change la catégorie d'un lot de médias, retourne le nombre modifié
    pub fn bulk_update_category(&self, ids: &[i64], category: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let mut updated = 0;
        for id in ids {
            updated += conn.execute(
                "UPDATE media_files SET category = ?1 WHERE id = ?2",
                params![category, id],
            )?;
        }
        Ok(updated)
    }

    /// Les médias éligibles à l'insertion publicitaire
    pub fn ad_pool(&self) -> Result<Vec<MediaFile>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM media_files WHERE category = ?1 ORDER BY file_name",
            MEDIA_COLUMNS
        ))?;
        let rows = stmt.query_map(params![category::AD_BUMP], row_to_media)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    // --- Chaînes ---

    pub fn channels(&self) -> Result<Vec<Channel>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, number, thumbnail, m3u_file_name, schedule, ad_settings
             FROM channels ORDER BY id",
        )?;
        let rows = stmt.query_map([], row_to_channel_raw)?;
        let mut channels = Vec::new();
        for row in rows {
            channels.push(parse_channel(row?)?);
        }
        Ok(channels)
    }

    pub fn channel_by_id(&self, id: i64) -> Result<Channel> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, number, thumbnail, m3u_file_name, schedule, ad_settings
             FROM channels WHERE id = ?1",
        )?;
        match stmt.query_row(params![id], row_to_channel_raw) {
            Ok(raw) => parse_channel(raw),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(Error::ChannelNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn add_channel(&self, new: NewChannel) -> Result<Channel> {
        let m3u_file_name = channel::m3u_file_name(&new.name);
        let ad_settings = AdSettings::default();
        let ad_settings_json = serde_json::to_string(&ad_settings)?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO channels (name, number, thumbnail, m3u_file_name, schedule, ad_settings)
             VALUES (?1, ?2, ?3, ?4, '[]', ?5)",
            params![new.name, new.number, new.thumbnail, m3u_file_name, ad_settings_json],
        )?;

        Ok(Channel {
            id: conn.last_insert_rowid(),
            name: new.name,
            number: new.number,
            thumbnail: new.thumbnail,
            m3u_file_name,
            schedule: Vec::new(),
            ad_settings,
        })
    }

    pub fn update_channel(&self, id: i64, update: ChannelUpdate) -> Result<Channel> {
        let mut channel = self.channel_by_id(id)?;

        if let Some(name) = update.name {
            channel.name = name;
        }
        if let Some(number) = update.number {
            channel.number = number;
        }
        if let Some(thumbnail) = update.thumbnail {
            channel.thumbnail = thumbnail;
        }
        if let Some(ad_settings) = update.ad_settings {
            channel.ad_settings = ad_settings;
        }
        if let Some(m3u_file_name) = update.m3u_file_name {
            channel.m3u_file_name = m3u_file_name;
        }

        let ad_settings_json = serde_json::to_string(&channel.ad_settings)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE channels
             SET name = ?1, number = ?2, thumbnail = ?3, m3u_file_name = ?4, ad_settings = ?5
             WHERE id = ?6",
            params![
                channel.name,
                channel.number,
                channel.thumbnail,
                channel.m3u_file_name,
                ad_settings_json,
                id
            ],
        )?;
        Ok(channel)
    }

    /// Supprime la chaîne et, avec elle, sa programmation embarquée
    pub fn delete_channel(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM channels WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(Error::ChannelNotFound(id));
        }
        Ok(())
    }

    /// Remplace la programmation en bloc (dernière écriture gagnante)
    pub fn replace_schedule(&self, channel_id: i64, schedule: &[MediaFile]) -> Result<()> {
        let json = serde_json::to_string(schedule)?;
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE channels SET schedule = ?1 WHERE id = ?2",
            params![json, channel_id],
        )?;
        if updated == 0 {
            return Err(Error::ChannelNotFound(channel_id));
        }
        Ok(())
    }

    /// Ajoute un instantané du média en fin de programmation
    pub fn add_media_to_schedule(&self, channel_id: i64, media_id: i64) -> Result<MediaFile> {
        let mut channel = self.channel_by_id(channel_id)?;
        let media = self.media_by_id(media_id)?;
        channel.schedule.push(media.clone());
        self.replace_schedule(channel_id, &channel.schedule)?;
        Ok(media)
    }

    /// Ajoute les instantanés d'un lot de médias, retourne le nombre ajouté
    ///
    /// Les identifiants inconnus sont ignorés silencieusement.
    pub fn add_many_to_schedule(&self, channel_id: i64, media_ids: &[i64]) -> Result<usize> {
        let mut channel = self.channel_by_id(channel_id)?;
        let mut added = 0;
        for id in media_ids {
            match self.media_by_id(*id) {
                Ok(media) => {
                    channel.schedule.push(media);
                    added += 1;
                }
                Err(Error::MediaNotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        if added > 0 {
            self.replace_schedule(channel_id, &channel.schedule)?;
        }
        Ok(added)
    }

    // --- Réglages ---

    pub fn settings(&self) -> Result<Settings> {
        let conn = self.conn.lock().unwrap();
        let public_url_base = conn.query_row(
            "SELECT public_url_base FROM settings WHERE id = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(Settings { public_url_base })
    }

    pub fn update_settings(&self, settings: &Settings) -> Result<Settings> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE settings SET public_url_base = ?1 WHERE id = 1",
            params![settings.public_url_base],
        )?;
        Ok(settings.clone())
    }
}

const MEDIA_COLUMNS: &str = "id, path, file_name, title, summary, category, \
     show_name, season, episode, duration, video_id, thumbnail";

fn row_to_media(row: &Row<'_>) -> rusqlite::Result<MediaFile> {
    Ok(MediaFile {
        id: row.get(0)?,
        path: row.get(1)?,
        file_name: row.get(2)?,
        title: row.get(3)?,
        summary: row.get(4)?,
        category: row.get(5)?,
        show_name: row.get(6)?,
        season: row.get(7)?,
        episode: row.get(8)?,
        duration: row.get(9)?,
        video_id: row.get(10)?,
        thumbnail: row.get(11)?,
    })
}

type RawChannel = (i64, String, i64, Option<String>, String, String, String);

fn row_to_channel_raw(row: &Row<'_>) -> rusqlite::Result<RawChannel> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn parse_channel(raw: RawChannel) -> Result<Channel> {
    let (id, name, number, thumbnail, m3u_file_name, schedule_json, ad_settings_json) = raw;
    Ok(Channel {
        id,
        name,
        number,
        thumbnail,
        m3u_file_name,
        schedule: serde_json::from_str(&schedule_json)?,
        ad_settings: serde_json::from_str(&ad_settings_json)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (tempfile::TempDir, LibraryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LibraryStore::new(&dir.path().join("library.db")).unwrap();
        (dir, store)
    }

    fn sample_media(path: &str, name: &str) -> NewMediaFile {
        NewMediaFile {
            path: path.to_string(),
            file_name: name.to_string(),
            duration: Some(120.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_library_path_crud() {
        let (_dir, store) = open_store();
        let added = store.add_library_path("/media/tv").unwrap();
        assert_eq!(store.library_paths().unwrap().len(), 1);

        store.delete_library_path(added.id).unwrap();
        assert!(store.library_paths().unwrap().is_empty());
        assert!(matches!(
            store.delete_library_path(added.id),
            Err(Error::LibraryPathNotFound(_))
        ));
    }

    #[test]
    fn test_media_defaults_on_insert() {
        let (_dir, store) = open_store();
        let media = store
            .add_media_file(sample_media("/media/tv/ep1.mp4", "ep1.mp4"))
            .unwrap();

        assert_eq!(media.title, "ep1.mp4");
        assert_eq!(media.category, category::UNCATEGORIZED);
        assert_eq!(media.summary, "");
        assert_eq!(media.duration, Some(120.0));
    }

    #[test]
    fn test_media_ids_are_monotonic() {
        let (_dir, store) = open_store();
        let a = store.add_media_file(sample_media("/a.mp4", "a.mp4")).unwrap();
        let b = store.add_media_file(sample_media("/b.mp4", "b.mp4")).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_media_listing_sorted_by_file_name() {
        let (_dir, store) = open_store();
        store.add_media_file(sample_media("/z.mp4", "zebra.mp4")).unwrap();
        store.add_media_file(sample_media("/a.mp4", "alpha.mp4")).unwrap();

        let names: Vec<String> = store
            .media_files()
            .unwrap()
            .into_iter()
            .map(|m| m.file_name)
            .collect();
        assert_eq!(names, vec!["alpha.mp4", "zebra.mp4"]);
    }

    #[test]
    fn test_media_by_path_precheck() {
        let (_dir, store) = open_store();
        store.add_media_file(sample_media("/a.mp4", "a.mp4")).unwrap();
        assert!(store.media_by_path("/a.mp4").unwrap().is_some());
        assert!(store.media_by_path("/missing.mp4").unwrap().is_none());
    }

    #[test]
    fn test_bulk_category_and_ad_pool() {
        let (_dir, store) = open_store();
        let a = store.add_media_file(sample_media("/a.mp4", "a.mp4")).unwrap();
        let b = store.add_media_file(sample_media("/b.mp4", "b.mp4")).unwrap();
        store.add_media_file(sample_media("/c.mp4", "c.mp4")).unwrap();

        let updated = store
            .bulk_update_category(&[a.id, b.id], category::AD_BUMP)
            .unwrap();
        assert_eq!(updated, 2);
        assert_eq!(store.ad_pool().unwrap().len(), 2);
    }

    #[test]
    fn test_purge_media() {
        let (_dir, store) = open_store();
        store.add_media_file(sample_media("/a.mp4", "a.mp4")).unwrap();
        store.purge_media().unwrap();
        assert!(store.media_files().unwrap().is_empty());
    }

    #[test]
    fn test_channel_created_with_defaults() {
        let (_dir, store) = open_store();
        let channel = store
            .add_channel(NewChannel {
                name: "Retro TV".to_string(),
                number: 4,
                thumbnail: None,
            })
            .unwrap();

        assert_eq!(channel.m3u_file_name, "Retro_TV.m3u");
        assert!(channel.schedule.is_empty());
        assert!(!channel.ad_settings.active);

        let loaded = store.channel_by_id(channel.id).unwrap();
        assert_eq!(loaded.name, "Retro TV");
    }

    #[test]
    fn test_channel_update_is_partial() {
        let (_dir, store) = open_store();
        let channel = store
            .add_channel(NewChannel {
                name: "Retro TV".to_string(),
                number: 4,
                thumbnail: None,
            })
            .unwrap();

        let updated = store
            .update_channel(
                channel.id,
                ChannelUpdate {
                    number: Some(7),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.number, 7);
        assert_eq!(updated.name, "Retro TV");
    }

    #[test]
    fn test_channel_thumbnail_can_be_cleared() {
        let (_dir, store) = open_store();
        let channel = store
            .add_channel(NewChannel {
                name: "Retro TV".to_string(),
                number: 4,
                thumbnail: Some("http://tv.local/logo.png".to_string()),
            })
            .unwrap();

        // Patch sans le champ : la vignette reste en place
        let untouched = store
            .update_channel(
                channel.id,
                ChannelUpdate {
                    name: Some("Retro".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(untouched.thumbnail.is_some());

        // null explicite : la vignette est effacée
        let cleared = store
            .update_channel(
                channel.id,
                ChannelUpdate {
                    thumbnail: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(cleared.thumbnail, None);
        assert_eq!(store.channel_by_id(channel.id).unwrap().thumbnail, None);
    }

    #[test]
    fn test_schedule_entries_are_snapshots() {
        let (_dir, store) = open_store();
        let channel = store
            .add_channel(NewChannel {
                name: "Main".to_string(),
                number: 1,
                thumbnail: None,
            })
            .unwrap();
        let media = store.add_media_file(sample_media("/a.mp4", "a.mp4")).unwrap();
        store.add_media_to_schedule(channel.id, media.id).unwrap();

        // Éditer le média canonique ne change pas l'entrée déjà placée
        store
            .update_media_file(
                media.id,
                MediaFileUpdate {
                    title: "Renamed".to_string(),
                    summary: String::new(),
                    category: category::MOVIE.to_string(),
                    show_name: String::new(),
                    season: String::new(),
                    episode: String::new(),
                },
            )
            .unwrap();

        let loaded = store.channel_by_id(channel.id).unwrap();
        assert_eq!(loaded.schedule[0].title, "a.mp4");
    }

    #[test]
    fn test_add_many_skips_unknown_ids() {
        let (_dir, store) = open_store();
        let channel = store
            .add_channel(NewChannel {
                name: "Main".to_string(),
                number: 1,
                thumbnail: None,
            })
            .unwrap();
        let a = store.add_media_file(sample_media("/a.mp4", "a.mp4")).unwrap();
        let b = store.add_media_file(sample_media("/b.mp4", "b.mp4")).unwrap();

        let added = store
            .add_many_to_schedule(channel.id, &[a.id, 999_999, b.id])
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(store.channel_by_id(channel.id).unwrap().schedule.len(), 2);
    }

    #[test]
    fn test_replace_schedule_whole_array() {
        let (_dir, store) = open_store();
        let channel = store
            .add_channel(NewChannel {
                name: "Main".to_string(),
                number: 1,
                thumbnail: None,
            })
            .unwrap();
        let a = store.add_media_file(sample_media("/a.mp4", "a.mp4")).unwrap();
        let b = store.add_media_file(sample_media("/b.mp4", "b.mp4")).unwrap();

        store.replace_schedule(channel.id, &[b.clone(), a.clone()]).unwrap();
        let loaded = store.channel_by_id(channel.id).unwrap();
        let ids: Vec<i64> = loaded.schedule.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);

        assert!(matches!(
            store.replace_schedule(999, &[]),
            Err(Error::ChannelNotFound(999))
        ));
    }

    #[test]
    fn test_settings_roundtrip() {
        let (_dir, store) = open_store();
        assert_eq!(store.settings().unwrap().public_url_base, "");

        store
            .update_settings(&Settings {
                public_url_base: "http://tv.local:8000".to_string(),
            })
            .unwrap();
        assert_eq!(
            store.settings().unwrap().public_url_base,
            "http://tv.local:8000"
        );
    }
}
