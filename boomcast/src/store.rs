//! Magasin SQLite du planning BomCast (base distincte de la bibliothèque)

use crate::model::{
    AdOptions, AdOptionsUpdate, CastChannel, NewScheduledItem, ScheduledItem, ScheduledItemUpdate,
    ADS_CHANNEL, MAIN_CHANNEL,
};
use crate::{Error, Result};
use rand::seq::SliceRandom;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Magasin du planning linéaire
pub struct CastStore {
    conn: Arc<Mutex<Connection>>,
}

impl CastStore {
    /// Ouvre (ou crée) la base, son schéma et ses valeurs par défaut
    pub fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Store(format!("Failed to create directory: {}", e)))?;
        }

        let conn = Connection::open(db_path)
            .map_err(|e| Error::Store(format!("Failed to open database: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS cast_channels (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT ''
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS schedule (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                channel_id TEXT NOT NULL,
                media_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                item_type TEXT NOT NULL DEFAULT '',
                duration REAL NOT NULL,
                start_time REAL NOT NULL,
                end_time REAL NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_schedule_channel ON schedule(channel_id, start_time)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS ad_options (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                enabled INTEGER NOT NULL,
                frequency REAL NOT NULL,
                duration REAL NOT NULL,
                public_stream_base_url TEXT NOT NULL
            )",
            [],
        )?;

        // Canaux intégrés et réglages par défaut
        conn.execute(
            "INSERT OR IGNORE INTO cast_channels (id, name, description) VALUES
                (?1, 'Main Channel', 'Primary broadcast channel'),
                (?2, 'Ad Content', 'Dedicated channel for commercial breaks')",
            params![MAIN_CHANNEL, ADS_CHANNEL],
        )?;

        let defaults = AdOptions::default();
        conn.execute(
            "INSERT OR IGNORE INTO ad_options (id, enabled, frequency, duration, public_stream_base_url)
             VALUES (1, ?1, ?2, ?3, ?4)",
            params![
                defaults.enabled,
                defaults.frequency,
                defaults.duration,
                defaults.public_stream_base_url
            ],
        )?;

        info!(db = %db_path.display(), "BomCast store ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // --- Canaux logiques ---

    pub fn channels(&self) -> Result<Vec<CastChannel>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, description FROM cast_channels ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok(CastChannel {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    // --- Items planifiés ---

    /// Planning complet, tous canaux confondus
    pub fn schedule(&self) -> Result<Vec<ScheduledItem>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM schedule ORDER BY channel_id, start_time",
            ITEM_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_item)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Items d'un canal, triés par horaire de début
    pub fn items_for_channel(&self, channel_id: &str) -> Result<Vec<ScheduledItem>> {
        let conn = self.conn.lock().unwrap();
        Self::items_for_channel_locked(&conn, channel_id)
    }

    /// Piste publicitaire, dans l'ordre d'insertion (curseur round-robin)
    pub fn ad_track(&self) -> Result<Vec<ScheduledItem>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM schedule WHERE channel_id = ?1 ORDER BY id",
            ITEM_COLUMNS
        ))?;
        let rows = stmt.query_map(params![ADS_CHANNEL], row_to_item)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Place un item à la suite de son canal puis restaure la contiguïté
    pub fn add_item(&self, new: NewScheduledItem) -> Result<ScheduledItem> {
        let conn = self.conn.lock().unwrap();

        // Canal vide : l'item démarre à 0 ; toute autre erreur remonte
        let start_time: f64 = match conn.query_row(
            "SELECT end_time FROM schedule WHERE channel_id = ?1
             ORDER BY end_time DESC LIMIT 1",
            params![new.channel_id],
            |row| row.get(0),
        ) {
            Ok(end_time) => end_time,
            Err(rusqlite::Error::QueryReturnedNoRows) => 0.0,
            Err(e) => return Err(e.into()),
        };
        let end_time = start_time + new.duration;

        conn.execute(
            "INSERT INTO schedule
                (channel_id, media_id, title, description, item_type, duration, start_time, end_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                new.channel_id,
                new.media_id,
                new.title,
                new.description,
                new.item_type,
                new.duration,
                start_time,
                end_time
            ],
        )?;
        let id = conn.last_insert_rowid();

        Self::recalculate_channel_locked(&conn, &new.channel_id)?;
        Self::item_by_id_locked(&conn, id)
    }

    pub fn remove_item(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let item = Self::item_by_id_locked(&conn, id)?;
        conn.execute("DELETE FROM schedule WHERE id = ?1", params![id])?;
        Self::recalculate_channel_locked(&conn, &item.channel_id)?;
        Ok(())
    }

    /// Met à jour un item ; un changement de canal recalcule les deux canaux
    pub fn update_item(&self, id: i64, update: ScheduledItemUpdate) -> Result<ScheduledItem> {
        let conn = self.conn.lock().unwrap();
        let mut item = Self::item_by_id_locked(&conn, id)?;
        let old_channel = item.channel_id.clone();

        if let Some(channel_id) = update.channel_id {
            item.channel_id = channel_id;
        }
        if let Some(media_id) = update.media_id {
            item.media_id = media_id;
        }
        if let Some(title) = update.title {
            item.title = title;
        }
        if let Some(description) = update.description {
            item.description = Some(description);
        }
        if let Some(item_type) = update.item_type {
            item.item_type = item_type;
        }
        if let Some(duration) = update.duration {
            item.duration = duration;
        }
        if let Some(start_time) = update.start_time {
            item.start_time = start_time;
        }
        item.end_time = item.start_time + item.duration;

        conn.execute(
            "UPDATE schedule
             SET channel_id = ?1, media_id = ?2, title = ?3, description = ?4,
                 item_type = ?5, duration = ?6, start_time = ?7, end_time = ?8
             WHERE id = ?9",
            params![
                item.channel_id,
                item.media_id,
                item.title,
                item.description,
                item.item_type,
                item.duration,
                item.start_time,
                item.end_time,
                id
            ],
        )?;

        if old_channel != item.channel_id {
            Self::recalculate_channel_locked(&conn, &old_channel)?;
        }
        Self::recalculate_channel_locked(&conn, &item.channel_id)?;
        Self::item_by_id_locked(&conn, id)
    }

    /// Vide le planning entier
    pub fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM schedule", [])?;
        info!("BomCast schedule cleared");
        Ok(())
    }

    /// Mélange chaque canal (Fisher-Yates) puis restaure la contiguïté
    pub fn shuffle(&self) -> Result<()> {
        let channels = self.channels()?;
        let conn = self.conn.lock().unwrap();

        for channel in channels {
            let mut items = Self::items_for_channel_locked(&conn, &channel.id)?;
            if items.len() < 2 {
                continue;
            }

            items.shuffle(&mut rand::rng());

            let mut current = 0.0;
            for item in &items {
                conn.execute(
                    "UPDATE schedule SET start_time = ?1, end_time = ?2 WHERE id = ?3",
                    params![current, current + item.duration, item.id],
                )?;
                current += item.duration;
            }
            Self::recalculate_channel_locked(&conn, &channel.id)?;
        }
        Ok(())
    }

    /// Restaure l'invariant de contiguïté d'un canal
    ///
    /// Tri par horaire de début existant, puis réécriture :
    /// le premier item démarre à 0, chaque suivant à la fin du précédent.
    pub fn recalculate_channel(&self, channel_id: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        Self::recalculate_channel_locked(&conn, channel_id)
    }

    fn recalculate_channel_locked(conn: &Connection, channel_id: &str) -> Result<()> {
        let items = Self::items_for_channel_locked(conn, channel_id)?;
        let mut current = 0.0;
        for item in items {
            let end = current + item.duration;
            conn.execute(
                "UPDATE schedule SET start_time = ?1, end_time = ?2 WHERE id = ?3",
                params![current, end, item.id],
            )?;
            current = end;
        }
        Ok(())
    }

    fn items_for_channel_locked(conn: &Connection, channel_id: &str) -> Result<Vec<ScheduledItem>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM schedule WHERE channel_id = ?1 ORDER BY start_time, id",
            ITEM_COLUMNS
        ))?;
        let rows = stmt.query_map(params![channel_id], row_to_item)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    fn item_by_id_locked(conn: &Connection, id: i64) -> Result<ScheduledItem> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM schedule WHERE id = ?1",
            ITEM_COLUMNS
        ))?;
        match stmt.query_row(params![id], row_to_item) {
            Ok(item) => Ok(item),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(Error::ItemNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    // --- Réglages publicitaires ---

    pub fn ad_options(&self) -> Result<AdOptions> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT enabled, frequency, duration, public_stream_base_url
             FROM ad_options WHERE id = 1",
            [],
            |row| {
                Ok(AdOptions {
                    enabled: row.get(0)?,
                    frequency: row.get(1)?,
                    duration: row.get(2)?,
                    public_stream_base_url: row.get(3)?,
                })
            },
        )
        .map_err(Into::into)
    }

    pub fn update_ad_options(&self, update: AdOptionsUpdate) -> Result<AdOptions> {
        let mut options = self.ad_options()?;
        if let Some(enabled) = update.enabled {
            options.enabled = enabled;
        }
        if let Some(frequency) = update.frequency {
            options.frequency = frequency;
        }
        if let Some(duration) = update.duration {
            options.duration = duration;
        }
        if let Some(url) = update.public_stream_base_url {
            options.public_stream_base_url = url;
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE ad_options
             SET enabled = ?1, frequency = ?2, duration = ?3, public_stream_base_url = ?4
             WHERE id = 1",
            params![
                options.enabled,
                options.frequency,
                options.duration,
                options.public_stream_base_url
            ],
        )?;
        Ok(options)
    }
}

const ITEM_COLUMNS: &str =
    "id, channel_id, media_id, title, description, item_type, duration, start_time, end_time";

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<ScheduledItem> {
    Ok(ScheduledItem {
        id: row.get(0)?,
        channel_id: row.get(1)?,
        media_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        item_type: row.get(5)?,
        duration: row.get(6)?,
        start_time: row.get(7)?,
        end_time: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (tempfile::TempDir, CastStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CastStore::new(&dir.path().join("bomcast.db")).unwrap();
        (dir, store)
    }

    fn item(channel: &str, title: &str, duration: f64) -> NewScheduledItem {
        NewScheduledItem {
            channel_id: channel.to_string(),
            media_id: 1,
            title: title.to_string(),
            description: None,
            item_type: "video".to_string(),
            duration,
        }
    }

    #[test]
    fn test_builtin_channels_seeded() {
        let (_dir, store) = open_store();
        let ids: Vec<String> = store.channels().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![MAIN_CHANNEL, ADS_CHANNEL]);
    }

    #[test]
    fn test_ad_options_defaults() {
        let (_dir, store) = open_store();
        let options = store.ad_options().unwrap();
        assert!(options.enabled);
        assert_eq!(options.frequency, 1800.0);
        assert_eq!(options.duration, 90.0);
    }

    #[test]
    fn test_ad_options_patch() {
        let (_dir, store) = open_store();
        let updated = store
            .update_ad_options(AdOptionsUpdate {
                frequency: Some(600.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.frequency, 600.0);
        // Les autres champs restent inchangés
        assert_eq!(updated.duration, 90.0);
    }

    #[test]
    fn test_items_appended_contiguously() {
        let (_dir, store) = open_store();
        let a = store.add_item(item(MAIN_CHANNEL, "A", 100.0)).unwrap();
        let b = store.add_item(item(MAIN_CHANNEL, "B", 50.0)).unwrap();

        assert_eq!(a.start_time, 0.0);
        assert_eq!(a.end_time, 100.0);
        assert_eq!(b.start_time, 100.0);
        assert_eq!(b.end_time, 150.0);
    }

    #[test]
    fn test_channels_are_independent_timelines() {
        let (_dir, store) = open_store();
        store.add_item(item(MAIN_CHANNEL, "A", 100.0)).unwrap();
        let ad = store.add_item(item(ADS_CHANNEL, "Ad", 30.0)).unwrap();
        assert_eq!(ad.start_time, 0.0);
    }

    #[test]
    fn test_remove_restores_contiguity() {
        let (_dir, store) = open_store();
        let a = store.add_item(item(MAIN_CHANNEL, "A", 100.0)).unwrap();
        store.add_item(item(MAIN_CHANNEL, "B", 50.0)).unwrap();
        store.add_item(item(MAIN_CHANNEL, "C", 25.0)).unwrap();

        store.remove_item(a.id).unwrap();

        let items = store.items_for_channel(MAIN_CHANNEL).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].start_time, 0.0);
        assert_eq!(items[0].end_time, 50.0);
        assert_eq!(items[1].start_time, 50.0);
        assert_eq!(items[1].end_time, 75.0);
    }

    #[test]
    fn test_remove_missing_item() {
        let (_dir, store) = open_store();
        assert!(matches!(store.remove_item(404), Err(Error::ItemNotFound(404))));
    }

    #[test]
    fn test_move_between_channels_recalculates_both() {
        let (_dir, store) = open_store();
        store.add_item(item(MAIN_CHANNEL, "A", 100.0)).unwrap();
        let b = store.add_item(item(MAIN_CHANNEL, "B", 50.0)).unwrap();

        let moved = store
            .update_item(
                b.id,
                ScheduledItemUpdate {
                    channel_id: Some(ADS_CHANNEL.to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        // Le canal d'arrivée repart de zéro
        assert_eq!(moved.channel_id, ADS_CHANNEL);
        assert_eq!(moved.start_time, 0.0);

        // Le canal d'origine reste contigu
        let main = store.items_for_channel(MAIN_CHANNEL).unwrap();
        assert_eq!(main.len(), 1);
        assert_eq!(main[0].start_time, 0.0);
    }

    #[test]
    fn test_duration_update_shifts_successors() {
        let (_dir, store) = open_store();
        let a = store.add_item(item(MAIN_CHANNEL, "A", 100.0)).unwrap();
        store.add_item(item(MAIN_CHANNEL, "B", 50.0)).unwrap();

        store
            .update_item(
                a.id,
                ScheduledItemUpdate {
                    duration: Some(10.0),
                    ..Default::default()
                },
            )
            .unwrap();

        let items = store.items_for_channel(MAIN_CHANNEL).unwrap();
        assert_eq!(items[0].end_time, 10.0);
        assert_eq!(items[1].start_time, 10.0);
        assert_eq!(items[1].end_time, 60.0);
    }

    #[test]
    fn test_shuffle_preserves_contiguity_and_items() {
        let (_dir, store) = open_store();
        for i in 0..5 {
            store
                .add_item(item(MAIN_CHANNEL, &format!("P{}", i), 60.0 + f64::from(i)))
                .unwrap();
        }

        store.shuffle().unwrap();

        let items = store.items_for_channel(MAIN_CHANNEL).unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].start_time, 0.0);
        for pair in items.windows(2) {
            assert_eq!(pair[1].start_time, pair[0].end_time);
        }
    }

    #[test]
    fn test_clear_empties_schedule() {
        let (_dir, store) = open_store();
        store.add_item(item(MAIN_CHANNEL, "A", 100.0)).unwrap();
        store.clear().unwrap();
        assert!(store.schedule().unwrap().is_empty());
    }

    #[test]
    fn test_ad_track_insertion_order() {
        let (_dir, store) = open_store();
        let a = store.add_item(item(ADS_CHANNEL, "Ad A", 30.0)).unwrap();
        let b = store.add_item(item(ADS_CHANNEL, "Ad B", 15.0)).unwrap();

        // Même après mélange, la piste publicitaire garde l'ordre d'insertion
        store.shuffle().unwrap();
        let track = store.ad_track().unwrap();
        assert_eq!(track[0].id, a.id);
        assert_eq!(track[1].id, b.id);
    }
}
