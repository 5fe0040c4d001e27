//! # Module de configuration BoomServer
//!
//! Gestion de la configuration de l'application :
//! - Chargement depuis un fichier YAML
//! - Fusion avec la configuration par défaut embarquée
//! - Getters typés avec valeurs de repli
//! - Accès singleton thread-safe
//!
//! ## Usage
//!
//! ```no_run
//! use boomconfig::get_config;
//!
//! let config = get_config();
//! let port = config.get_http_port();
//! let data_dir = config.get_data_dir().unwrap();
//! ```

use anyhow::{anyhow, Result};
use dirs::home_dir;
use once_cell::sync::Lazy;
use serde_yaml::{Mapping, Value};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::info;

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("boomserver.yaml");

const ENV_CONFIG_DIR: &str = "BOOMSERVER_CONFIG";

const DEFAULT_HTTP_PORT: u16 = 8000;
const DEFAULT_FFPROBE_PATH: &str = "ffprobe";
const DEFAULT_MAX_GENERATE_DURATION: f64 = 3600.0;
const DEFAULT_LOG_MIN_LEVEL: &str = "INFO";

static CONFIG: Lazy<Arc<Config>> = Lazy::new(|| {
    Arc::new(Config::load_config("").expect("Failed to load BoomServer configuration"))
});

/// Retourne la configuration globale
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}

/// Gestionnaire de configuration
///
/// La configuration vit sous forme d'arbre YAML fusionné (défauts embarqués
/// puis fichier externe). Les getters lisent un chemin de clés et retombent
/// sur la valeur par défaut quand la clé manque ou a un mauvais type.
#[derive(Debug)]
pub struct Config {
    config_dir: PathBuf,
    path: PathBuf,
    data: Mutex<Value>,
}

impl Config {
    /// Cherche le répertoire de configuration
    ///
    /// Ordre de recherche :
    /// 1. Le paramètre `directory` s'il n'est pas vide
    /// 2. La variable d'environnement `BOOMSERVER_CONFIG`
    /// 3. `.boomserver` dans le répertoire courant s'il existe
    /// 4. `.boomserver` dans le répertoire personnel
    fn find_config_dir(directory: &str) -> PathBuf {
        if !directory.is_empty() {
            return PathBuf::from(directory);
        }

        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var = ENV_CONFIG_DIR, path = %env_path, "Trying to load config from env");
            return PathBuf::from(env_path);
        }

        if Path::new(".boomserver").exists() {
            return PathBuf::from(".boomserver");
        }

        if let Some(home) = home_dir() {
            return home.join(".boomserver");
        }

        PathBuf::from(".boomserver")
    }

    /// Valide et prépare le répertoire de configuration
    fn validate_config_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        if !path.is_dir() {
            return Err(anyhow!("Config path is not a directory"));
        }
        Ok(())
    }

    /// Charge la configuration depuis le répertoire indiqué
    ///
    /// Les défauts embarqués sont chargés d'abord, puis le fichier
    /// `config.yaml` externe est fusionné par-dessus s'il existe.
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::find_config_dir(directory);
        Self::validate_config_dir(&config_dir)?;
        info!(config_dir = %config_dir.display(), "Using config directory");

        let path = config_dir.join("config.yaml");

        let mut merged: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        match fs::read(&path) {
            Ok(data) => {
                info!(config_file = %path.display(), "Loaded config file");
                let external: Value = serde_yaml::from_slice(&data)?;
                merge_yaml(&mut merged, &external);
            }
            Err(_) => {
                info!(config_file = %path.display(), "Config file not found, using embedded defaults");
            }
        }

        let config = Config {
            config_dir,
            path,
            data: Mutex::new(merged),
        };
        config.save()?;
        Ok(config)
    }

    /// Sauvegarde la configuration courante dans config.yaml
    pub fn save(&self) -> Result<()> {
        let data = self.data.lock().unwrap();
        let yaml = serde_yaml::to_string(&*data)?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }

    /// Lit une valeur à un chemin de clés donné
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.data.lock().unwrap();
        let mut current = &*data;
        for key in path {
            match current {
                Value::Mapping(map) => {
                    current = map
                        .get(Value::String((*key).to_string()))
                        .ok_or_else(|| anyhow!("Missing config key: {}", key))?;
                }
                _ => return Err(anyhow!("Config node is not a map at key: {}", key)),
            }
        }
        Ok(current.clone())
    }

    /// Écrit une valeur à un chemin de clés donné puis sauvegarde
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        {
            let mut data = self.data.lock().unwrap();
            Self::set_value_internal(&mut data, path, value)?;
        }
        self.save()?;
        Ok(())
    }

    fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
        if path.is_empty() {
            *data = value;
            return Ok(());
        }
        if let Value::Mapping(map) = data {
            let key = Value::String(path[0].to_string());
            if path.len() == 1 {
                map.insert(key, value);
            } else {
                let entry = map.entry(key).or_insert(Value::Mapping(Mapping::new()));
                Self::set_value_internal(entry, &path[1..], value)?;
            }
            Ok(())
        } else {
            Err(anyhow!("Config node is not a map"))
        }
    }

    fn get_string(&self, path: &[&str], default: &str) -> String {
        match self.get_value(path) {
            Ok(Value::String(s)) => s,
            _ => default.to_string(),
        }
    }

    // --- Getters typés ---

    /// Port HTTP du serveur
    pub fn get_http_port(&self) -> u16 {
        match self.get_value(&["host", "http_port"]) {
            Ok(Value::Number(n)) => n.as_u64().map(|p| p as u16).unwrap_or(DEFAULT_HTTP_PORT),
            _ => DEFAULT_HTTP_PORT,
        }
    }

    /// URL publique configurée (vide si déduite des requêtes)
    pub fn get_public_url_base(&self) -> String {
        self.get_string(&["host", "public_url_base"], "")
    }

    pub fn set_public_url_base(&self, url: &str) -> Result<()> {
        self.set_value(&["host", "public_url_base"], Value::String(url.to_string()))
    }

    /// Chemin du binaire ffprobe
    pub fn get_ffprobe_path(&self) -> PathBuf {
        PathBuf::from(self.get_string(&["library", "ffprobe_path"], DEFAULT_FFPROBE_PATH))
    }

    /// Plafond de génération BomCast, en secondes
    pub fn get_max_generate_duration(&self) -> f64 {
        match self.get_value(&["bomcast", "max_generate_duration"]) {
            Ok(Value::Number(n)) => n.as_f64().unwrap_or(DEFAULT_MAX_GENERATE_DURATION),
            _ => DEFAULT_MAX_GENERATE_DURATION,
        }
    }

    /// Clé YouTube Data API (None si non configurée)
    pub fn get_youtube_api_key(&self) -> Option<String> {
        let key = self.get_string(&["importer", "youtube_api_key"], "");
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    /// Niveau de log minimal
    pub fn get_log_min_level(&self) -> String {
        self.get_string(&["logs", "min_level"], DEFAULT_LOG_MIN_LEVEL)
    }

    // --- Répertoires de données ---

    /// Répertoire de données BoomServer (créé si absent)
    pub fn get_data_dir(&self) -> Result<PathBuf> {
        let dir = self.config_dir.join("data");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Répertoire de données BomCast (créé si absent)
    pub fn get_bomcast_dir(&self) -> Result<PathBuf> {
        let dir = self.config_dir.join("bomcast");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Chemin de la base bibliothèque
    pub fn get_library_db_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join("library.db"))
    }

    /// Chemin de la base BomCast
    pub fn get_bomcast_db_path(&self) -> Result<PathBuf> {
        Ok(self.get_bomcast_dir()?.join("bomcast.db"))
    }
}

/// Fusionne récursivement `other` dans `base`
fn merge_yaml(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Mapping(base_map), Value::Mapping(other_map)) => {
            for (key, value) in other_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, other) => *base = other.clone(),
    }
}
