//! État partagé entre les handlers HTTP

use boomcast::CastStore;
use boomconfig::Config;
use boomstore::LibraryStore;
use boomtube::TubeClient;
use std::path::PathBuf;
use std::sync::Arc;

/// Magasins et configuration injectés dans chaque handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub library: Arc<LibraryStore>,
    pub cast: Arc<CastStore>,
    pub tube: Arc<TubeClient>,
    /// Répertoire où sont écrits les artefacts BomCast
    pub bomcast_dir: PathBuf,
}
