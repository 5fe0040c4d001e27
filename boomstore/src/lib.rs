//! # boomstore - Magasin de la bibliothèque BoomServer
//!
//! Trois collections ordonnées (chemins de bibliothèque, fichiers média,
//! chaînes) plus un singleton de réglages, persistés en SQLite. Le cœur de
//! planification lit des instantanés de ce magasin avant chaque calcul et
//! écrit les mutations en retour ; le magasin lui-même ne planifie rien.

mod channel;
mod error;
mod media;
mod store;

pub use channel::{m3u_file_name, AdRule, AdSettings, Channel, ChannelUpdate, NewChannel};
pub use error::{Error, Result};
pub use media::{category, MediaFile, MediaFileUpdate, NewMediaFile};
pub use store::{LibraryPath, LibraryStore, Settings};
