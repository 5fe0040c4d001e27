//! # boomcast - Planificateur de chaîne linéaire
//!
//! Maintient un planning persistant d'items (canaux logiques `main` et
//! `ads`), le packe en une ligne de temps continue avec coupures
//! publicitaires à intervalle fixe, et émet la playlist M3U et le guide
//! XMLTV correspondants depuis cette unique passe.

mod emit;
mod error;
mod model;
mod packer;
mod store;

pub use emit::{render_epg, render_m3u, write_artifact, EPG_CHANNEL_ID};
pub use error::{Error, Result};
pub use model::{
    AdOptions, AdOptionsUpdate, CastChannel, NewScheduledItem, ScheduledItem, ScheduledItemUpdate,
    ADS_CHANNEL, MAIN_CHANNEL,
};
pub use packer::{pack, AdSlot, Segment};
pub use store::CastStore;
