//! # boomschedule - Cœur de planification par chaîne
//!
//! Transforme la programmation de base d'une chaîne en séquence finale
//! publicités incluses (matérialisation), puis la rend en M3U ou XMLTV.
//! Tout est calcul pur sur des instantanés du magasin : pas d'E/S ici.

mod m3u;
mod materialize;
mod picker;
mod xmltv;

pub use m3u::render_channel_m3u;
pub use materialize::materialize;
pub use picker::{AdPicker, RandomPicker, RoundRobinPicker};
pub use xmltv::{format_timestamp, render_guide, GuideChannel};
