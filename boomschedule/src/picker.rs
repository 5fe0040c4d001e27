//! Stratégies de sélection dans le pool publicitaire
//!
//! Deux stratégies coexistent volontairement : le matérialiseur par chaîne
//! tire au hasard avec remise, le packer BomCast consomme le pool en
//! round-robin (voir `boomcast`). Le trait permet d'injecter une stratégie
//! déterministe dans les tests.

use boomstore::MediaFile;
use rand::seq::IndexedRandom;

/// Sélectionne la prochaine publicité dans un pool
pub trait AdPicker {
    /// Retourne `None` uniquement quand le pool est vide
    fn pick<'a>(&mut self, pool: &'a [MediaFile]) -> Option<&'a MediaFile>;
}

/// Tirage uniforme avec remise (la même pub peut repasser deux fois de suite)
#[derive(Debug, Default)]
pub struct RandomPicker;

impl AdPicker for RandomPicker {
    fn pick<'a>(&mut self, pool: &'a [MediaFile]) -> Option<&'a MediaFile> {
        pool.choose(&mut rand::rng())
    }
}

/// Rotation stable sur le pool, via un curseur monotone
#[derive(Debug, Default)]
pub struct RoundRobinPicker {
    cursor: usize,
}

impl AdPicker for RoundRobinPicker {
    fn pick<'a>(&mut self, pool: &'a [MediaFile]) -> Option<&'a MediaFile> {
        if pool.is_empty() {
            return None;
        }
        let ad = &pool[self.cursor % pool.len()];
        self.cursor += 1;
        Some(ad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ad(id: i64) -> MediaFile {
        MediaFile {
            id,
            path: format!("/ads/{}.mp4", id),
            file_name: format!("{}.mp4", id),
            title: format!("Ad {}", id),
            summary: String::new(),
            category: boomstore::category::AD_BUMP.to_string(),
            show_name: String::new(),
            season: String::new(),
            episode: String::new(),
            duration: Some(15.0),
            video_id: None,
            thumbnail: None,
        }
    }

    #[test]
    fn test_round_robin_rotates_in_order() {
        let pool = vec![ad(1), ad(2), ad(3)];
        let mut picker = RoundRobinPicker::default();
        let picked: Vec<i64> = (0..6).map(|_| picker.pick(&pool).unwrap().id).collect();
        assert_eq!(picked, vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_empty_pool_yields_none() {
        let pool: Vec<MediaFile> = Vec::new();
        assert!(RoundRobinPicker::default().pick(&pool).is_none());
        assert!(RandomPicker.pick(&pool).is_none());
    }

    #[test]
    fn test_random_picker_stays_in_pool() {
        let pool = vec![ad(1), ad(2)];
        let mut picker = RandomPicker;
        for _ in 0..20 {
            let id = picker.pick(&pool).unwrap().id;
            assert!(id == 1 || id == 2);
        }
    }
}
