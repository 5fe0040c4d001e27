//! Matérialisation de la programmation d'une chaîne
//!
//! Entrelace les coupures publicitaires dans la séquence de programmes
//! d'une chaîne selon sa politique (`programCount` ou `timedInterval`).
//! Fonction pure : aucune entrée n'est modifiée, le résultat est la
//! séquence prête à être rendue en M3U ou XMLTV.

use crate::picker::AdPicker;
use boomstore::{AdRule, AdSettings, MediaFile};

/// Calcule la séquence finale, publicités incluses
///
/// Court-circuits : politique inactive ou pool vide rendent la
/// programmation de base telle quelle.
///
/// Le déclenchement est évalué strictement après l'ajout d'un programme
/// complet : une coupure ne scinde jamais un programme ici (contrairement
/// au packer BomCast). Un programme sans durée compte pour le seuil
/// `programCount` mais n'alimente pas le chronomètre.
pub fn materialize(
    base: &[MediaFile],
    settings: &AdSettings,
    pool: &[MediaFile],
    picker: &mut dyn AdPicker,
) -> Vec<MediaFile> {
    if !settings.active || pool.is_empty() {
        return base.to_vec();
    }

    let mut out = Vec::with_capacity(base.len());
    let mut program_count: u32 = 0;
    let mut time_since_last_ad: f64 = 0.0;

    for program in base {
        out.push(program.clone());
        program_count += 1;
        if let Some(duration) = program.duration {
            time_since_last_ad += duration;
        }

        let triggered = match settings.rule {
            AdRule::ProgramCount => {
                if program_count >= settings.programs_per_ad {
                    program_count = 0;
                    true
                } else {
                    false
                }
            }
            AdRule::TimedInterval => {
                if time_since_last_ad >= f64::from(settings.interval_minutes) * 60.0 {
                    time_since_last_ad = 0.0;
                    true
                } else {
                    false
                }
            }
        };

        if triggered {
            for _ in 0..settings.ad_count {
                match picker.pick(pool) {
                    Some(ad) => out.push(ad.clone()),
                    None => break,
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::RoundRobinPicker;

    fn program(id: i64, duration: Option<f64>) -> MediaFile {
        MediaFile {
            id,
            path: format!("/tv/{}.mp4", id),
            file_name: format!("{}.mp4", id),
            title: format!("Program {}", id),
            summary: String::new(),
            category: boomstore::category::TV_SHOW.to_string(),
            show_name: String::new(),
            season: String::new(),
            episode: String::new(),
            duration,
            video_id: None,
            thumbnail: None,
        }
    }

    fn ad(id: i64) -> MediaFile {
        MediaFile {
            category: boomstore::category::AD_BUMP.to_string(),
            ..program(id, Some(15.0))
        }
    }

    fn settings(rule: AdRule) -> AdSettings {
        AdSettings {
            active: true,
            rule,
            programs_per_ad: 3,
            ad_count: 1,
            interval_minutes: 1,
        }
    }

    #[test]
    fn test_identity_when_inactive() {
        let base = vec![program(1, Some(40.0)), program(2, Some(40.0))];
        let pool = vec![ad(100)];
        let inactive = AdSettings {
            active: false,
            ..settings(AdRule::ProgramCount)
        };
        let out = materialize(&base, &inactive, &pool, &mut RoundRobinPicker::default());
        assert_eq!(out, base);
    }

    #[test]
    fn test_identity_when_pool_empty() {
        let base = vec![program(1, Some(40.0)), program(2, Some(40.0))];
        let out = materialize(
            &base,
            &settings(AdRule::ProgramCount),
            &[],
            &mut RoundRobinPicker::default(),
        );
        assert_eq!(out, base);
    }

    #[test]
    fn test_program_count_trigger_positions() {
        // 7 programmes, une pub toutes les 3 : coupures après #3 et #6
        let base: Vec<MediaFile> = (1..=7).map(|i| program(i, Some(60.0))).collect();
        let pool = vec![ad(100)];
        let out = materialize(
            &base,
            &settings(AdRule::ProgramCount),
            &pool,
            &mut RoundRobinPicker::default(),
        );

        let ids: Vec<i64> = out.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 100, 4, 5, 6, 100, 7]);
    }

    #[test]
    fn test_timed_interval_trigger_after_cumulative_duration() {
        // 60s d'intervalle, programmes de 40s : coupure après le 2e (80s >= 60s)
        let base = vec![program(1, Some(40.0)), program(2, Some(40.0))];
        let pool = vec![ad(100)];
        let out = materialize(
            &base,
            &settings(AdRule::TimedInterval),
            &pool,
            &mut RoundRobinPicker::default(),
        );

        let ids: Vec<i64> = out.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 100]);
    }

    #[test]
    fn test_null_duration_counts_for_program_count_only() {
        let base = vec![
            program(1, None),
            program(2, None),
            program(3, None),
            program(4, None),
        ];
        let pool = vec![ad(100)];

        // programCount : les durées absentes déclenchent quand même
        let out = materialize(
            &base,
            &settings(AdRule::ProgramCount),
            &pool,
            &mut RoundRobinPicker::default(),
        );
        assert_eq!(out.len(), 5);

        // timedInterval : jamais de coupure sans durée accumulée
        let out = materialize(
            &base,
            &settings(AdRule::TimedInterval),
            &pool,
            &mut RoundRobinPicker::default(),
        );
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_ad_count_inserts_multiple_ads() {
        let base: Vec<MediaFile> = (1..=3).map(|i| program(i, Some(60.0))).collect();
        let pool = vec![ad(100), ad(101)];
        let custom = AdSettings {
            ad_count: 2,
            ..settings(AdRule::ProgramCount)
        };
        let out = materialize(&base, &custom, &pool, &mut RoundRobinPicker::default());

        let ids: Vec<i64> = out.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 100, 101]);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let base = vec![program(1, Some(60.0)), program(2, Some(60.0)), program(3, Some(60.0))];
        let pool = vec![ad(100)];
        let base_before = base.clone();
        let pool_before = pool.clone();

        materialize(
            &base,
            &settings(AdRule::ProgramCount),
            &pool,
            &mut RoundRobinPicker::default(),
        );
        assert_eq!(base, base_before);
        assert_eq!(pool, pool_before);
    }
}
