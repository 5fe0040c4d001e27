//! Packer de ligne de temps BomCast
//!
//! Transforme la piste principale et la piste publicitaire en une suite
//! linéaire de segments horodatés. À la différence du matérialiseur par
//! chaîne, une coupure peut tomber au milieu d'un programme : le programme
//! est alors scindé en un segment avant coupure et un reliquat repris
//! après. La sélection publicitaire est un curseur round-robin, jamais un
//! tirage aléatoire : le M3U et l'EPG sont rendus depuis la même passe et
//! doivent décrire la même ligne de temps.

use crate::model::{AdOptions, ScheduledItem};

/// Une publicité retenue dans une coupure, éventuellement tronquée
#[derive(Debug, Clone, PartialEq)]
pub struct AdSlot {
    pub item: ScheduledItem,
    /// Durée effective dans la coupure (≤ durée nominale de la pub)
    pub duration: f64,
}

/// Un segment de la ligne de temps packée
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Tranche d'un programme de la piste principale
    Program {
        item: ScheduledItem,
        start_offset: f64,
        duration: f64,
    },
    /// Coupure publicitaire : occupe toujours son créneau nominal complet,
    /// même si les publicités retenues ne le remplissent pas
    AdBreak {
        start_offset: f64,
        duration: f64,
        ads: Vec<AdSlot>,
    },
}

impl Segment {
    pub fn start_offset(&self) -> f64 {
        match self {
            Segment::Program { start_offset, .. } | Segment::AdBreak { start_offset, .. } => {
                *start_offset
            }
        }
    }

    pub fn duration(&self) -> f64 {
        match self {
            Segment::Program { duration, .. } | Segment::AdBreak { duration, .. } => *duration,
        }
    }
}

/// Packe la piste principale autour des coupures publicitaires
///
/// `main_track` doit être trié par horaire de début, `ad_pool` dans l'ordre
/// d'insertion. `ceiling` borne la durée totale générée : aucun segment ne
/// démarre au-delà, et les items dont l'horaire d'origine dépasse la borne
/// sont ignorés d'emblée.
pub fn pack(
    main_track: &[ScheduledItem],
    ad_pool: &[ScheduledItem],
    options: &AdOptions,
    ceiling: f64,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: f64 = 0.0;
    let mut next_break = options.frequency;
    let mut cursor: usize = 0;

    for item in main_track {
        if item.start_time >= ceiling || current >= ceiling {
            break;
        }
        let mut remaining = item.duration;

        while options.enabled
            && !ad_pool.is_empty()
            && remaining > 0.0
            && current < ceiling
            && current + remaining > next_break
        {
            let until_break = next_break - current;
            if until_break > 0.0 {
                segments.push(Segment::Program {
                    item: item.clone(),
                    start_offset: current,
                    duration: until_break,
                });
            }
            current += until_break;
            remaining -= until_break;

            if remaining <= 0.0 || current >= ceiling {
                break;
            }

            segments.push(fill_ad_break(ad_pool, options, current, &mut cursor));
            current += options.duration;
            next_break = current + options.frequency;
        }

        if remaining > 0.0 && current < ceiling {
            segments.push(Segment::Program {
                item: item.clone(),
                start_offset: current,
                duration: remaining,
            });
            current += remaining;
        }
    }

    segments
}

/// Remplit une coupure au curseur round-robin courant
///
/// Une pub qui tient entière dans le budget restant est prise telle quelle ;
/// sinon elle est tronquée pour remplir exactement le reliquat (au plus une
/// troncature par coupure, puisqu'elle épuise le budget). Le balayage est
/// plafonné à deux tours de pool pour survivre à un pool entièrement
/// invalide (durées nulles).
fn fill_ad_break(
    ad_pool: &[ScheduledItem],
    options: &AdOptions,
    start_offset: f64,
    cursor: &mut usize,
) -> Segment {
    let mut ads = Vec::new();
    let mut filled: f64 = 0.0;
    let mut attempts = 0;

    while filled < options.duration && attempts < ad_pool.len() * 2 {
        let ad = &ad_pool[*cursor % ad_pool.len()];
        if ad.duration > 0.0 && filled + ad.duration <= options.duration {
            ads.push(AdSlot {
                item: ad.clone(),
                duration: ad.duration,
            });
            filled += ad.duration;
        } else if ad.duration > 0.0 {
            ads.push(AdSlot {
                item: ad.clone(),
                duration: options.duration - filled,
            });
            filled = options.duration;
        }
        // Les pubs sans durée exploitable sont sautées, curseur avancé
        *cursor += 1;
        attempts += 1;
    }

    Segment::AdBreak {
        start_offset,
        duration: options.duration,
        ads,
    }
}
