//! Weekly Planner
//!
//! Greedily assigns one outfit per day so that no clothing item is worn on
//! two different days of the horizon.
//!
//! The pass is first-fit over a shuffled outfit list. It can leave a day
//! empty even when some other assignment would fill every day; that is a
//! known limitation of the greedy approach, not something callers should
//! paper over.

use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{defaults, PlannerConfig};
use crate::types::{LogOrigin, Outfit, OutfitLog, PlannedDay, WeeklyPlan};

/// Activity tag written on planner-generated logs.
pub const PLANNED_ACTIVITY: &str = "ai-planned";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlannerError {
    #[error("weekly planning needs at least {required} outfits, wardrobe has {available}")]
    InsufficientOutfits { required: usize, available: usize },

    #[error("planning horizon of {requested} days exceeds the limit of {max}")]
    HorizonTooLong { requested: u32, max: u32 },

    #[error("day {offset} after {start} is outside the supported calendar")]
    DateOutOfRange { start: NaiveDate, offset: u32 },
}

/// Plan `cfg.horizon_days` days starting at `start`.
///
/// Outfits with no items are never assigned, and no outfit is used twice.
/// Every assigned day gets a synthetic `planned` wear log in the result; the
/// caller decides whether to persist them. Log ids are drawn from `rng`, so a
/// seeded generator reproduces the whole plan.
pub fn plan_week<R: Rng + ?Sized>(
    outfits: &[Outfit],
    start: NaiveDate,
    cfg: &PlannerConfig,
    rng: &mut R,
) -> Result<WeeklyPlan, PlannerError> {
    if cfg.horizon_days > defaults::MAX_PLAN_HORIZON_DAYS {
        return Err(PlannerError::HorizonTooLong {
            requested: cfg.horizon_days,
            max: defaults::MAX_PLAN_HORIZON_DAYS,
        });
    }
    if outfits.len() < cfg.min_outfits {
        return Err(PlannerError::InsufficientOutfits {
            required: cfg.min_outfits,
            available: outfits.len(),
        });
    }

    let mut candidates: Vec<&Outfit> = outfits.iter().filter(|o| !o.items.is_empty()).collect();
    candidates.shuffle(rng);

    let mut used_items: HashSet<&str> = HashSet::new();
    let mut assigned = vec![false; candidates.len()];
    let mut days = Vec::with_capacity(cfg.horizon_days as usize);
    let mut logs = Vec::new();

    for offset in 0..cfg.horizon_days {
        let date = start
            .checked_add_days(Days::new(u64::from(offset)))
            .ok_or(PlannerError::DateOutOfRange { start, offset })?;
        let pick = candidates.iter().enumerate().find(|(idx, outfit)| {
            !assigned[*idx] && outfit.items.iter().all(|id| !used_items.contains(id.as_str()))
        });

        let outfit_id = match pick {
            Some((idx, outfit)) => {
                assigned[idx] = true;
                used_items.extend(outfit.items.iter().map(String::as_str));
                logs.push(planned_log(outfit, date, rng));
                debug!(%date, outfit = %outfit.id, "Planned outfit");
                Some(outfit.id.clone())
            }
            None => {
                debug!(%date, "No outfit left without repeated items");
                None
            }
        };
        days.push(PlannedDay { date, outfit_id });
    }

    let plan = WeeklyPlan { days, logs };
    info!(
        start = %start,
        filled = plan.filled_days(),
        horizon = cfg.horizon_days,
        "Weekly plan generated"
    );
    Ok(plan)
}

fn planned_log<R: Rng + ?Sized>(outfit: &Outfit, date: NaiveDate, rng: &mut R) -> OutfitLog {
    let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
    OutfitLog {
        id: id.to_string(),
        outfit_id: outfit.id.clone(),
        date,
        time_of_day: None,
        weather: None,
        temperature: None,
        activity: Some(PLANNED_ACTIVITY.to_string()),
        origin: LogOrigin::Planned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    fn disjoint_outfits(n: usize) -> Vec<Outfit> {
        (0..n)
            .map(|i| {
                let top = format!("top{i}");
                let shoes = format!("shoes{i}");
                Outfit::new(format!("o{i}"), format!("Look {i}"), &[top.as_str(), shoes.as_str()])
            })
            .collect()
    }

    #[test]
    fn test_refuses_small_wardrobe() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = plan_week(&disjoint_outfits(6), start(), &PlannerConfig::default(), &mut rng)
            .unwrap_err();
        assert_eq!(err, PlannerError::InsufficientOutfits { required: 7, available: 6 });
    }

    #[test]
    fn test_fills_every_day_with_disjoint_outfits() {
        let mut rng = StdRng::seed_from_u64(1);
        let plan = plan_week(&disjoint_outfits(7), start(), &PlannerConfig::default(), &mut rng).unwrap();
        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.filled_days(), 7);
        assert_eq!(plan.logs.len(), 7);
        assert!(plan.logs.iter().all(|l| l.origin == LogOrigin::Planned));
        assert_eq!(plan.days[6].date, NaiveDate::from_ymd_opt(2024, 9, 8).unwrap());
        let distinct: HashSet<&str> = plan.days.iter().filter_map(|d| d.outfit_id.as_deref()).collect();
        assert_eq!(distinct.len(), 7);
    }

    #[test]
    fn test_shared_item_never_repeats() {
        let mut outfits = disjoint_outfits(8);
        outfits[2].items.push("belt".to_string());
        outfits[5].items.push("belt".to_string());

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = plan_week(&outfits, start(), &PlannerConfig::default(), &mut rng).unwrap();
            let chosen: Vec<&str> = plan.days.iter().filter_map(|d| d.outfit_id.as_deref()).collect();
            assert!(
                !(chosen.contains(&"o2") && chosen.contains(&"o5")),
                "seed {seed}: both belt outfits planned"
            );
            assert_eq!(plan.filled_days(), 7, "seed {seed}: 7 belt-free choices exist");
        }
    }

    #[test]
    fn test_empty_outfits_are_skipped() {
        let mut outfits = disjoint_outfits(3);
        outfits.extend((0..5).map(|i| Outfit::new(format!("empty{i}"), "Empty", &[])));
        let mut rng = StdRng::seed_from_u64(9);
        let plan = plan_week(&outfits, start(), &PlannerConfig::default(), &mut rng).unwrap();
        assert_eq!(plan.filled_days(), 3);
        assert!(plan.days[3..].iter().all(|d| d.outfit_id.is_none()));
    }

    #[test]
    fn test_seeded_plans_are_reproducible() {
        let outfits = disjoint_outfits(10);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            plan_week(&outfits, start(), &PlannerConfig::default(), &mut rng).unwrap()
        };
        let first = run(5);
        assert_eq!(first, run(5));
        assert_ne!(first.logs, run(6).logs);
    }

    #[test]
    fn test_planned_log_ids_are_valid_v4_uuids() {
        let mut rng = StdRng::seed_from_u64(3);
        let plan = plan_week(&disjoint_outfits(7), start(), &PlannerConfig::default(), &mut rng).unwrap();
        for log in &plan.logs {
            let id = uuid::Uuid::parse_str(&log.id).unwrap();
            assert_eq!(id.get_version_num(), 4);
        }
    }

    #[test]
    fn test_rejects_oversized_horizon() {
        let cfg = PlannerConfig {
            horizon_days: u32::MAX,
            min_outfits: 1,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let err = plan_week(&disjoint_outfits(3), start(), &cfg, &mut rng).unwrap_err();
        assert_eq!(
            err,
            PlannerError::HorizonTooLong {
                requested: u32::MAX,
                max: defaults::MAX_PLAN_HORIZON_DAYS
            }
        );
    }

    #[test]
    fn test_calendar_overflow_is_an_error() {
        let last = NaiveDate::MAX.checked_sub_days(Days::new(2)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err = plan_week(&disjoint_outfits(7), last, &PlannerConfig::default(), &mut rng).unwrap_err();
        assert_eq!(err, PlannerError::DateOutOfRange { start: last, offset: 3 });
    }
}
