//! Wear-history aggregation over (outfits, logs) snapshots.
//!
//! Every function tolerates dangling references: logs whose outfit is gone
//! and outfits listing deleted items are skipped, never reported as errors.

use chrono::{Days, NaiveDate};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::types::{
    ClothingItem, LogOrigin, Outfit, OutfitLog, OutfitWearCount, ItemWearCount, Season,
    SeasonalInsight, WearBreakdown,
};

/// Log count per outfit id.
pub fn log_counts(logs: &[OutfitLog]) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for log in logs {
        *counts.entry(log.outfit_id.as_str()).or_default() += 1;
    }
    counts
}

/// Most recent log date per outfit id.
pub fn latest_log_dates(logs: &[OutfitLog]) -> HashMap<&str, NaiveDate> {
    let mut latest: HashMap<&str, NaiveDate> = HashMap::new();
    for log in logs {
        latest
            .entry(log.outfit_id.as_str())
            .and_modify(|d| *d = (*d).max(log.date))
            .or_insert(log.date);
    }
    latest
}

fn outfit_index(outfits: &[Outfit]) -> HashMap<&str, &Outfit> {
    outfits.iter().map(|o| (o.id.as_str(), o)).collect()
}

/// Outfits with no logs, or whose latest log is older than `today - days`.
///
/// With no logs at all, every outfit is rarely worn. A window reaching past
/// the start of the calendar leaves only never-worn outfits.
pub fn rarely_worn<'a>(
    outfits: &'a [Outfit],
    logs: &[OutfitLog],
    days: u32,
    today: NaiveDate,
) -> Vec<&'a Outfit> {
    if logs.is_empty() {
        return outfits.iter().collect();
    }

    let cutoff = today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    let latest = latest_log_dates(logs);
    outfits
        .iter()
        .filter(|o| latest.get(o.id.as_str()).map_or(true, |d| *d < cutoff))
        .collect()
}

/// Outfits logged more than `threshold` times, most-worn first.
///
/// Ties keep the input order.
pub fn frequently_worn<'a>(
    outfits: &'a [Outfit],
    logs: &[OutfitLog],
    threshold: usize,
) -> Vec<OutfitWearCount<'a>> {
    let counts = log_counts(logs);
    let mut frequent: Vec<OutfitWearCount<'a>> = outfits
        .iter()
        .filter_map(|outfit| {
            let count = counts.get(outfit.id.as_str()).copied().unwrap_or(0);
            (count > threshold).then_some(OutfitWearCount { outfit, count })
        })
        .collect();
    frequent.sort_by(|a, b| b.count.cmp(&a.count));
    frequent
}

/// Items ranked by how many logged wears included them.
///
/// Item ids that no longer resolve to a wardrobe item are dropped. Ties are
/// ordered by item id.
pub fn most_worn_items<'a>(
    items: &'a [ClothingItem],
    outfits: &[Outfit],
    logs: &[OutfitLog],
) -> Vec<ItemWearCount<'a>> {
    let by_id = outfit_index(outfits);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for log in logs {
        let Some(outfit) = by_id.get(log.outfit_id.as_str()) else {
            continue;
        };
        for item_id in &outfit.items {
            *counts.entry(item_id.as_str()).or_default() += 1;
        }
    }

    let mut ranked: Vec<ItemWearCount<'a>> = items
        .iter()
        .filter_map(|item| {
            counts
                .get(item.id.as_str())
                .map(|&count| ItemWearCount { item, count })
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.item.id.cmp(&b.item.id)));
    ranked.dedup_by(|a, b| a.item.id == b.item.id);
    ranked
}

/// Per-season wear counts and worn item ids.
///
/// A log counts once for every season tag its outfit carries. Seasons with
/// no wear are omitted; output follows season order.
pub fn seasonal_insights(outfits: &[Outfit], logs: &[OutfitLog]) -> Vec<SeasonalInsight> {
    let by_id = outfit_index(outfits);
    let mut acc: BTreeMap<Season, SeasonalInsight> = BTreeMap::new();

    for log in logs {
        let Some(outfit) = by_id.get(log.outfit_id.as_str()) else {
            continue;
        };
        let mut seen: HashSet<Season> = HashSet::new();
        for &season in &outfit.seasons {
            if !seen.insert(season) {
                continue;
            }
            let insight = acc.entry(season).or_insert_with(|| SeasonalInsight {
                season,
                wear_count: 0,
                item_ids: Vec::new(),
            });
            insight.wear_count += 1;
            insight.item_ids.extend(outfit.items.iter().cloned());
        }
    }

    acc.into_values().collect()
}

/// Log counts by time of day, activity and origin, plus the planned share.
pub fn wear_breakdown(logs: &[OutfitLog]) -> WearBreakdown {
    let mut breakdown = WearBreakdown {
        total_logs: logs.len(),
        distinct_outfits: log_counts(logs).len(),
        planned_share: planned_share(logs),
        ..WearBreakdown::default()
    };

    for log in logs {
        if let Some(tag) = normalized_tag(log.time_of_day.as_deref()) {
            *breakdown.by_time_of_day.entry(tag).or_default() += 1;
        }
        if let Some(tag) = normalized_tag(log.activity.as_deref()) {
            *breakdown.by_activity.entry(tag).or_default() += 1;
        }
        *breakdown.by_origin.entry(log.origin).or_default() += 1;
    }
    breakdown
}

fn normalized_tag(tag: Option<&str>) -> Option<String> {
    tag.map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty())
}

/// Share of logs that were written by the planner rather than the user.
fn planned_share(logs: &[OutfitLog]) -> f64 {
    if logs.is_empty() {
        return 0.0;
    }
    let planned = logs.iter().filter(|l| l.origin == LogOrigin::Planned).count();
    planned as f64 / logs.len() as f64
}
