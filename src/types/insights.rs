//! Derived analytics records returned to the presentation layer.
//!
//! These borrow from the input snapshot; nothing here owns wardrobe data.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{ClothingItem, LogOrigin, Outfit, Season};

/// An outfit paired with how many wear logs reference it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutfitWearCount<'a> {
    pub outfit: &'a Outfit,
    pub count: usize,
}

/// A clothing item paired with how many logged wears included it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemWearCount<'a> {
    pub item: &'a ClothingItem,
    pub count: usize,
}

/// Per-season usage accumulated from wear logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonalInsight {
    pub season: Season,
    /// Logs whose outfit carries this season tag.
    pub wear_count: usize,
    /// Item ids worn in this season, flattened across logs (repeats kept).
    pub item_ids: Vec<String>,
}

/// Weather-affinity result for one outfit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredOutfit<'a> {
    pub outfit: &'a Outfit,
    /// Logs recorded under the same weather condition as today.
    pub score: usize,
}

/// Counts of wear logs broken down by their optional tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WearBreakdown {
    pub total_logs: usize,
    pub distinct_outfits: usize,
    /// Fraction of logs written by the planner, 0.0 with no logs.
    pub planned_share: f64,
    pub by_time_of_day: BTreeMap<String, usize>,
    pub by_activity: BTreeMap<String, usize>,
    pub by_origin: BTreeMap<LogOrigin, usize>,
}

/// Whole-wardrobe summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WardrobeOverview {
    pub total_items: usize,
    pub total_outfits: usize,
    /// Keyed by slot name ("top", "bottom", ...).
    pub items_per_slot: BTreeMap<String, usize>,
    pub unclassified_items: usize,
    pub favorite_items: usize,
    pub favorite_outfits: usize,
    /// Outfits none of whose item ids resolve anymore.
    pub hollow_outfits: Vec<String>,
    /// Items that never appear in a logged outfit.
    pub never_worn_items: Vec<String>,
}

/// Everything the insights dashboard shows, computed from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct InsightsReport<'a> {
    /// Reference day for the rarely-worn window.
    pub today: NaiveDate,
    pub overview: WardrobeOverview,
    pub rarely_worn: Vec<&'a Outfit>,
    pub frequently_worn: Vec<OutfitWearCount<'a>>,
    pub most_worn_items: Vec<ItemWearCount<'a>>,
    pub seasonal: Vec<SeasonalInsight>,
    pub breakdown: WearBreakdown,
}
