//! Clothing taxonomy: maps free-form garment types onto functional slots.
//!
//! Classification is a table lookup over normalized type strings. An
//! unrecognized type simply has no slot; it stays displayable but takes no
//! part in slot-based composition.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::TaxonomyConfig;
use crate::types::ClothingItem;

/// Functional position an item fills in an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Top,
    Bottom,
    Dress,
    Outerwear,
    Footwear,
    Accessory,
}

impl Slot {
    pub const ALL: [Self; 6] = [
        Self::Top,
        Self::Bottom,
        Self::Dress,
        Self::Outerwear,
        Self::Footwear,
        Self::Accessory,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Dress => "dress",
            Self::Outerwear => "outerwear",
            Self::Footwear => "footwear",
            Self::Accessory => "accessory",
        }
    }

    fn keywords(self, taxonomy: &TaxonomyConfig) -> &[String] {
        match self {
            Self::Top => &taxonomy.top,
            Self::Bottom => &taxonomy.bottom,
            Self::Dress => &taxonomy.dress,
            Self::Outerwear => &taxonomy.outerwear,
            Self::Footwear => &taxonomy.footwear,
            Self::Accessory => &taxonomy.accessory,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-case, trim, and fold `_` / whitespace runs into single `-`.
///
/// "T Shirt", "t_shirt" and " T-SHIRT " all become "t-shirt".
pub fn normalize_type(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for ch in raw.trim().chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            pending_dash = !out.is_empty();
        } else {
            if pending_dash {
                out.push('-');
                pending_dash = false;
            }
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Slot for a garment type, or `None` when the type is not recognized.
pub fn classify(kind: &str, taxonomy: &TaxonomyConfig) -> Option<Slot> {
    let normalized = normalize_type(kind);
    if normalized.is_empty() {
        return None;
    }

    let exact = Slot::ALL.into_iter().find(|slot| {
        slot.keywords(taxonomy)
            .iter()
            .any(|k| normalize_type(k) == normalized)
    });
    if exact.is_some() {
        return exact;
    }

    taxonomy
        .accessory_keywords
        .iter()
        .map(|k| normalize_type(k))
        .any(|k| !k.is_empty() && normalized.contains(&k))
        .then_some(Slot::Accessory)
}

/// Items grouped by slot, each bucket in pool order.
#[derive(Debug, Default)]
pub struct SlotBuckets<'a> {
    pub top: Vec<&'a ClothingItem>,
    pub bottom: Vec<&'a ClothingItem>,
    pub dress: Vec<&'a ClothingItem>,
    pub outerwear: Vec<&'a ClothingItem>,
    pub footwear: Vec<&'a ClothingItem>,
    pub accessory: Vec<&'a ClothingItem>,
    /// Items whose type matched no slot.
    pub unclassified: Vec<&'a ClothingItem>,
}

impl<'a> SlotBuckets<'a> {
    pub fn get(&self, slot: Slot) -> &[&'a ClothingItem] {
        match slot {
            Slot::Top => &self.top,
            Slot::Bottom => &self.bottom,
            Slot::Dress => &self.dress,
            Slot::Outerwear => &self.outerwear,
            Slot::Footwear => &self.footwear,
            Slot::Accessory => &self.accessory,
        }
    }

    fn get_mut(&mut self, slot: Slot) -> &mut Vec<&'a ClothingItem> {
        match slot {
            Slot::Top => &mut self.top,
            Slot::Bottom => &mut self.bottom,
            Slot::Dress => &mut self.dress,
            Slot::Outerwear => &mut self.outerwear,
            Slot::Footwear => &mut self.footwear,
            Slot::Accessory => &mut self.accessory,
        }
    }
}

/// Group a pool into slot buckets.
pub fn bucket_by_slot<'a, I>(pool: I, taxonomy: &TaxonomyConfig) -> SlotBuckets<'a>
where
    I: IntoIterator<Item = &'a ClothingItem>,
{
    let mut buckets = SlotBuckets::default();
    for item in pool {
        match classify(&item.kind, taxonomy) {
            Some(slot) => buckets.get_mut(slot).push(item),
            None => buckets.unclassified.push(item),
        }
    }
    buckets
}
