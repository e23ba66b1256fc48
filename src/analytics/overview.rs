//! Whole-wardrobe summary for the dashboard header.

use std::collections::HashSet;

use crate::config::TaxonomyConfig;
use crate::taxonomy::{classify, Slot};
use crate::types::{ClothingItem, Outfit, OutfitLog, WardrobeOverview};

pub fn wardrobe_overview(
    items: &[ClothingItem],
    outfits: &[Outfit],
    logs: &[OutfitLog],
    taxonomy: &TaxonomyConfig,
) -> WardrobeOverview {
    let mut overview = WardrobeOverview {
        total_items: items.len(),
        total_outfits: outfits.len(),
        favorite_items: items.iter().filter(|i| i.favorite).count(),
        favorite_outfits: outfits.iter().filter(|o| o.favorite).count(),
        ..WardrobeOverview::default()
    };

    for slot in Slot::ALL {
        overview.items_per_slot.insert(slot.as_str().to_string(), 0);
    }
    for item in items {
        match classify(&item.kind, taxonomy) {
            Some(slot) => *overview.items_per_slot.entry(slot.as_str().to_string()).or_default() += 1,
            None => overview.unclassified_items += 1,
        }
    }

    overview.hollow_outfits = outfits
        .iter()
        .filter(|o| !o.is_displayable(items))
        .map(|o| o.id.clone())
        .collect();

    let logged: HashSet<&str> = logs.iter().map(|l| l.outfit_id.as_str()).collect();
    let worn_items: HashSet<&str> = outfits
        .iter()
        .filter(|o| logged.contains(o.id.as_str()))
        .flat_map(|o| o.items.iter().map(String::as_str))
        .collect();
    overview.never_worn_items = items
        .iter()
        .filter(|i| !worn_items.contains(i.id.as_str()))
        .map(|i| i.id.clone())
        .collect();

    overview
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_overview_counts() {
        let mut fav = ClothingItem::new("tee", "Tee", "t-shirt");
        fav.favorite = true;
        let items = vec![
            fav,
            ClothingItem::new("jeans", "Jeans", "jeans"),
            ClothingItem::new("kimono", "Kimono", "kimono"),
        ];
        let outfits = vec![
            Outfit::new("o1", "Basic", &["tee", "jeans"]),
            Outfit::new("o2", "Ghost", &["deleted"]),
        ];
        let logs = vec![OutfitLog::new("l1", "o1", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())];

        let overview = wardrobe_overview(&items, &outfits, &logs, &TaxonomyConfig::default());
        assert_eq!(overview.total_items, 3);
        assert_eq!(overview.favorite_items, 1);
        assert_eq!(overview.items_per_slot.get("top"), Some(&1));
        assert_eq!(overview.items_per_slot.get("dress"), Some(&0));
        assert_eq!(overview.unclassified_items, 1);
        assert_eq!(overview.hollow_outfits, vec!["o2".to_string()]);
        assert_eq!(overview.never_worn_items, vec!["kimono".to_string()]);
    }

    #[test]
    fn test_empty_wardrobe() {
        let overview = wardrobe_overview(&[], &[], &[], &TaxonomyConfig::default());
        assert_eq!(overview.total_items, 0);
        assert!(overview.never_worn_items.is_empty());
    }
}
