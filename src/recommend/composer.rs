//! Slot-based outfit composition with a random fallback.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::config::{ComposerConfig, TaxonomyConfig};
use crate::taxonomy::bucket_by_slot;
use crate::types::ClothingItem;

/// Compose one outfit from an already-filtered pool.
///
/// Steps:
/// 1. Dress (with `dress_probability`, when one exists) or top + bottom
/// 2. Outerwear when the known temperature is below `outerwear_below_c`
/// 3. Footwear
/// 4. One accessory, sometimes a second distinct one
///
/// Outerwear needs a reading: with no temperature the step is skipped, the
/// same as on a warm day. Treating an unknown temperature as cold would put a
/// coat on every weatherless recommendation, and the context filter already
/// leaves season bands alone in that case.
///
/// If fewer than `min_outfit_items` were chosen, the slot result is dropped
/// and a random 2-4 item prefix of the shuffled pool is returned instead.
/// The result is empty only for an empty pool.
pub fn compose_outfit<R: Rng + ?Sized>(
    pool: &[&ClothingItem],
    temperature: Option<f64>,
    taxonomy: &TaxonomyConfig,
    cfg: &ComposerConfig,
    rng: &mut R,
) -> Vec<String> {
    if pool.is_empty() {
        return Vec::new();
    }

    let buckets = bucket_by_slot(pool.iter().copied(), taxonomy);
    let mut chosen: Vec<&ClothingItem> = Vec::with_capacity(6);

    let wants_dress = rng.gen_bool(cfg.dress_probability);
    if wants_dress && !buckets.dress.is_empty() {
        chosen.extend(buckets.dress.choose(rng).copied());
    } else {
        chosen.extend(buckets.top.choose(rng).copied());
        chosen.extend(buckets.bottom.choose(rng).copied());
    }

    if temperature.is_some_and(|t| t < cfg.outerwear_below_c) {
        chosen.extend(buckets.outerwear.choose(rng).copied());
    }

    chosen.extend(buckets.footwear.choose(rng).copied());

    if !buckets.accessory.is_empty() {
        let wants_second = rng.gen_bool(cfg.second_accessory_probability);
        let take = if wants_second && buckets.accessory.len() >= 2 { 2 } else { 1 };
        chosen.extend(buckets.accessory.choose_multiple(rng, take).copied());
    }

    let mut ids = dedup_ids(chosen);
    if ids.len() < cfg.min_outfit_items {
        ids = random_fallback(pool, cfg, rng);
        debug!(picked = ids.len(), pool = pool.len(), "Slot composition too thin, using random fallback");
    } else {
        debug!(picked = ids.len(), pool = pool.len(), "Composed outfit from slots");
    }
    ids
}

/// Shuffle the pool and take a random-length prefix.
fn random_fallback<R: Rng + ?Sized>(
    pool: &[&ClothingItem],
    cfg: &ComposerConfig,
    rng: &mut R,
) -> Vec<String> {
    let mut shuffled: Vec<&ClothingItem> = pool.to_vec();
    shuffled.shuffle(rng);

    let low = cfg.fallback_min_items.max(1);
    let high = cfg.fallback_max_items.max(low);
    let count = rng.gen_range(low..=high).min(shuffled.len());

    // Duplicate ids in the pool would shrink the prefix; keep drawing until
    // `count` distinct ids are collected or the pool runs out.
    let mut ids: Vec<String> = Vec::with_capacity(count);
    for item in shuffled {
        if ids.len() == count {
            break;
        }
        if !ids.contains(&item.id) {
            ids.push(item.id.clone());
        }
    }
    ids
}

fn dedup_ids(items: Vec<&ClothingItem>) -> Vec<String> {
    let mut ids: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !ids.contains(&item.id) {
            ids.push(item.id.clone());
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn item(id: &str, kind: &str) -> ClothingItem {
        ClothingItem::new(id, id, kind)
    }

    fn compose(pool: &[ClothingItem], temperature: Option<f64>, seed: u64) -> Vec<String> {
        let refs: Vec<&ClothingItem> = pool.iter().collect();
        let mut rng = StdRng::seed_from_u64(seed);
        compose_outfit(
            &refs,
            temperature,
            &TaxonomyConfig::default(),
            &ComposerConfig::default(),
            &mut rng,
        )
    }

    fn full_wardrobe() -> Vec<ClothingItem> {
        vec![
            item("top1", "shirt"),
            item("top2", "sweater"),
            item("bot1", "jeans"),
            item("bot2", "skirt"),
            item("dress1", "dress"),
            item("coat1", "coat"),
            item("shoe1", "sneakers"),
            item("shoe2", "boots"),
            item("acc1", "hat"),
            item("acc2", "belt"),
            item("acc3", "bag"),
        ]
    }

    #[test]
    fn test_empty_pool_gives_empty_outfit() {
        assert!(compose(&[], Some(10.0), 1).is_empty());
    }

    #[test]
    fn test_outfits_are_valid_across_seeds() {
        let pool = full_wardrobe();
        let pool_ids: HashSet<&str> = pool.iter().map(|i| i.id.as_str()).collect();
        for seed in 0..200 {
            let outfit = compose(&pool, Some(12.0), seed);
            assert!(outfit.len() >= 2, "seed {seed}: {outfit:?}");
            let unique: HashSet<&String> = outfit.iter().collect();
            assert_eq!(unique.len(), outfit.len(), "seed {seed}: duplicates in {outfit:?}");
            assert!(outfit.iter().all(|id| pool_ids.contains(id.as_str())));

            let has_dress = outfit.iter().any(|id| id == "dress1");
            let has_top = outfit.iter().any(|id| id.starts_with("top"));
            let has_bottom = outfit.iter().any(|id| id.starts_with("bot"));
            assert!(has_dress ^ (has_top && has_bottom), "seed {seed}: {outfit:?}");
            assert!(outfit.iter().any(|id| id == "coat1"), "cold day needs outerwear");
            assert_eq!(outfit.iter().filter(|id| id.starts_with("shoe")).count(), 1);
            let accessories = outfit.iter().filter(|id| id.starts_with("acc")).count();
            assert!((1..=2).contains(&accessories));
        }
    }

    #[test]
    fn test_no_outerwear_when_warm_or_unknown() {
        let pool = full_wardrobe();
        for seed in 0..50 {
            assert!(!compose(&pool, Some(25.0), seed).contains(&"coat1".to_string()));
            assert!(!compose(&pool, None, seed).contains(&"coat1".to_string()));
        }
    }

    #[test]
    fn test_outerwear_threshold_is_strict() {
        let pool = full_wardrobe();
        for seed in 0..50 {
            assert!(compose(&pool, Some(19.9), seed).contains(&"coat1".to_string()));
            assert!(!compose(&pool, Some(20.0), seed).contains(&"coat1".to_string()));
        }
    }

    #[test]
    fn test_dress_and_separates_both_occur() {
        let pool = full_wardrobe();
        let outfits: Vec<Vec<String>> = (0..100).map(|s| compose(&pool, None, s)).collect();
        assert!(outfits.iter().any(|o| o.contains(&"dress1".to_string())));
        assert!(outfits.iter().any(|o| o.contains(&"top1".to_string()) || o.contains(&"top2".to_string())));
    }

    #[test]
    fn test_fallback_for_unclassified_pool() {
        let pool = vec![
            item("a", "kimono"),
            item("b", "poncho"),
            item("c", "sari"),
            item("d", "cape"),
            item("e", "obi"),
        ];
        for seed in 0..50 {
            let outfit = compose(&pool, None, seed);
            assert!((2..=4).contains(&outfit.len()), "seed {seed}: {outfit:?}");
        }
    }

    #[test]
    fn test_single_item_pool_returns_that_item() {
        let pool = vec![item("only", "shirt")];
        assert_eq!(compose(&pool, None, 7), vec!["only".to_string()]);
    }

    #[test]
    fn test_same_seed_same_outfit() {
        let pool = full_wardrobe();
        assert_eq!(compose(&pool, Some(5.0), 42), compose(&pool, Some(5.0), 42));
    }
}
