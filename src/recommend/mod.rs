//! Outfit Recommendation
//!
//! Filters the wardrobe by weather and situation, fills slots from what is
//! left, and labels the result. Randomness is always supplied by the caller
//! so a seeded RNG reproduces the same outfit.

pub mod composer;
pub mod context_filter;
pub mod namer;

pub use composer::compose_outfit;
pub use context_filter::{filter_pool, season_band};
pub use namer::name_outfit;

use rand::Rng;
use tracing::info;

use crate::config::EngineConfig;
use crate::types::{ClothingItem, Recommendation, WeatherInfo};

/// Recommend one outfit for the given context.
///
/// Returns `None` only when the wardrobe is empty; callers should prompt the
/// user to add items first.
pub fn recommend_outfit<R: Rng + ?Sized>(
    items: &[ClothingItem],
    weather: Option<&WeatherInfo>,
    situation: Option<&str>,
    config: &EngineConfig,
    rng: &mut R,
) -> Option<Recommendation> {
    if items.is_empty() {
        return None;
    }

    let pool = filter_pool(items, weather, situation, &config.context);
    let item_ids = compose_outfit(
        &pool,
        weather.map(|w| w.temperature),
        &config.taxonomy,
        &config.composer,
        rng,
    );
    let name = name_outfit(situation, weather, rng);

    info!(
        name = %name,
        items = item_ids.len(),
        pool = pool.len(),
        "Outfit recommended"
    );
    Some(Recommendation { name, item_ids })
}
