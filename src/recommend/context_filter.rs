//! Narrows the wardrobe to items that suit today's weather and situation.

use tracing::debug;

use crate::config::ContextConfig;
use crate::types::{ClothingItem, SeasonBand, WeatherInfo};

/// Season band for a weather snapshot, using the configured band edges.
pub fn season_band(weather: &WeatherInfo, cfg: &ContextConfig) -> SeasonBand {
    SeasonBand::from_temperature(weather.temperature, cfg.winter_below_c, cfg.summer_above_c)
}

/// True when the situation should not filter anything.
pub fn is_open_situation(situation: Option<&str>) -> bool {
    situation.map_or(true, |s| {
        let s = s.trim();
        s.is_empty() || s.eq_ignore_ascii_case("all")
    })
}

/// Filter `pool` by season band and occasion.
///
/// Absent weather skips the season filter; an absent or `all` situation
/// skips the occasion filter. Items tagged with the universal occasion pass
/// any situation. When fewer than `min_pool_size` items survive, the whole
/// unfiltered pool is returned instead.
pub fn filter_pool<'a>(
    pool: &'a [ClothingItem],
    weather: Option<&WeatherInfo>,
    situation: Option<&str>,
    cfg: &ContextConfig,
) -> Vec<&'a ClothingItem> {
    let band = weather.map(|w| season_band(w, cfg));
    let occasion = situation
        .filter(|_| !is_open_situation(situation))
        .map(str::trim);

    let filtered: Vec<&ClothingItem> = pool
        .iter()
        .filter(|item| band.map_or(true, |b| b.admits(&item.seasons)))
        .filter(|item| {
            occasion.map_or(true, |o| {
                item.suits_occasion(o) || item.suits_occasion(&cfg.universal_occasion)
            })
        })
        .collect();

    if filtered.len() < cfg.min_pool_size {
        debug!(
            kept = filtered.len(),
            pool = pool.len(),
            floor = cfg.min_pool_size,
            band = ?band,
            situation = ?occasion,
            "Context filter too strict, relaxing to full pool"
        );
        return pool.iter().collect();
    }

    debug!(kept = filtered.len(), pool = pool.len(), band = ?band, "Context filter applied");
    filtered
}
