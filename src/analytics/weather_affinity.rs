//! Weather-affinity scoring: which outfits has the user actually worn in
//! weather like today's?

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::{ContextConfig, ScoringConfig};
use crate::recommend::season_band;
use crate::types::{Outfit, OutfitLog, ScoredOutfit, WeatherInfo};

/// Rank season-appropriate outfits for today's weather.
///
/// Score is the number of the outfit's logs recorded under the same
/// condition (case-insensitive). Higher scores first; within a tie,
/// never-worn outfits come first, then the least recently worn. At most
/// `top_n` outfits are returned. Unknown weather yields an empty list.
pub fn score_for_weather<'a>(
    outfits: &'a [Outfit],
    logs: &[OutfitLog],
    weather: Option<&WeatherInfo>,
    context: &ContextConfig,
    cfg: &ScoringConfig,
) -> Vec<ScoredOutfit<'a>> {
    let Some(weather) = weather else {
        return Vec::new();
    };
    let condition = weather.condition.trim().to_lowercase();
    let band = season_band(weather, context);

    let mut matches: HashMap<&str, usize> = HashMap::new();
    if !condition.is_empty() {
        for log in logs {
            let same = log
                .weather
                .as_deref()
                .is_some_and(|w| w.trim().to_lowercase() == condition);
            if same {
                *matches.entry(log.outfit_id.as_str()).or_default() += 1;
            }
        }
    }

    let mut scored: Vec<ScoredOutfit<'a>> = outfits
        .iter()
        .filter(|o| band.admits(&o.seasons))
        .map(|outfit| ScoredOutfit {
            outfit,
            score: matches.get(outfit.id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    scored.sort_by(rank);
    scored.truncate(cfg.top_n);

    tracing::debug!(
        condition = %condition,
        band = %band,
        returned = scored.len(),
        "Weather-affinity scoring complete"
    );
    scored
}

fn rank(a: &ScoredOutfit<'_>, b: &ScoredOutfit<'_>) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| match (a.outfit.last_worn, b.outfit.last_worn) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.cmp(&y),
        })
}
