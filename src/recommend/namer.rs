//! Human-readable outfit labels: "<situation phrase> for <weather phrase>".

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::WeatherInfo;

/// Label used when the situation is absent or unknown.
pub const GENERIC_SITUATION: &str = "Versatile Look";
/// Label used when the weather is known but its condition is not.
pub const GENERIC_CONDITION: &str = "Seasonal Style";
/// Label used when there is no weather at all.
pub const NO_WEATHER: &str = "All-Weather";

const SITUATION_PHRASES: &[(&str, &[&str])] = &[
    ("casual", &["Casual Comfort", "Laid-Back Look", "Everyday Ease"]),
    ("formal", &["Formal Elegance", "Refined Ensemble", "Classic Formal"]),
    ("business", &["Business Ready", "Office Sharp", "Professional Polish"]),
    ("party", &["Party Ready", "Night Out Glam", "Celebration Style"]),
    ("date", &["Date Night", "Romantic Look", "Charming Date Style"]),
    ("travel", &["Travel Ready", "Journey Comfort"]),
];

const CONDITION_PHRASES: &[(&str, &[&str])] = &[
    ("clear", &["Sunny Days", "Clear Skies", "Bright Weather"]),
    ("cloudy", &["Cloudy Days", "Overcast Skies"]),
    ("rain", &["Rainy Days", "Drizzly Weather", "Showers"]),
    ("snow", &["Snowy Days", "Winter Wonderland"]),
    ("windy", &["Breezy Days", "Windy Weather"]),
];

/// Map a free-form provider condition onto one of the phrase-table keys.
///
/// "Light rain" and "drizzle" are rain, "overcast clouds" is cloudy,
/// "sunny" is clear. Returns `None` for anything else (fog, haze, ...).
pub fn condition_key(condition: &str) -> Option<&'static str> {
    let c = condition.trim().to_lowercase();
    if c.is_empty() {
        return None;
    }
    if c.contains("snow") || c.contains("sleet") || c.contains("blizzard") {
        Some("snow")
    } else if c.contains("rain") || c.contains("drizzle") || c.contains("shower") || c.contains("storm") {
        Some("rain")
    } else if c.contains("wind") || c.contains("breez") || c.contains("gust") {
        Some("windy")
    } else if c.contains("cloud") || c.contains("overcast") {
        Some("cloudy")
    } else if c.contains("clear") || c.contains("sun") {
        Some("clear")
    } else {
        None
    }
}

fn pick<R: Rng + ?Sized>(
    table: &[(&str, &'static [&'static str])],
    key: &str,
    rng: &mut R,
) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .and_then(|(_, phrases)| phrases.choose(rng).copied())
}

/// Build an outfit display name from the situation and weather.
pub fn name_outfit<R: Rng + ?Sized>(
    situation: Option<&str>,
    weather: Option<&WeatherInfo>,
    rng: &mut R,
) -> String {
    let situation_phrase = situation
        .map(|s| s.trim().to_lowercase())
        .and_then(|s| pick(SITUATION_PHRASES, &s, rng))
        .unwrap_or(GENERIC_SITUATION);

    let weather_phrase = match weather {
        None => NO_WEATHER,
        Some(w) => condition_key(&w.condition)
            .and_then(|key| pick(CONDITION_PHRASES, key, rng))
            .unwrap_or(GENERIC_CONDITION),
    };

    format!("{situation_phrase} for {weather_phrase}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_known_situation_and_condition() {
        let mut rng = StdRng::seed_from_u64(3);
        let weather = WeatherInfo::new(22.0, "Clear");
        let name = name_outfit(Some("Casual"), Some(&weather), &mut rng);
        let (left, right) = name.split_once(" for ").unwrap();
        assert!(["Casual Comfort", "Laid-Back Look", "Everyday Ease"].contains(&left));
        assert!(["Sunny Days", "Clear Skies", "Bright Weather"].contains(&right));
    }

    #[test]
    fn test_fallback_phrases() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(name_outfit(None, None, &mut rng), "Versatile Look for All-Weather");
        let fog = WeatherInfo::new(8.0, "fog");
        assert_eq!(
            name_outfit(Some("gala"), Some(&fog), &mut rng),
            "Versatile Look for Seasonal Style"
        );
    }

    #[test]
    fn test_condition_synonyms() {
        assert_eq!(condition_key("light rain"), Some("rain"));
        assert_eq!(condition_key("Overcast clouds"), Some("cloudy"));
        assert_eq!(condition_key("Sunny"), Some("clear"));
        assert_eq!(condition_key("snow showers"), Some("snow"));
        assert_eq!(condition_key("windy"), Some("windy"));
        assert_eq!(condition_key("haze"), None);
    }

    #[test]
    fn test_every_table_entry_has_choices() {
        for (_, phrases) in SITUATION_PHRASES.iter().chain(CONDITION_PHRASES) {
            assert!((2..=3).contains(&phrases.len()));
        }
    }
}
