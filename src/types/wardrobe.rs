//! Wardrobe records: clothing items, outfits, wear logs and weather snapshots

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Season
// ============================================================================

/// Season tag carried by items and outfits.
///
/// `All` marks a piece that suits every season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    All,
}

impl Season {
    pub const ALL_TAGS: [Self; 5] = [
        Self::Spring,
        Self::Summer,
        Self::Autumn,
        Self::Winter,
        Self::All,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deserialize a season list, substituting `["all"]` for a missing or empty list.
fn seasons_or_all<'de, D>(deserializer: D) -> Result<Vec<Season>, D::Error>
where
    D: Deserializer<'de>,
{
    let seasons = Option::<Vec<Season>>::deserialize(deserializer)?.unwrap_or_default();
    if seasons.is_empty() {
        Ok(default_seasons())
    } else {
        Ok(seasons)
    }
}

fn default_seasons() -> Vec<Season> {
    vec![Season::All]
}

// ============================================================================
// Season Band
// ============================================================================

/// Temperature-derived season band used by the context filter and the
/// weather-affinity scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonBand {
    Winter,
    SpringAutumn,
    Summer,
}

impl SeasonBand {
    /// Derive the band for a temperature given the band edges.
    ///
    /// `< winter_below` is winter, `> summer_above` is summer, anything in
    /// between (inclusive) is spring/autumn.
    pub fn from_temperature(temperature: f64, winter_below: f64, summer_above: f64) -> Self {
        if temperature < winter_below {
            Self::Winter
        } else if temperature > summer_above {
            Self::Summer
        } else {
            Self::SpringAutumn
        }
    }

    /// True when a season list suits this band. `all` suits every band.
    pub fn admits(self, seasons: &[Season]) -> bool {
        seasons.iter().any(|s| match (self, s) {
            (_, Season::All)
            | (Self::Winter, Season::Winter)
            | (Self::Summer, Season::Summer)
            | (Self::SpringAutumn, Season::Spring | Season::Autumn) => true,
            _ => false,
        })
    }
}

impl fmt::Display for SeasonBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winter => f.write_str("winter"),
            Self::SpringAutumn => f.write_str("spring/autumn"),
            Self::Summer => f.write_str("summer"),
        }
    }
}

// ============================================================================
// Clothing Item
// ============================================================================

/// A single piece in the user's wardrobe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: String,
    pub name: String,
    /// Free-form garment type ("shirt", "jeans", ...). Never empty.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub material: String,
    #[serde(default = "default_seasons", deserialize_with = "seasons_or_all")]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub wear_count: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ClothingItem {
    /// Minimal constructor; seasons default to `all`, no occasions.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            color: String::new(),
            material: String::new(),
            seasons: default_seasons(),
            occasions: Vec::new(),
            favorite: false,
            wear_count: 0,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_seasons(mut self, seasons: &[Season]) -> Self {
        self.seasons = if seasons.is_empty() {
            default_seasons()
        } else {
            seasons.to_vec()
        };
        self
    }

    #[must_use]
    pub fn with_occasions(mut self, occasions: &[&str]) -> Self {
        self.occasions = occasions.iter().map(|o| (*o).to_string()).collect();
        self
    }

    /// Case-insensitive occasion membership.
    pub fn suits_occasion(&self, occasion: &str) -> bool {
        self.occasions
            .iter()
            .any(|o| o.trim().eq_ignore_ascii_case(occasion.trim()))
    }
}

// ============================================================================
// Outfit
// ============================================================================

/// A saved combination of clothing items.
///
/// `items` may reference pieces that were later deleted from the wardrobe;
/// lookups must tolerate that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default = "default_seasons", deserialize_with = "seasons_or_all")]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub wear_count: u32,
    #[serde(default)]
    pub last_worn: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Outfit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, items: &[&str]) -> Self {
        let mut ids: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            if !ids.iter().any(|existing| existing == item) {
                ids.push((*item).to_string());
            }
        }
        Self {
            id: id.into(),
            name: name.into(),
            items: ids,
            seasons: default_seasons(),
            occasions: Vec::new(),
            favorite: false,
            wear_count: 0,
            last_worn: None,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_seasons(mut self, seasons: &[Season]) -> Self {
        self.seasons = if seasons.is_empty() {
            default_seasons()
        } else {
            seasons.to_vec()
        };
        self
    }

    #[must_use]
    pub const fn with_last_worn(mut self, last_worn: Option<DateTime<Utc>>) -> Self {
        self.last_worn = last_worn;
        self
    }

    /// Items from `pool` referenced by this outfit, in outfit order.
    /// Ids that no longer resolve are skipped.
    pub fn resolve_items<'a>(&self, pool: &'a [ClothingItem]) -> Vec<&'a ClothingItem> {
        self.items
            .iter()
            .filter_map(|id| pool.iter().find(|item| &item.id == id))
            .collect()
    }

    /// An outfit with no resolvable items is kept but not shown.
    pub fn is_displayable(&self, pool: &[ClothingItem]) -> bool {
        self.items
            .iter()
            .any(|id| pool.iter().any(|item| &item.id == id))
    }

    /// Return a copy with the wear counter bumped and last-worn set from `log`.
    ///
    /// Last-worn only moves forward; back-dated logs still count as a wear.
    #[must_use]
    pub fn with_wear_recorded(&self, log: &OutfitLog) -> Self {
        let mut updated = self.clone();
        updated.wear_count = updated.wear_count.saturating_add(1);
        let worn_at = log.worn_at();
        if updated.last_worn.map_or(true, |prev| worn_at > prev) {
            updated.last_worn = Some(worn_at);
        }
        updated
    }
}

// ============================================================================
// Outfit Log
// ============================================================================

/// Where a wear log came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOrigin {
    /// Marked as worn by the user.
    #[default]
    Manual,
    /// Written by the weekly planner.
    Planned,
}

impl fmt::Display for LogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => f.write_str("manual"),
            Self::Planned => f.write_str("planned"),
        }
    }
}

/// A wear event: outfit `outfit_id` was worn on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitLog {
    pub id: String,
    pub outfit_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time_of_day: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub origin: LogOrigin,
}

impl OutfitLog {
    pub fn new(id: impl Into<String>, outfit_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            outfit_id: outfit_id.into(),
            date,
            time_of_day: None,
            weather: None,
            temperature: None,
            activity: None,
            origin: LogOrigin::Manual,
        }
    }

    #[must_use]
    pub fn with_weather(mut self, condition: impl Into<String>, temperature: Option<f64>) -> Self {
        self.weather = Some(condition.into());
        self.temperature = temperature;
        self
    }

    /// Log date at midnight UTC.
    pub fn worn_at(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }
}

// ============================================================================
// Weather
// ============================================================================

/// Current weather snapshot from the weather provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInfo {
    /// Degrees Celsius.
    pub temperature: f64,
    pub condition: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

impl WeatherInfo {
    pub fn new(temperature: f64, condition: impl Into<String>) -> Self {
        Self {
            temperature,
            condition: condition.into(),
            city: String::new(),
            country: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(SeasonBand::from_temperature(9.9, 10.0, 20.0), SeasonBand::Winter);
        assert_eq!(SeasonBand::from_temperature(10.0, 10.0, 20.0), SeasonBand::SpringAutumn);
        assert_eq!(SeasonBand::from_temperature(20.0, 10.0, 20.0), SeasonBand::SpringAutumn);
        assert_eq!(SeasonBand::from_temperature(20.5, 10.0, 20.0), SeasonBand::Summer);
    }

    #[test]
    fn test_band_admits_all() {
        assert!(SeasonBand::Winter.admits(&[Season::All]));
        assert!(SeasonBand::SpringAutumn.admits(&[Season::Autumn]));
        assert!(!SeasonBand::Summer.admits(&[Season::Winter, Season::Spring]));
    }

    #[test]
    fn test_missing_seasons_default_to_all() {
        let item: ClothingItem =
            serde_json::from_str(r#"{"id":"a","name":"Tee","type":"t-shirt"}"#).unwrap();
        assert_eq!(item.seasons, vec![Season::All]);

        let item: ClothingItem =
            serde_json::from_str(r#"{"id":"a","name":"Tee","type":"t-shirt","seasons":[]}"#)
                .unwrap();
        assert_eq!(item.seasons, vec![Season::All]);
    }

    #[test]
    fn test_resolve_items_skips_deleted() {
        let pool = vec![ClothingItem::new("a", "Tee", "t-shirt")];
        let outfit = Outfit::new("o1", "Look", &["gone", "a"]);
        let resolved = outfit.resolve_items(&pool);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "a");
        assert!(outfit.is_displayable(&pool));
        assert!(!Outfit::new("o2", "Ghost", &["gone"]).is_displayable(&pool));
    }

    #[test]
    fn test_outfit_new_dedupes_ids() {
        let outfit = Outfit::new("o1", "Look", &["a", "b", "a"]);
        assert_eq!(outfit.items, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_wear_recorded_leaves_original_untouched() {
        let outfit = Outfit::new("o1", "Look", &["a"]);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let updated = outfit.with_wear_recorded(&OutfitLog::new("l1", "o1", date));
        assert_eq!(outfit.wear_count, 0);
        assert!(outfit.last_worn.is_none());
        assert_eq!(updated.wear_count, 1);
        assert_eq!(updated.last_worn.map(|t| t.date_naive()), Some(date));

        let earlier = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let again = updated.with_wear_recorded(&OutfitLog::new("l0", "o1", earlier));
        assert_eq!(again.wear_count, 2);
        assert_eq!(again.last_worn.map(|t| t.date_naive()), Some(date));
    }
}
