//! Engine Configuration - every tunable constant as a TOML value
//!
//! Slot keyword tables, season-band edges, composer probabilities, analytics
//! thresholds and planner limits all live here. Each struct implements
//! `Default` with the built-in values from `defaults.rs`, so an absent or
//! empty config file behaves exactly like the stock engine.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use super::validation;
use crate::taxonomy::normalize_type;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "WARDROBE_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "wardrobe_config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config rejected: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Root configuration for the wardrobe engine.
///
/// Every section and key is optional; missing ones take the values in
/// `defaults.rs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Owner display info and weather location
    #[serde(default)]
    pub profile: ProfileInfo,

    /// Garment type → slot keyword tables
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,

    /// Season band edges and pool relaxation floor
    #[serde(default)]
    pub context: ContextConfig,

    /// Slot filling probabilities and fallback sizing
    #[serde(default)]
    pub composer: ComposerConfig,

    /// Wear-history thresholds
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Weather-affinity scorer
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Weekly planner limits
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Snapshot storage
    #[serde(default)]
    pub store: StoreConfig,
}

impl EngineConfig {
    /// The config file to read, if any.
    ///
    /// `$WARDROBE_CONFIG` wins when set, even if the file is missing (the
    /// load then fails loudly instead of silently picking another file).
    /// Otherwise `./wardrobe_config.toml` is used when it exists.
    pub fn locate() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        local.is_file().then_some(local)
    }

    /// Load the located config file, or built-in defaults.
    ///
    /// A file that cannot be read or is rejected by validation is logged and
    /// replaced by the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::locate() else {
            info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
            return Self::default();
        };
        match Self::load_from_file(&path) {
            Ok(config) => {
                info!(path = %path.display(), profile = %config.profile.name, "Loaded engine config");
                config
            }
            Err(e) => {
                warn!(error = %e, "Ignoring engine config, using built-in defaults");
                Self::default()
            }
        }
    }

    /// Read, parse and validate one TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents, path)
    }

    /// Parse and validate TOML text. `origin` only labels errors.
    ///
    /// Unknown keys are logged, never rejected.
    pub fn from_toml(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        for w in validation::unknown_keys(contents) {
            warn!(key = w.key(), "{w}");
        }
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check values for internal consistency.
    ///
    /// Hard errors are collected and returned together. Range warnings from
    /// `validation::check_ranges` are only logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        // Context bands
        let c = &self.context;
        if !c.winter_below_c.is_finite() || !c.summer_above_c.is_finite() {
            errors.push(format!(
                "context: band edges must be finite (got winter_below_c={}, summer_above_c={})",
                c.winter_below_c, c.summer_above_c
            ));
        } else if c.winter_below_c > c.summer_above_c {
            errors.push(format!(
                "context.winter_below_c ({:.1}) must be <= summer_above_c ({:.1})",
                c.winter_below_c, c.summer_above_c
            ));
        }
        if c.min_pool_size == 0 {
            errors.push("context.min_pool_size must be > 0".to_string());
        }
        if c.universal_occasion.trim().is_empty() {
            errors.push("context.universal_occasion must not be empty".to_string());
        }

        // Composer
        let comp = &self.composer;
        check_probability(comp.dress_probability, "composer.dress_probability", &mut errors);
        check_probability(
            comp.second_accessory_probability,
            "composer.second_accessory_probability",
            &mut errors,
        );
        if !comp.outerwear_below_c.is_finite() {
            errors.push("composer.outerwear_below_c must be finite".to_string());
        }
        if comp.min_outfit_items == 0 {
            errors.push("composer.min_outfit_items must be > 0".to_string());
        }
        if comp.fallback_min_items == 0 {
            errors.push("composer.fallback_min_items must be > 0".to_string());
        }
        if comp.fallback_min_items > comp.fallback_max_items {
            errors.push(format!(
                "composer.fallback_min_items ({}) must be <= fallback_max_items ({})",
                comp.fallback_min_items, comp.fallback_max_items
            ));
        }

        // Analytics windows are subtracted from calendar dates
        if self.analytics.rarely_worn_days > defaults::MAX_RARELY_WORN_DAYS {
            errors.push(format!(
                "analytics.rarely_worn_days ({}) must be <= {}",
                self.analytics.rarely_worn_days,
                defaults::MAX_RARELY_WORN_DAYS
            ));
        }

        // Scoring and planning
        if self.scoring.top_n == 0 {
            errors.push("scoring.top_n must be > 0".to_string());
        }
        if self.planner.horizon_days == 0 {
            errors.push("planner.horizon_days must be > 0".to_string());
        } else if self.planner.horizon_days > defaults::MAX_PLAN_HORIZON_DAYS {
            errors.push(format!(
                "planner.horizon_days ({}) must be <= {}",
                self.planner.horizon_days,
                defaults::MAX_PLAN_HORIZON_DAYS
            ));
        }
        if self.planner.min_outfits == 0 {
            errors.push("planner.min_outfits must be > 0".to_string());
        }

        // Taxonomy: a keyword may only map to one slot, compared the way
        // item types are matched
        let mut seen: HashSet<String> = HashSet::new();
        for (slot, keyword) in self.taxonomy.entries() {
            let key = normalize_type(keyword);
            if key.is_empty() {
                errors.push(format!("taxonomy.{slot} contains an empty keyword"));
            } else if !seen.insert(key.clone()) {
                errors.push(format!("taxonomy: keyword '{key}' is listed under more than one slot"));
            }
        }

        let (range_errors, range_warnings) = validation::check_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!(key = w.key(), "{w}");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn check_probability(value: f64, name: &str, errors: &mut Vec<String>) {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        errors.push(format!("{name} must be within [0, 1] (got {value})"));
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Owner metadata. Not used for logic; city/country feed the weather lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInfo {
    #[serde(default = "default_profile_name")]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

fn default_profile_name() -> String {
    "default".to_string()
}

impl Default for ProfileInfo {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            city: String::new(),
            country: String::new(),
        }
    }
}

// ============================================================================
// Taxonomy
// ============================================================================

/// Garment type keywords per functional slot.
///
/// Types are matched after normalization (lower-case, `_` and spaces folded
/// to `-`). `accessory_keywords` is a substring rule applied last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    #[serde(default = "default_top")]
    pub top: Vec<String>,
    #[serde(default = "default_bottom")]
    pub bottom: Vec<String>,
    #[serde(default = "default_dress")]
    pub dress: Vec<String>,
    #[serde(default = "default_outerwear")]
    pub outerwear: Vec<String>,
    #[serde(default = "default_footwear")]
    pub footwear: Vec<String>,
    #[serde(default = "default_accessory")]
    pub accessory: Vec<String>,
    #[serde(default = "default_accessory_keywords")]
    pub accessory_keywords: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}
fn default_top() -> Vec<String> {
    words(&["shirt", "t-shirt", "blouse", "sweater", "hoodie", "top"])
}
fn default_bottom() -> Vec<String> {
    words(&["pants", "jeans", "shorts", "skirt", "leggings"])
}
fn default_dress() -> Vec<String> {
    words(&["dress", "jumpsuit"])
}
fn default_outerwear() -> Vec<String> {
    words(&["jacket", "coat", "blazer", "cardigan"])
}
fn default_footwear() -> Vec<String> {
    words(&["shoes", "sneakers", "boots", "sandals", "heels"])
}
fn default_accessory() -> Vec<String> {
    words(&["hat", "scarf", "gloves", "belt", "bag", "jewelry", "sunglasses"])
}
fn default_accessory_keywords() -> Vec<String> {
    words(&["accessory", "bag", "jewelry", "scarf", "belt"])
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            top: default_top(),
            bottom: default_bottom(),
            dress: default_dress(),
            outerwear: default_outerwear(),
            footwear: default_footwear(),
            accessory: default_accessory(),
            accessory_keywords: default_accessory_keywords(),
        }
    }
}

impl TaxonomyConfig {
    /// Exact-match tables as (slot name, keyword) pairs.
    /// The substring keywords are not included.
    fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("top", &self.top),
            ("bottom", &self.bottom),
            ("dress", &self.dress),
            ("outerwear", &self.outerwear),
            ("footwear", &self.footwear),
            ("accessory", &self.accessory),
        ]
        .into_iter()
        .flat_map(|(slot, list)| list.iter().map(move |k| (slot, k.as_str())))
    }
}

// ============================================================================
// Context Filter
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Below this (°C) only winter/all items qualify.
    #[serde(default = "default_winter_below")]
    pub winter_below_c: f64,

    /// Above this (°C) only summer/all items qualify.
    #[serde(default = "default_summer_above")]
    pub summer_above_c: f64,

    /// Filter results smaller than this are discarded for the full pool.
    #[serde(default = "default_min_pool")]
    pub min_pool_size: usize,

    /// Occasion tag treated as suitable for any situation.
    #[serde(default = "default_universal_occasion")]
    pub universal_occasion: String,
}

const fn default_winter_below() -> f64 {
    defaults::WINTER_BELOW_C
}
const fn default_summer_above() -> f64 {
    defaults::SUMMER_ABOVE_C
}
const fn default_min_pool() -> usize {
    defaults::MIN_FILTERED_POOL
}
fn default_universal_occasion() -> String {
    defaults::UNIVERSAL_OCCASION.to_string()
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            winter_below_c: default_winter_below(),
            summer_above_c: default_summer_above(),
            min_pool_size: default_min_pool(),
            universal_occasion: default_universal_occasion(),
        }
    }
}

// ============================================================================
// Composer
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposerConfig {
    #[serde(default = "default_dress_probability")]
    pub dress_probability: f64,

    /// Outerwear is added only when the known temperature is below this (°C).
    #[serde(default = "default_outerwear_below")]
    pub outerwear_below_c: f64,

    #[serde(default = "default_second_accessory_probability")]
    pub second_accessory_probability: f64,

    /// Slot-based results smaller than this trigger the random fallback.
    #[serde(default = "default_min_outfit_items")]
    pub min_outfit_items: usize,

    #[serde(default = "default_fallback_min")]
    pub fallback_min_items: usize,

    #[serde(default = "default_fallback_max")]
    pub fallback_max_items: usize,
}

const fn default_dress_probability() -> f64 {
    defaults::DRESS_PROBABILITY
}
const fn default_outerwear_below() -> f64 {
    defaults::OUTERWEAR_BELOW_C
}
const fn default_second_accessory_probability() -> f64 {
    defaults::SECOND_ACCESSORY_PROBABILITY
}
const fn default_min_outfit_items() -> usize {
    defaults::MIN_OUTFIT_ITEMS
}
const fn default_fallback_min() -> usize {
    defaults::FALLBACK_MIN_ITEMS
}
const fn default_fallback_max() -> usize {
    defaults::FALLBACK_MAX_ITEMS
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            dress_probability: default_dress_probability(),
            outerwear_below_c: default_outerwear_below(),
            second_accessory_probability: default_second_accessory_probability(),
            min_outfit_items: default_min_outfit_items(),
            fallback_min_items: default_fallback_min(),
            fallback_max_items: default_fallback_max(),
        }
    }
}

// ============================================================================
// Analytics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_rarely_worn_days")]
    pub rarely_worn_days: u32,

    #[serde(default = "default_frequently_worn_threshold")]
    pub frequently_worn_threshold: usize,

    #[serde(default = "default_most_worn_limit")]
    pub most_worn_limit: usize,
}

const fn default_rarely_worn_days() -> u32 {
    defaults::RARELY_WORN_DAYS
}
const fn default_frequently_worn_threshold() -> usize {
    defaults::FREQUENTLY_WORN_THRESHOLD
}
const fn default_most_worn_limit() -> usize {
    defaults::MOST_WORN_LIMIT
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            rarely_worn_days: default_rarely_worn_days(),
            frequently_worn_threshold: default_frequently_worn_threshold(),
            most_worn_limit: default_most_worn_limit(),
        }
    }
}

// ============================================================================
// Scoring
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

const fn default_top_n() -> usize {
    defaults::WEATHER_PICKS
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { top_n: default_top_n() }
    }
}

// ============================================================================
// Planner
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,

    #[serde(default = "default_min_outfits")]
    pub min_outfits: usize,
}

const fn default_horizon_days() -> u32 {
    defaults::PLAN_HORIZON_DAYS
}
const fn default_min_outfits() -> usize {
    defaults::PLAN_MIN_OUTFITS
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            min_outfits: default_min_outfits(),
        }
    }
}

// ============================================================================
// Store
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON snapshot holding items, outfits and logs.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

fn default_snapshot_path() -> String {
    defaults::SNAPSHOT_PATH.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok(), "Default config must always validate");
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let config: EngineConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(config.context.winter_below_c, 10.0);
        assert_eq!(config.context.summer_above_c, 20.0);
        assert_eq!(config.context.min_pool_size, 3);
        assert_eq!(config.composer.dress_probability, 0.5);
        assert_eq!(config.scoring.top_n, 5);
        assert_eq!(config.planner.min_outfits, 7);
        assert!(config.taxonomy.footwear.contains(&"sneakers".to_string()));
    }

    #[test]
    fn test_partial_toml_override() {
        let toml_str = r#"
[profile]
name = "Sam"

[analytics]
rarely_worn_days = 14
"#;
        let config: EngineConfig = toml::from_str(toml_str).expect("partial TOML should parse");
        assert_eq!(config.profile.name, "Sam");
        assert_eq!(config.analytics.rarely_worn_days, 14);
        // Non-overridden values retain defaults
        assert_eq!(config.analytics.frequently_worn_threshold, 3);
        assert_eq!(config.composer.fallback_max_items, 4);
    }

    #[test]
    fn test_validation_catches_inverted_bands() {
        let mut config = EngineConfig::default();
        config.context.winter_below_c = 25.0;
        config.context.summer_above_c = 15.0;
        let result = config.validate();
        assert!(result.is_err(), "Inverted bands should fail validation");
        if let Err(ConfigError::Validation(errors)) = result {
            assert!(errors.iter().any(|e| e.contains("winter_below_c")));
        }
    }

    #[test]
    fn test_validation_catches_bad_probability() {
        let mut config = EngineConfig::default();
        config.composer.dress_probability = 1.5;
        assert!(config.validate().is_err());
        config.composer.dress_probability = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_catches_inverted_fallback_range() {
        let mut config = EngineConfig::default();
        config.composer.fallback_min_items = 5;
        config.composer.fallback_max_items = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_catches_duplicate_keyword() {
        let mut config = EngineConfig::default();
        config.taxonomy.bottom.push("Shirt".to_string());
        let result = config.validate();
        if let Err(ConfigError::Validation(errors)) = result {
            assert!(errors.iter().any(|e| e.contains("'shirt'")));
        } else {
            panic!("duplicate keyword should fail validation");
        }
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = EngineConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.taxonomy, config.taxonomy);
        assert_eq!(parsed.planner, config.planner);
    }

    #[test]
    fn test_duplicate_keyword_uses_type_normalization() {
        let mut config = EngineConfig::default();
        config.taxonomy.bottom.push("T Shirt".to_string());
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("'t-shirt'")), "{errors:?}");
            }
            other => panic!("'T Shirt' collides with 't-shirt', got {other:?}"),
        }
    }

    #[test]
    fn test_validation_bounds_calendar_windows() {
        let mut config = EngineConfig::default();
        config.analytics.rarely_worn_days = 200_000_000;
        config.planner.horizon_days = u32::MAX;
        let Err(ConfigError::Validation(errors)) = config.validate() else {
            panic!("oversized windows must be rejected");
        };
        assert!(errors.iter().any(|e| e.starts_with("analytics.rarely_worn_days")));
        assert!(errors.iter().any(|e| e.starts_with("planner.horizon_days")));

        config.analytics.rarely_worn_days = defaults::MAX_RARELY_WORN_DAYS;
        config.planner.horizon_days = defaults::MAX_PLAN_HORIZON_DAYS;
        config.planner.min_outfits = defaults::MAX_PLAN_HORIZON_DAYS as usize;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = EngineConfig::from_toml(
            "[scoring]\ntop_n = 0\n[planner]\nmin_outfits = 0\n",
            Path::new("inline.toml"),
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("config rejected: "));
        assert!(message.contains("scoring.top_n") && message.contains("planner.min_outfits"));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = EngineConfig::from_toml("[planner\n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
