//! System-wide default constants.
//!
//! Built-in values behind every `EngineConfig` default. Grouped by component
//! for easy discovery.

// ============================================================================
// Context Filter
// ============================================================================

/// Temperatures strictly below this (°C) select the winter band.
pub const WINTER_BELOW_C: f64 = 10.0;

/// Temperatures strictly above this (°C) select the summer band.
pub const SUMMER_ABOVE_C: f64 = 20.0;

/// A filtered pool smaller than this falls back to the full wardrobe.
pub const MIN_FILTERED_POOL: usize = 3;

/// Occasion that matches every situation.
pub const UNIVERSAL_OCCASION: &str = "casual";

// ============================================================================
// Outfit Composer
// ============================================================================

/// Chance of building around a dress when one is available.
pub const DRESS_PROBABILITY: f64 = 0.5;

/// Outerwear is only added below this temperature (°C).
pub const OUTERWEAR_BELOW_C: f64 = 20.0;

/// Chance of adding a second accessory.
pub const SECOND_ACCESSORY_PROBABILITY: f64 = 0.5;

/// A slot-based outfit with fewer items than this is replaced by a random pick.
pub const MIN_OUTFIT_ITEMS: usize = 2;

/// Random fallback outfit size range (inclusive).
pub const FALLBACK_MIN_ITEMS: usize = 2;
pub const FALLBACK_MAX_ITEMS: usize = 4;

// ============================================================================
// Analytics
// ============================================================================

/// Outfits not worn within this many days count as rarely worn.
pub const RARELY_WORN_DAYS: u32 = 30;

/// Longest accepted rarely-worn window (ten years).
pub const MAX_RARELY_WORN_DAYS: u32 = 3650;

/// Outfits logged more than this many times count as frequently worn.
pub const FREQUENTLY_WORN_THRESHOLD: usize = 3;

/// How many entries the most-worn item ranking reports.
pub const MOST_WORN_LIMIT: usize = 10;

/// How many outfits the weather-affinity scorer returns.
pub const WEATHER_PICKS: usize = 5;

// ============================================================================
// Weekly Planner
// ============================================================================

/// Days covered by one planning run.
pub const PLAN_HORIZON_DAYS: u32 = 7;

/// Longest horizon a single planning run accepts.
pub const MAX_PLAN_HORIZON_DAYS: u32 = 366;

/// The planner refuses to run with fewer outfits than this.
pub const PLAN_MIN_OUTFITS: usize = 7;

// ============================================================================
// Storage
// ============================================================================

/// Default wardrobe snapshot file read by the CLI.
pub const SNAPSHOT_PATH: &str = "wardrobe.json";
