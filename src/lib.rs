//! Wardrobe Engine: outfit recommendation and wardrobe analytics
//!
//! Turns a personal wardrobe (clothing items, saved outfits, wear history)
//! into outfit suggestions, usage statistics and a non-repeating weekly plan.
//!
//! ## Architecture
//!
//! - **Taxonomy**: maps free-form garment types onto outfit slots
//! - **Recommend**: context filter, slot-based composer and outfit namer
//! - **Analytics**: wear history, weather affinity and wardrobe overview
//! - **Planner**: greedy 7-day schedule without item repeats
//! - **Storage**: pluggable wardrobe store and weather source seams
//! - **Engine**: facade binding config to a store
//!
//! All randomness is injected: pass a seeded `StdRng` to reproduce results.

pub mod analytics;
pub mod config;
pub mod engine;
pub mod planner;
pub mod recommend;
pub mod storage;
pub mod taxonomy;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, EngineConfig};

// Re-export commonly used types
pub use types::{
    ClothingItem, InsightsReport, LogOrigin, Outfit, OutfitLog, Recommendation, Season,
    WeatherInfo, WeeklyPlan,
};

// Re-export engine components
pub use engine::{EngineError, WardrobeEngine};
pub use planner::{plan_week, PlannerError};
pub use recommend::recommend_outfit;
pub use storage::{
    InMemoryStore, JsonFileStore, StaticWeather, StoreError, WardrobeStore, WeatherSource,
};
pub use taxonomy::{classify, Slot};
