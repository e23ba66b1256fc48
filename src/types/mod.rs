//! Shared data structures for the wardrobe engine
//!
//! - Input snapshot: ClothingItem, Outfit, OutfitLog, WeatherInfo
//! - Derived analytics: wear counts, seasonal insights, weather scores
//! - Outputs: Recommendation, WeeklyPlan

mod wardrobe;
mod insights;
mod plan;

pub use wardrobe::*;
pub use insights::*;
pub use plan::*;
