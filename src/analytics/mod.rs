//! Wardrobe Analytics
//!
//! Derives usage statistics from a snapshot of outfits and wear logs:
//! rarely/frequently worn outfits, most-worn items, seasonal usage, weather
//! affinity and an overall wardrobe summary. Entirely read-only.

pub mod overview;
pub mod weather_affinity;
pub mod wear_history;

pub use overview::wardrobe_overview;
pub use weather_affinity::score_for_weather;
pub use wear_history::{
    frequently_worn, most_worn_items, rarely_worn, seasonal_insights, wear_breakdown,
};
