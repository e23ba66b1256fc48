//! Storage seams
//!
//! The engine never talks to a database directly. Wardrobe records come in
//! through [`WardrobeStore`] and current weather through [`WeatherSource`],
//! so backends can be swapped without touching recommendation or analytics
//! code:
//! - `InMemoryStore`: in-process store for tests and one-shot runs
//! - `JsonFileStore`: single JSON snapshot on disk, rewritten on every append

mod json_file;
mod memory;
mod weather;

pub use json_file::{JsonFileStore, WardrobeSnapshot};
pub use memory::InMemoryStore;
pub use weather::{StaticWeather, WeatherSource};

use crate::types::{ClothingItem, Outfit, OutfitLog};

/// Trait for pluggable wardrobe backends
///
/// Implementations must be thread-safe (Send + Sync) so one store can be
/// shared between request handlers.
pub trait WardrobeStore: Send + Sync {
    /// All clothing items
    fn items(&self) -> Result<Vec<ClothingItem>, StoreError>;

    /// All saved outfits
    fn outfits(&self) -> Result<Vec<Outfit>, StoreError>;

    /// Full wear history
    fn logs(&self) -> Result<Vec<OutfitLog>, StoreError>;

    /// Record a wear event.
    ///
    /// Bumps the outfit's wear counter and moves its last-worn timestamp
    /// forward. Fails with [`StoreError::UnknownOutfit`] when the log points
    /// at an outfit the store does not hold.
    fn append_log(&self, log: &OutfitLog) -> Result<(), StoreError>;

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("unknown outfit: {0}")]
    UnknownOutfit(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Apply a wear log to an outfit collection in place.
pub(crate) fn record_wear(outfits: &mut [Outfit], log: &OutfitLog) -> Result<(), StoreError> {
    let outfit = outfits
        .iter_mut()
        .find(|o| o.id == log.outfit_id)
        .ok_or_else(|| StoreError::UnknownOutfit(log.outfit_id.clone()))?;
    *outfit = outfit.with_wear_recorded(log);
    Ok(())
}
