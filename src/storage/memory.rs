//! In-memory wardrobe store
//!
//! Thread-safe via `RwLock`. Not durable: data is lost when the store is
//! dropped.

use std::sync::RwLock;

use super::{record_wear, StoreError, WardrobeStore};
use crate::types::{ClothingItem, Outfit, OutfitLog};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: RwLock<Vec<ClothingItem>>,
    outfits: RwLock<Vec<Outfit>>,
    logs: RwLock<Vec<OutfitLog>>,
}

impl InMemoryStore {
    pub fn new(items: Vec<ClothingItem>, outfits: Vec<Outfit>, logs: Vec<OutfitLog>) -> Self {
        Self {
            items: RwLock::new(items),
            outfits: RwLock::new(outfits),
            logs: RwLock::new(logs),
        }
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Storage(e.to_string())
}

impl WardrobeStore for InMemoryStore {
    fn items(&self) -> Result<Vec<ClothingItem>, StoreError> {
        Ok(self.items.read().map_err(poisoned)?.clone())
    }

    fn outfits(&self) -> Result<Vec<Outfit>, StoreError> {
        Ok(self.outfits.read().map_err(poisoned)?.clone())
    }

    fn logs(&self) -> Result<Vec<OutfitLog>, StoreError> {
        Ok(self.logs.read().map_err(poisoned)?.clone())
    }

    fn append_log(&self, log: &OutfitLog) -> Result<(), StoreError> {
        // Lock order: outfits, then logs.
        let mut outfits = self.outfits.write().map_err(poisoned)?;
        record_wear(&mut outfits, log)?;
        self.logs.write().map_err(poisoned)?.push(log.clone());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "InMemory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn store() -> InMemoryStore {
        InMemoryStore::new(
            vec![ClothingItem::new("tee", "Tee", "t-shirt")],
            vec![Outfit::new("o1", "Basic", &["tee"])],
            Vec::new(),
        )
    }

    #[test]
    fn test_append_updates_outfit() {
        let store = store();
        let date = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        store.append_log(&OutfitLog::new("l1", "o1", date)).unwrap();

        let outfits = store.outfits().unwrap();
        assert_eq!(outfits[0].wear_count, 1);
        assert_eq!(outfits[0].last_worn.map(|t| t.date_naive()), Some(date));
        assert_eq!(store.logs().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_outfit_rejected_without_side_effects() {
        let store = store();
        let date = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let err = store.append_log(&OutfitLog::new("l1", "ghost", date)).unwrap_err();
        assert!(matches!(err, StoreError::UnknownOutfit(id) if id == "ghost"));
        assert!(store.logs().unwrap().is_empty());
    }

    #[test]
    fn test_trait_object() {
        let store: Box<dyn WardrobeStore> = Box::new(store());
        assert_eq!(store.backend_name(), "InMemory");
        assert_eq!(store.items().unwrap().len(), 1);
    }
}
