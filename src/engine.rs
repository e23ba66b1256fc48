//! Wardrobe Engine facade
//!
//! Binds an [`EngineConfig`] to a [`WardrobeStore`] so callers do not have to
//! thread config sections through every analytics call. Read-only views work
//! on a [`WardrobeSnapshot`] taken once per request and borrow from it;
//! operations that write (planning) go through the store.

use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::analytics;
use crate::config::EngineConfig;
use crate::planner::{self, PlannerError};
use crate::recommend;
use crate::storage::{StoreError, WardrobeSnapshot, WardrobeStore, WeatherSource};
use crate::types::{
    InsightsReport, ItemWearCount, Outfit, OutfitWearCount, Recommendation, ScoredOutfit,
    SeasonalInsight, WardrobeOverview, WearBreakdown, WeatherInfo, WeeklyPlan,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Planner(#[from] PlannerError),
}

pub struct WardrobeEngine<S: WardrobeStore> {
    config: EngineConfig,
    store: S,
}

impl<S: WardrobeStore> WardrobeEngine<S> {
    pub fn new(config: EngineConfig, store: S) -> Self {
        info!(backend = store.backend_name(), "Wardrobe engine ready");
        Self { config, store }
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load items, outfits and logs in one go.
    pub fn snapshot(&self) -> Result<WardrobeSnapshot, StoreError> {
        Ok(WardrobeSnapshot {
            items: self.store.items()?,
            outfits: self.store.outfits()?,
            logs: self.store.logs()?,
        })
    }

    /// Ask a weather source about the profile's home location.
    pub fn current_weather(&self, source: &dyn WeatherSource) -> Option<WeatherInfo> {
        let profile = &self.config.profile;
        let weather = source.current(&profile.city, &profile.country);
        if weather.is_none() {
            warn!(city = %profile.city, "Weather unavailable, continuing without it");
        }
        weather
    }

    /// Compose one outfit from the stored wardrobe.
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        weather: Option<&WeatherInfo>,
        situation: Option<&str>,
        rng: &mut R,
    ) -> Result<Option<Recommendation>, StoreError> {
        let items = self.store.items()?;
        Ok(recommend::recommend_outfit(
            &items,
            weather,
            situation,
            &self.config,
            rng,
        ))
    }

    /// Saved outfits ranked for today's weather.
    pub fn todays_picks<'s>(
        &self,
        snapshot: &'s WardrobeSnapshot,
        weather: Option<&WeatherInfo>,
    ) -> Vec<ScoredOutfit<'s>> {
        analytics::score_for_weather(
            &snapshot.outfits,
            &snapshot.logs,
            weather,
            &self.config.context,
            &self.config.scoring,
        )
    }

    pub fn rarely_worn<'s>(&self, snapshot: &'s WardrobeSnapshot, today: NaiveDate) -> Vec<&'s Outfit> {
        analytics::rarely_worn(
            &snapshot.outfits,
            &snapshot.logs,
            self.config.analytics.rarely_worn_days,
            today,
        )
    }

    pub fn frequently_worn<'s>(&self, snapshot: &'s WardrobeSnapshot) -> Vec<OutfitWearCount<'s>> {
        analytics::frequently_worn(
            &snapshot.outfits,
            &snapshot.logs,
            self.config.analytics.frequently_worn_threshold,
        )
    }

    /// Top items by logged wears, capped at `analytics.most_worn_limit`.
    pub fn most_worn_items<'s>(&self, snapshot: &'s WardrobeSnapshot) -> Vec<ItemWearCount<'s>> {
        let mut ranked =
            analytics::most_worn_items(&snapshot.items, &snapshot.outfits, &snapshot.logs);
        ranked.truncate(self.config.analytics.most_worn_limit);
        ranked
    }

    pub fn seasonal_insights(&self, snapshot: &WardrobeSnapshot) -> Vec<SeasonalInsight> {
        analytics::seasonal_insights(&snapshot.outfits, &snapshot.logs)
    }

    pub fn overview(&self, snapshot: &WardrobeSnapshot) -> WardrobeOverview {
        analytics::wardrobe_overview(
            &snapshot.items,
            &snapshot.outfits,
            &snapshot.logs,
            &self.config.taxonomy,
        )
    }

    pub fn breakdown(&self, snapshot: &WardrobeSnapshot) -> WearBreakdown {
        analytics::wear_breakdown(&snapshot.logs)
    }

    /// All dashboard analytics in one report.
    pub fn insights<'s>(&self, snapshot: &'s WardrobeSnapshot, today: NaiveDate) -> InsightsReport<'s> {
        InsightsReport {
            today,
            overview: self.overview(snapshot),
            rarely_worn: self.rarely_worn(snapshot, today),
            frequently_worn: self.frequently_worn(snapshot),
            most_worn_items: self.most_worn_items(snapshot),
            seasonal: self.seasonal_insights(snapshot),
            breakdown: self.breakdown(snapshot),
        }
    }

    /// Plan the coming days and record each planned wear in the store.
    ///
    /// Logs are written one at a time; if the store fails part-way, the
    /// logs already written stay written and the error is returned.
    pub fn plan_week<R: Rng + ?Sized>(
        &self,
        start: NaiveDate,
        rng: &mut R,
    ) -> Result<WeeklyPlan, EngineError> {
        let outfits = self.store.outfits()?;
        let plan = planner::plan_week(&outfits, start, &self.config.planner, rng)?;
        for log in &plan.logs {
            self.store.append_log(log)?;
        }
        info!(
            written = plan.logs.len(),
            backend = self.store.backend_name(),
            "Planned wear logs recorded"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryStore, StaticWeather};
    use crate::types::{ClothingItem, LogOrigin, OutfitLog};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    fn engine(outfit_count: usize) -> WardrobeEngine<InMemoryStore> {
        let items: Vec<ClothingItem> = (0..outfit_count)
            .map(|i| ClothingItem::new(format!("i{i}"), format!("Item {i}"), "shirt"))
            .collect();
        let outfits: Vec<Outfit> = (0..outfit_count)
            .map(|i| {
                let id = format!("i{i}");
                Outfit::new(format!("o{i}"), format!("Look {i}"), &[id.as_str()])
            })
            .collect();
        let logs = vec![
            OutfitLog::new("l1", "o0", day(1)),
            OutfitLog::new("l2", "o0", day(2)),
        ];
        WardrobeEngine::new(EngineConfig::default(), InMemoryStore::new(items, outfits, logs))
    }

    #[test]
    fn test_plan_week_writes_logs() {
        let engine = engine(8);
        let mut rng = StdRng::seed_from_u64(3);
        let plan = engine.plan_week(day(7), &mut rng).unwrap();
        assert_eq!(plan.filled_days(), 7);

        let logs = engine.store().logs().unwrap();
        assert_eq!(logs.len(), 2 + 7);
        assert_eq!(logs.iter().filter(|l| l.origin == LogOrigin::Planned).count(), 7);
        let worn: u32 = engine.store().outfits().unwrap().iter().map(|o| o.wear_count).sum();
        assert_eq!(worn, 7);
    }

    #[test]
    fn test_plan_week_precondition_writes_nothing() {
        let engine = engine(3);
        let mut rng = StdRng::seed_from_u64(3);
        let err = engine.plan_week(day(7), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Planner(PlannerError::InsufficientOutfits { available: 3, .. })
        ));
        assert_eq!(engine.store().logs().unwrap().len(), 2);
    }

    #[test]
    fn test_insights_report() {
        let engine = engine(4);
        let snapshot = engine.snapshot().unwrap();
        let report = engine.insights(&snapshot, day(20));
        assert_eq!(report.overview.total_items, 4);
        // o0 was worn within the last 30 days; the rest never were
        let rare: Vec<&str> = report.rarely_worn.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(rare, vec!["o1", "o2", "o3"]);
        assert_eq!(report.most_worn_items.len(), 1);
        assert_eq!(report.most_worn_items[0].count, 2);
        assert_eq!(report.breakdown.total_logs, 2);
    }

    #[test]
    fn test_current_weather_uses_profile() {
        let mut config = EngineConfig::default();
        config.profile.city = "Lyon".to_string();
        let engine = WardrobeEngine::new(config, InMemoryStore::default());
        let source = StaticWeather::new(Some(WeatherInfo::new(18.0, "cloudy")));
        assert_eq!(engine.current_weather(&source).unwrap().city, "Lyon");
        assert!(engine.current_weather(&StaticWeather::unknown()).is_none());
    }
}
