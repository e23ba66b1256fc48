//! Recommendation and weekly-plan records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::OutfitLog;

/// A composed outfit suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Display label, e.g. "Casual Comfort for Sunny Days".
    pub name: String,
    /// Chosen item ids, duplicate-free, all drawn from the filtered pool.
    pub item_ids: Vec<String>,
}

/// One day of a weekly plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedDay {
    pub date: NaiveDate,
    /// `None` when no outfit without item overlap was left.
    pub outfit_id: Option<String>,
}

/// Result of a weekly planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub days: Vec<PlannedDay>,
    /// Synthetic wear logs for the assigned days, tagged `planned`.
    pub logs: Vec<OutfitLog>,
}

impl WeeklyPlan {
    pub fn filled_days(&self) -> usize {
        self.days.iter().filter(|d| d.outfit_id.is_some()).count()
    }
}
