//! Shared data types: log type enumeration, per-day document shapes,
//! symptom entries and food items.

mod document;
mod food;
mod log_type;
mod symptom;

pub use document::{from_fields, to_fields, BowelLog, DailyLog, Fields, SymptomLog, WaterLog, WellnessLog};
pub use food::FoodItem;
pub use log_type::{LogType, MealCategory};
pub use symptom::{SymptomEntry, SymptomUpdate, MAX_INTENSITY};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Owner of a set of logs. Validated at construction so a missing user
/// id fails fast instead of producing a path like `users//waterLogs/..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Result<Self, StoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(StoreError::Config("user id is empty".to_string()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
