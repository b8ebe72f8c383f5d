use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One logged food item. Items are appended individually to a day's
/// meal category and deleted by exact name match, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub quantity: f64,
    #[serde(rename = "type")]
    pub item_type: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}

impl FoodItem {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        item_type: impl Into<String>,
        date: NaiveDate,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            brand: None,
            quantity,
            item_type: item_type.into(),
            date,
            timestamp,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }
}
