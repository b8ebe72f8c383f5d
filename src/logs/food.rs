use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::models::{from_fields, to_fields, FoodItem, MealCategory, UserId};
use crate::store::{ItemPath, LogStore};

/// Itemized food log. Items are appended per meal category and deleted
/// individually; nothing is merged.
pub struct FoodLogService {
    store: Arc<dyn LogStore>,
    user: UserId,
}

impl FoodLogService {
    pub fn new(store: Arc<dyn LogStore>, user: UserId) -> Self {
        Self { store, user }
    }

    fn path(&self, date: NaiveDate, meal: MealCategory) -> ItemPath {
        ItemPath::new(self.user.clone(), date, meal)
    }

    /// Appends one item to the day's meal category and returns its id.
    /// The item's own date must match the collection it goes into.
    pub async fn add(
        &self,
        date: NaiveDate,
        meal: MealCategory,
        item: FoodItem,
    ) -> Result<String, StoreError> {
        if item.date != date {
            return Err(StoreError::InvalidValue(format!(
                "item is dated {} but targets the {} collection",
                item.date, date
            )));
        }

        let path = self.path(date, meal);
        self.store.add_item(&path, to_fields(&item)?).await
    }

    /// The day's items for one meal category, in insertion order.
    pub async fn items(
        &self,
        date: NaiveDate,
        meal: MealCategory,
    ) -> Result<Vec<FoodItem>, StoreError> {
        let path = self.path(date, meal);
        let records = self.store.list_items(&path).await?;
        records
            .iter()
            .map(|record| from_fields(&record.fields))
            .collect()
    }

    /// Deletes every item whose name matches `name` exactly, from that
    /// day and meal category only. Returns how many were removed.
    pub async fn delete_by_name(
        &self,
        date: NaiveDate,
        meal: MealCategory,
        name: &str,
    ) -> Result<usize, StoreError> {
        let path = self.path(date, meal);
        let records = self.store.list_items(&path).await?;

        let mut removed = 0;
        for record in records {
            let matches = record
                .fields
                .get("name")
                .and_then(|v| v.as_str())
                .is_some_and(|n| n == name);
            if matches {
                self.store.remove_item(&path, &record.id).await?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
