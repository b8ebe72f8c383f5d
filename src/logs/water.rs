use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::models::{from_fields, to_fields, LogType, UserId, WaterLog};
use crate::store::{DocPath, LogStore};

/// Daily fluid intake, tracked as a running total in liters.
pub struct WaterLogService {
    store: Arc<dyn LogStore>,
    user: UserId,
}

impl WaterLogService {
    pub fn new(store: Arc<dyn LogStore>, user: UserId) -> Self {
        Self { store, user }
    }

    fn path(&self, date: NaiveDate) -> Result<DocPath, StoreError> {
        DocPath::new(self.user.clone(), LogType::Water, date)
    }

    /// The day's total so far; 0 when nothing was logged.
    pub async fn total(&self, date: NaiveDate) -> Result<f64, StoreError> {
        let path = self.path(date)?;
        match self.store.get(&path).await? {
            Some(fields) => Ok(from_fields::<WaterLog>(&fields)?.total),
            None => Ok(0.0),
        }
    }

    /// Adds `liters` to the day's total (negative to undo a tap) and
    /// returns the new total. The total never goes below zero.
    pub async fn add(&self, date: NaiveDate, liters: f64) -> Result<f64, StoreError> {
        if !liters.is_finite() {
            return Err(StoreError::InvalidValue(format!(
                "water delta must be finite, got {}",
                liters
            )));
        }

        let current = self.total(date).await?;
        let next = (current + liters).max(0.0);
        self.set_total(date, next).await?;
        Ok(next)
    }

    /// Date-scoped edit: overwrites the day's total outright.
    pub async fn set_total(&self, date: NaiveDate, liters: f64) -> Result<(), StoreError> {
        if !liters.is_finite() || liters < 0.0 {
            return Err(StoreError::InvalidValue(format!(
                "water total must be a non-negative number, got {}",
                liters
            )));
        }

        let path = self.path(date)?;
        self.store
            .merge(&path, to_fields(&WaterLog { total: liters })?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> WaterLogService {
        WaterLogService::new(Arc::new(MemoryStore::new()), UserId::new("user-1").unwrap())
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[tokio::test]
    async fn test_total_defaults_to_zero() {
        let service = service();
        assert_eq!(service.total(date()).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_add_accumulates() {
        let service = service();
        assert_eq!(service.add(date(), 0.25).await.unwrap(), 0.25);
        assert_eq!(service.add(date(), 0.5).await.unwrap(), 0.75);
        assert_eq!(service.total(date()).await.unwrap(), 0.75);
    }

    #[tokio::test]
    async fn test_add_floors_at_zero() {
        let service = service();
        service.add(date(), 0.25).await.unwrap();
        assert_eq!(service.add(date(), -1.0).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_days_are_independent() {
        let service = service();
        let other = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();

        service.add(date(), 1.0).await.unwrap();
        assert_eq!(service.total(other).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_set_total_rejects_negative() {
        let service = service();
        let result = service.set_total(date(), -0.5).await;
        assert!(matches!(result, Err(StoreError::InvalidValue(_))));
    }

    #[tokio::test]
    async fn test_add_rejects_nan() {
        let service = service();
        let result = service.add(date(), f64::NAN).await;
        assert!(matches!(result, Err(StoreError::InvalidValue(_))));
    }
}
