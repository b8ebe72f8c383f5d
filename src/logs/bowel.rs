use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::models::{from_fields, to_fields, BowelLog, LogType, UserId};
use crate::store::{DocPath, LogStore};

/// Daily bowel movement log. `total` is an incrementing count of
/// movements for the day.
pub struct BowelLogService {
    store: Arc<dyn LogStore>,
    user: UserId,
}

impl BowelLogService {
    pub fn new(store: Arc<dyn LogStore>, user: UserId) -> Self {
        Self { store, user }
    }

    fn path(&self, date: NaiveDate) -> Result<DocPath, StoreError> {
        DocPath::new(self.user.clone(), LogType::Bowel, date)
    }

    /// The day's movement count; 0 when nothing was logged.
    pub async fn count(&self, date: NaiveDate) -> Result<u32, StoreError> {
        let path = self.path(date)?;
        match self.store.get(&path).await? {
            Some(fields) => Ok(from_fields::<BowelLog>(&fields)?.total),
            None => Ok(0),
        }
    }

    /// Records one movement and returns the new count.
    pub async fn record(&self, date: NaiveDate) -> Result<u32, StoreError> {
        let next = self.count(date).await?.saturating_add(1);
        self.set_count(date, next).await?;
        Ok(next)
    }

    /// Removes one recorded movement (a mis-tap); saturates at zero.
    pub async fn undo(&self, date: NaiveDate) -> Result<u32, StoreError> {
        let next = self.count(date).await?.saturating_sub(1);
        self.set_count(date, next).await?;
        Ok(next)
    }

    /// Date-scoped edit: overwrites the day's count outright.
    pub async fn set_count(&self, date: NaiveDate, count: u32) -> Result<(), StoreError> {
        let path = self.path(date)?;
        self.store
            .merge(&path, to_fields(&BowelLog { total: count })?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> BowelLogService {
        BowelLogService::new(Arc::new(MemoryStore::new()), UserId::new("user-1").unwrap())
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[tokio::test]
    async fn test_count_defaults_to_zero() {
        let service = service();
        assert_eq!(service.count(date()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_record_increments() {
        let service = service();
        assert_eq!(service.record(date()).await.unwrap(), 1);
        assert_eq!(service.record(date()).await.unwrap(), 2);
        assert_eq!(service.count(date()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_undo_saturates_at_zero() {
        let service = service();
        assert_eq!(service.undo(date()).await.unwrap(), 0);

        service.record(date()).await.unwrap();
        assert_eq!(service.undo(date()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_count_edits_past_day() {
        let service = service();
        let past = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();

        service.set_count(past, 3).await.unwrap();
        assert_eq!(service.count(past).await.unwrap(), 3);
        assert_eq!(service.count(date()).await.unwrap(), 0);
    }
}
