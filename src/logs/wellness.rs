use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::StoreError;
use crate::models::{from_fields, to_fields, LogType, UserId, WellnessLog};
use crate::store::{DocPath, LogStore};

/// Daily mood log: one categorical emoticon value per day, overwritten
/// on each update rather than accumulated.
pub struct WellnessLogService {
    store: Arc<dyn LogStore>,
    user: UserId,
}

impl WellnessLogService {
    pub fn new(store: Arc<dyn LogStore>, user: UserId) -> Self {
        Self { store, user }
    }

    fn path(&self, date: NaiveDate) -> Result<DocPath, StoreError> {
        DocPath::new(self.user.clone(), LogType::Wellness, date)
    }

    /// The day's logged mood, if any.
    pub async fn mood(&self, date: NaiveDate) -> Result<Option<WellnessLog>, StoreError> {
        let path = self.path(date)?;
        match self.store.get(&path).await? {
            Some(fields) => Ok(Some(from_fields(&fields)?)),
            None => Ok(None),
        }
    }

    /// Sets the day's mood. The first write stamps `timestamp`; later
    /// writes keep the original timestamp and stamp `updatedAt`.
    pub async fn set_mood(
        &self,
        date: NaiveDate,
        emoticon: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<WellnessLog, StoreError> {
        let emoticon = emoticon.into();
        if emoticon.trim().is_empty() {
            return Err(StoreError::InvalidValue("emoticon is empty".to_string()));
        }

        let log = match self.mood(date).await? {
            Some(existing) => WellnessLog {
                timestamp: existing.timestamp,
                emoticon_type: emoticon,
                updated_at: Some(at),
            },
            None => WellnessLog {
                timestamp: at,
                emoticon_type: emoticon,
                updated_at: None,
            },
        };

        let path = self.path(date)?;
        self.store.merge(&path, to_fields(&log)?).await?;
        Ok(log)
    }
}
