use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::models::{
    from_fields, to_fields, LogType, SymptomEntry, SymptomLog, SymptomUpdate, UserId,
    MAX_INTENSITY,
};
use crate::store::{DocPath, LogStore};

/// Merges an incoming batch of symptom updates into a day's existing
/// array, upserting by symptom key.
///
/// Entries already in storage but absent from the batch are kept as-is.
/// Callers today resend the full symptom catalogue on every slider
/// change, but this function does not depend on that: partial batches
/// never drop stored symptoms. An update without an intensity records
/// the symptom at 0. The result never contains two entries with the
/// same key, and applying the same batch twice yields the same array.
pub fn merge_symptoms(existing: &[SymptomEntry], incoming: &[SymptomUpdate]) -> Vec<SymptomEntry> {
    let mut merged = existing.to_vec();

    for update in incoming {
        let intensity = update.intensity.unwrap_or(0);
        match merged.iter_mut().find(|e| e.symptom == update.symptom) {
            Some(entry) => entry.intensity = intensity,
            None => merged.push(SymptomEntry::new(update.symptom.clone(), intensity)),
        }
    }

    merged
}

/// Daily symptom intensity log.
pub struct SymptomLogService {
    store: Arc<dyn LogStore>,
    user: UserId,
}

impl SymptomLogService {
    pub fn new(store: Arc<dyn LogStore>, user: UserId) -> Self {
        Self { store, user }
    }

    fn path(&self, date: NaiveDate) -> Result<DocPath, StoreError> {
        DocPath::new(self.user.clone(), LogType::Symptoms, date)
    }

    /// The day's symptom array; empty when nothing was logged.
    pub async fn symptoms(&self, date: NaiveDate) -> Result<Vec<SymptomEntry>, StoreError> {
        let path = self.path(date)?;
        match self.store.get(&path).await? {
            Some(fields) => Ok(from_fields::<SymptomLog>(&fields)?.symptoms),
            None => Ok(Vec::new()),
        }
    }

    /// Applies a batch of updates and writes back the merged array.
    /// Returns the array as persisted.
    pub async fn update(
        &self,
        date: NaiveDate,
        batch: &[SymptomUpdate],
    ) -> Result<Vec<SymptomEntry>, StoreError> {
        for update in batch {
            if update.symptom.trim().is_empty() {
                return Err(StoreError::InvalidValue("symptom key is empty".to_string()));
            }
            if let Some(intensity) = update.intensity {
                if intensity > MAX_INTENSITY {
                    return Err(StoreError::InvalidValue(format!(
                        "intensity {} for '{}' exceeds {}",
                        intensity, update.symptom, MAX_INTENSITY
                    )));
                }
            }
        }

        let existing = self.symptoms(date).await?;
        let merged = merge_symptoms(&existing, batch);

        let path = self.path(date)?;
        self.store
            .merge(
                &path,
                to_fields(&SymptomLog {
                    symptoms: merged.clone(),
                })?,
            )
            .await?;
        Ok(merged)
    }
}
