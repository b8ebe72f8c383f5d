//! Weekly view reconstruction.
//!
//! Rebuilds a fixed Monday..Sunday window from whatever per-day
//! documents exist, filling gaps deterministically: numeric aggregates
//! default to 0 for missing days, wellness days without a logged mood
//! are simply excluded (absence is not a mood).

use std::sync::Arc;

use chrono::{Days, NaiveDate, Weekday};

use crate::error::StoreError;
use crate::models::{DailyLog, LogType, UserId, WellnessLog};
use crate::ranking::{rank_by_frequency, Ranking};
use crate::store::{DocPath, LogStore};

/// The log types with a numeric per-day aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericLog {
    Water,
    Bowel,
}

impl From<NumericLog> for LogType {
    fn from(log: NumericLog) -> Self {
        match log {
            NumericLog::Water => LogType::Water,
            NumericLog::Bowel => LogType::Bowel,
        }
    }
}

/// One day of a weekly window.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// A reconstructed ISO week: exactly 7 entries, Monday..Sunday,
/// ascending, one per calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyWindow {
    entries: Vec<DayTotal>,
}

impl WeeklyWindow {
    pub fn entries(&self) -> &[DayTotal] {
        &self.entries
    }

    pub fn start(&self) -> NaiveDate {
        self.entries[0].date
    }

    pub fn end(&self) -> NaiveDate {
        self.entries[6].date
    }

    /// Sum of the 7 daily totals.
    pub fn week_total(&self) -> f64 {
        self.entries.iter().map(|e| e.total).sum()
    }
}

/// A logged mood on one day of the week.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub emoticon: String,
}

/// The 7 dates of the ISO week containing `reference`, ascending.
pub fn week_days(reference: NaiveDate) -> Vec<NaiveDate> {
    let monday = reference.week(Weekday::Mon).first_day();
    (0..7u64)
        .map(|offset| monday + Days::new(offset))
        .collect()
}

/// Pull-based weekly view builder; issues one store read per day.
pub struct WeeklyAggregator {
    store: Arc<dyn LogStore>,
}

impl WeeklyAggregator {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self { store }
    }

    /// The 7-day window for a numeric log type. Days without a
    /// document report 0, not an error and not a missing entry.
    pub async fn numeric_week(
        &self,
        user: &UserId,
        log: NumericLog,
        reference: NaiveDate,
    ) -> Result<WeeklyWindow, StoreError> {
        let mut entries = Vec::with_capacity(7);
        for date in week_days(reference) {
            let path = DocPath::new(user.clone(), log.into(), date)?;
            let total = match self.store.get(&path).await? {
                Some(fields) => DailyLog::decode(log.into(), &fields)?
                    .total()
                    .unwrap_or(0.0),
                None => 0.0,
            };
            entries.push(DayTotal { date, total });
        }
        Ok(WeeklyWindow { entries })
    }

    /// The week's logged moods, ascending by date, days without a
    /// wellness document excluded.
    pub async fn wellness_week(
        &self,
        user: &UserId,
        reference: NaiveDate,
    ) -> Result<Vec<MoodEntry>, StoreError> {
        let mut entries = Vec::new();
        for date in week_days(reference) {
            let path = DocPath::new(user.clone(), LogType::Wellness, date)?;
            if let Some(fields) = self.store.get(&path).await? {
                let log: WellnessLog = crate::models::from_fields(&fields)?;
                entries.push(MoodEntry {
                    date,
                    emoticon: log.emoticon_type,
                });
            }
        }
        Ok(entries)
    }

    /// Distinct moods logged during the week, ranked by frequency.
    pub async fn mood_ranking(
        &self,
        user: &UserId,
        reference: NaiveDate,
    ) -> Result<Ranking<String>, StoreError> {
        let week = self.wellness_week(user, reference).await?;
        Ok(rank_by_frequency(week.into_iter().map(|e| e.emoticon)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::{WaterLogService, WellnessLogService};
    use crate::store::MemoryStore;
    use chrono::Utc;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_days_any_reference_day() {
        // 2026-03-04 is a Wednesday; its ISO week is Mon 03-02 .. Sun 03-08.
        for day in 2..=8 {
            let days = week_days(date(2026, 3, day));
            assert_eq!(days.len(), 7);
            assert_eq!(days[0], date(2026, 3, 2));
            assert_eq!(days[6], date(2026, 3, 8));
            assert!(days.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_week_days_across_year_boundary() {
        // 2026-01-01 is a Thursday in the ISO week starting Mon 2025-12-29.
        let days = week_days(date(2026, 1, 1));
        assert_eq!(days[0], date(2025, 12, 29));
        assert_eq!(days[6], date(2026, 1, 4));
    }

    #[tokio::test]
    async fn test_numeric_week_fills_gaps_with_zero() {
        let store = Arc::new(MemoryStore::new());
        let water = WaterLogService::new(store.clone(), user());
        water.add(date(2026, 3, 3), 0.5).await.unwrap();
        water.add(date(2026, 3, 6), 1.25).await.unwrap();

        let aggregator = WeeklyAggregator::new(store);
        let window = aggregator
            .numeric_week(&user(), NumericLog::Water, date(2026, 3, 4))
            .await
            .unwrap();

        assert_eq!(window.entries().len(), 7);
        assert_eq!(window.start(), date(2026, 3, 2));
        assert_eq!(window.end(), date(2026, 3, 8));

        let totals: Vec<f64> = window.entries().iter().map(|e| e.total).collect();
        assert_eq!(totals, vec![0.0, 0.5, 0.0, 0.0, 1.25, 0.0, 0.0]);
        assert_eq!(window.week_total(), 1.75);
    }

    #[tokio::test]
    async fn test_numeric_week_empty_store() {
        let store = Arc::new(MemoryStore::new());
        let aggregator = WeeklyAggregator::new(store);

        let window = aggregator
            .numeric_week(&user(), NumericLog::Bowel, date(2026, 3, 4))
            .await
            .unwrap();
        assert!(window.entries().iter().all(|e| e.total == 0.0));
        assert!(window
            .entries()
            .windows(2)
            .all(|w| w[0].date < w[1].date));
    }

    #[tokio::test]
    async fn test_wellness_week_excludes_unlogged_days() {
        let store = Arc::new(MemoryStore::new());
        let wellness = WellnessLogService::new(store.clone(), user());
        wellness
            .set_mood(date(2026, 3, 2), "happy", Utc::now())
            .await
            .unwrap();
        wellness
            .set_mood(date(2026, 3, 5), "sad", Utc::now())
            .await
            .unwrap();

        let aggregator = WeeklyAggregator::new(store);
        let week = aggregator
            .wellness_week(&user(), date(2026, 3, 4))
            .await
            .unwrap();

        assert_eq!(week.len(), 2);
        assert_eq!(week[0].emoticon, "happy");
        assert_eq!(week[1].emoticon, "sad");
    }

    #[tokio::test]
    async fn test_mood_ranking() {
        let store = Arc::new(MemoryStore::new());
        let wellness = WellnessLogService::new(store.clone(), user());
        for (day, mood) in [(2, "sad"), (3, "sad"), (4, "happy")] {
            wellness
                .set_mood(date(2026, 3, day), mood, Utc::now())
                .await
                .unwrap();
        }

        let aggregator = WeeklyAggregator::new(store);
        let ranking = aggregator
            .mood_ranking(&user(), date(2026, 3, 4))
            .await
            .unwrap();

        let entries = ranking.entries().unwrap();
        assert_eq!(entries[0].value, "sad");
        assert_eq!(entries[0].count, 2);
        assert_eq!(entries[1].value, "happy");
        assert_eq!(entries[1].count, 1);
    }

    #[tokio::test]
    async fn test_mood_ranking_no_data() {
        let store = Arc::new(MemoryStore::new());
        let aggregator = WeeklyAggregator::new(store);

        let ranking = aggregator
            .mood_ranking(&user(), date(2026, 3, 4))
            .await
            .unwrap();
        assert_eq!(ranking, Ranking::NoData);
    }
}
