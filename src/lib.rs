//! Daylog Core Library
//!
//! Daily health log aggregation and synchronization: one aggregate
//! document per (user, log type, day), field-wise merge writes, live
//! per-document feeds, gap-filled weekly windows, frequency-ranked
//! views and optimistic local edits.

pub mod config;
pub mod error;
pub mod logs;
pub mod models;
pub mod optimistic;
pub mod ranking;
pub mod store;
pub mod subscription;
pub mod weekly;

pub use config::RemoteConfig;
pub use error::StoreError;
pub use logs::{
    merge_symptoms, today_local, BowelLogService, FoodLogService, SymptomLogService,
    WaterLogService, WellnessLogService,
};
pub use models::{
    from_fields, to_fields, BowelLog, DailyLog, Fields, FoodItem, LogType, MealCategory,
    SymptomEntry, SymptomLog, SymptomUpdate, UserId, WaterLog, WellnessLog, MAX_INTENSITY,
};
pub use optimistic::{OptimisticUpdateCoordinator, OptimisticValue};
pub use ranking::{rank_by_frequency, RankEntry, Ranking};
pub use store::{
    DocPath, DocumentFeed, ItemPath, ItemRecord, LogStore, MemoryStore, RemoteStore, Snapshot,
};
pub use subscription::ChangeSubscription;
pub use weekly::{week_days, DayTotal, MoodEntry, NumericLog, WeeklyAggregator, WeeklyWindow};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
