//! Per-log-type services: thin typed facades over the document store.
//!
//! Each service is constructed with an injected store handle and user
//! id; nothing here reads global state or the wall clock. The effective
//! date is always an explicit parameter.

mod bowel;
mod food;
mod symptoms;
mod water;
mod wellness;

pub use bowel::BowelLogService;
pub use food::FoodLogService;
pub use symptoms::{merge_symptoms, SymptomLogService};
pub use water::WaterLogService;
pub use wellness::WellnessLogService;

use chrono::NaiveDate;

/// Today's calendar date in the local timezone, for callers that want
/// the conventional default. Services never assume it.
pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}
