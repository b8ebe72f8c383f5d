//! Logical addressing for stored documents.
//!
//! Aggregate logs live at `users/{userId}/{logType}Logs/{isoDate}`;
//! itemized food entries live under
//! `users/{userId}/foodLog/{isoDate}/{mealCategory}/{itemId}`.

use chrono::NaiveDate;
use std::fmt;

use crate::error::StoreError;
use crate::models::{LogType, MealCategory, UserId};

/// Address of one aggregate document: (user, log type, calendar day).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    user: UserId,
    log_type: LogType,
    date: NaiveDate,
}

impl DocPath {
    /// Builds an aggregate document path. Food logs are rejected here;
    /// they are item collections addressed by [`ItemPath`].
    pub fn new(user: UserId, log_type: LogType, date: NaiveDate) -> Result<Self, StoreError> {
        if !log_type.is_aggregate() {
            return Err(StoreError::InvalidValue(
                "food logs have no aggregate document; use ItemPath".to_string(),
            ));
        }
        Ok(Self {
            user,
            log_type,
            date,
        })
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn log_type(&self) -> LogType {
        self.log_type
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "users/{}/{}/{}",
            self.user,
            self.log_type.collection(),
            self.date.format("%Y-%m-%d")
        )
    }
}

/// Address of one day's food item collection for a meal category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemPath {
    user: UserId,
    date: NaiveDate,
    meal: MealCategory,
}

impl ItemPath {
    pub fn new(user: UserId, date: NaiveDate, meal: MealCategory) -> Self {
        Self { user, date, meal }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn meal(&self) -> MealCategory {
        self.meal
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "users/{}/foodLog/{}/{}",
            self.user,
            self.date.format("%Y-%m-%d"),
            self.meal
        )
    }
}
