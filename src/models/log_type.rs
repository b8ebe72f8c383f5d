use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meal categories for the food log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealCategory::Breakfast => write!(f, "breakfast"),
            MealCategory::Lunch => write!(f, "lunch"),
            MealCategory::Dinner => write!(f, "dinner"),
            MealCategory::Snack => write!(f, "snack"),
        }
    }
}

impl FromStr for MealCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealCategory::Breakfast),
            "lunch" => Ok(MealCategory::Lunch),
            "dinner" => Ok(MealCategory::Dinner),
            "snack" => Ok(MealCategory::Snack),
            _ => Err(format!(
                "Invalid meal category '{}'. Valid options: breakfast, lunch, dinner, snack",
                s
            )),
        }
    }
}

/// The closed set of daily log types.
///
/// Water, bowel, wellness and symptoms are aggregate documents (one per
/// user and day). Food logs are itemized per meal category and live in a
/// sub-collection instead of a single aggregate document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogType {
    Water,
    Bowel,
    Wellness,
    Symptoms,
    Food(MealCategory),
}

impl LogType {
    /// Collection segment used in document paths, e.g. `waterLogs`.
    pub fn collection(&self) -> &'static str {
        match self {
            LogType::Water => "waterLogs",
            LogType::Bowel => "bowelLogs",
            LogType::Wellness => "wellnessLogs",
            LogType::Symptoms => "symptomLogs",
            LogType::Food(_) => "foodLog",
        }
    }

    /// Whether this log type is stored as a single aggregate document
    /// per day (as opposed to an item collection).
    pub fn is_aggregate(&self) -> bool {
        !matches!(self, LogType::Food(_))
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogType::Water => write!(f, "water"),
            LogType::Bowel => write!(f, "bowel"),
            LogType::Wellness => write!(f, "wellness"),
            LogType::Symptoms => write!(f, "symptoms"),
            LogType::Food(meal) => write!(f, "food/{}", meal),
        }
    }
}
