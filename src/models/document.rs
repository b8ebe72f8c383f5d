//! Typed per-day document shapes and their conversion to and from the
//! schemaless field maps the store persists.
//!
//! Each log type has its own variant; a merge write only ever carries
//! the fields of the variant being written, so unrelated fields on the
//! stored document are preserved.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::log_type::LogType;
use super::symptom::SymptomEntry;
use crate::error::StoreError;

/// A persisted document is a schemaless key/value map. Fields not
/// supplied by a merge write stay untouched.
pub type Fields = serde_json::Map<String, Value>;

/// Daily water intake aggregate, in liters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterLog {
    #[serde(default)]
    pub total: f64,
}

/// Daily bowel movement count.
///
/// `total` is an incrementing count of movements for the day, not a
/// Bristol-scale type code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowelLog {
    #[serde(default)]
    pub total: u32,
}

/// A single categorical mood value per day, overwritten on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessLog {
    pub timestamp: DateTime<Utc>,
    pub emoticon_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Symptom intensities for one day, unique by symptom key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomLog {
    #[serde(default)]
    pub symptoms: Vec<SymptomEntry>,
}

/// Tagged union over the aggregate document shapes, keyed by log type.
#[derive(Debug, Clone, PartialEq)]
pub enum DailyLog {
    Water(WaterLog),
    Bowel(BowelLog),
    Wellness(WellnessLog),
    Symptoms(SymptomLog),
}

impl DailyLog {
    /// Decodes a stored field map into the typed shape for `log_type`.
    ///
    /// Food logs are item collections, not aggregate documents, and
    /// cannot be decoded here.
    pub fn decode(log_type: LogType, fields: &Fields) -> Result<Self, StoreError> {
        match log_type {
            LogType::Water => Ok(DailyLog::Water(from_fields(fields)?)),
            LogType::Bowel => Ok(DailyLog::Bowel(from_fields(fields)?)),
            LogType::Wellness => Ok(DailyLog::Wellness(from_fields(fields)?)),
            LogType::Symptoms => Ok(DailyLog::Symptoms(from_fields(fields)?)),
            LogType::Food(_) => Err(StoreError::Decode(
                "food logs are item collections, not aggregate documents".to_string(),
            )),
        }
    }

    /// The numeric day aggregate, for water and bowel logs.
    pub fn total(&self) -> Option<f64> {
        match self {
            DailyLog::Water(log) => Some(log.total),
            DailyLog::Bowel(log) => Some(f64::from(log.total)),
            DailyLog::Wellness(_) | DailyLog::Symptoms(_) => None,
        }
    }
}

/// Serializes a typed document into the field map a merge write carries.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value).map_err(|e| StoreError::Decode(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Decode(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

/// Deserializes a stored field map into a typed document.
pub fn from_fields<T: DeserializeOwned>(fields: &Fields) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(fields.clone()))
        .map_err(|e| StoreError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_water_log_roundtrip() {
        let log = WaterLog { total: 1.75 };
        let map = to_fields(&log).unwrap();
        assert_eq!(map.get("total"), Some(&json!(1.75)));

        let back: WaterLog = from_fields(&map).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn test_water_log_defaults_missing_total() {
        let map = fields(json!({}));
        let log: WaterLog = from_fields(&map).unwrap();
        assert_eq!(log.total, 0.0);
    }

    #[test]
    fn test_wellness_log_wire_names() {
        let log = WellnessLog {
            timestamp: "2026-03-02T08:30:00Z".parse().unwrap(),
            emoticon_type: "happy".to_string(),
            updated_at: None,
        };
        let map = to_fields(&log).unwrap();
        assert!(map.contains_key("emoticonType"));
        assert!(!map.contains_key("updatedAt"));
    }

    #[test]
    fn test_decode_by_log_type() {
        let map = fields(json!({ "total": 3 }));
        let log = DailyLog::decode(LogType::Bowel, &map).unwrap();
        assert_eq!(log, DailyLog::Bowel(BowelLog { total: 3 }));
        assert_eq!(log.total(), Some(3.0));
    }

    #[test]
    fn test_decode_preserves_unknown_fields_tolerance() {
        // Documents are schemaless; decoding must tolerate sibling
        // fields written by other callers.
        let map = fields(json!({ "total": 0.5, "note": "after run" }));
        let log: WaterLog = from_fields(&map).unwrap();
        assert_eq!(log.total, 0.5);
    }

    #[test]
    fn test_decode_food_is_an_error() {
        use crate::models::MealCategory;
        let map = fields(json!({}));
        let result = DailyLog::decode(LogType::Food(MealCategory::Lunch), &map);
        assert!(matches!(result, Err(StoreError::Decode(_))));
    }

    #[test]
    fn test_symptom_log_defaults_to_empty() {
        let map = fields(json!({}));
        let log: SymptomLog = from_fields(&map).unwrap();
        assert!(log.symptoms.is_empty());
    }
}
