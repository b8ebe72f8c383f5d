use serde::{Deserialize, Serialize};

/// Upper bound of the symptom intensity slider.
pub const MAX_INTENSITY: u8 = 10;

/// One symptom's intensity for a day. The containing array is unique by
/// `symptom` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub symptom: String,
    pub intensity: u8,
}

impl SymptomEntry {
    pub fn new(symptom: impl Into<String>, intensity: u8) -> Self {
        Self {
            symptom: symptom.into(),
            intensity,
        }
    }
}

/// An incoming change to one symptom. A missing intensity means "make
/// sure the symptom is tracked", which records it at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomUpdate {
    pub symptom: String,
    pub intensity: Option<u8>,
}

impl SymptomUpdate {
    pub fn new(symptom: impl Into<String>, intensity: u8) -> Self {
        Self {
            symptom: symptom.into(),
            intensity: Some(intensity),
        }
    }

    pub fn untracked(symptom: impl Into<String>) -> Self {
        Self {
            symptom: symptom.into(),
            intensity: None,
        }
    }
}
