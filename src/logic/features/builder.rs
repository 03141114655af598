//! Feature Builder
//!
//! Flattens questionnaire answers plus the classroom atmosphere signal into
//! a FeatureVector. Training and inference both go through here, which keeps
//! the columns and their order identical.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::layout::{item_key, ITEM_COUNT};
use super::vector::{FeatureVector, FeatureVectorBuilder};
use crate::error::FeatureError;

// ============================================================================
// ITEM ANSWERS
// ============================================================================

/// Questionnaire answers keyed by 1-based item number
///
/// Items that were never answered read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAnswers {
    codes: BTreeMap<usize, i64>,
}

impl ItemAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter; items outside 1..=ITEM_COUNT are ignored
    pub fn with(mut self, item: usize, code: i64) -> Self {
        self.set(item, code);
        self
    }

    pub fn set(&mut self, item: usize, code: i64) {
        if (1..=ITEM_COUNT).contains(&item) {
            self.codes.insert(item, code);
        }
    }

    pub fn get(&self, item: usize) -> i64 {
        self.codes.get(&item).copied().unwrap_or(0)
    }

    pub fn answered(&self) -> usize {
        self.codes.len()
    }

    /// Parse a raw answers payload (`{"p_item_1": 2, ...}`)
    pub fn from_json(raw: &str) -> Result<Self, FeatureError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| FeatureError::InvalidJson(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Codes are coerced to integers; anything non-numeric is an error.
    /// Keys other than `p_item_N` are ignored.
    pub fn from_value(value: &Value) -> Result<Self, FeatureError> {
        let object = value.as_object().ok_or(FeatureError::NotAnObject)?;
        let mut answers = Self::new();

        for item in 1..=ITEM_COUNT {
            let key = item_key(item);
            if let Some(raw) = object.get(&key) {
                answers.set(item, coerce_code(&key, raw)?);
            }
        }

        Ok(answers)
    }
}

/// Integer coercion: numbers truncate toward zero, booleans map to 0/1,
/// strings must hold an integer
fn coerce_code(key: &str, raw: &Value) -> Result<i64, FeatureError> {
    let non_numeric = || FeatureError::NonNumeric {
        item: key.to_string(),
        value: raw.to_string(),
    };

    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(non_numeric),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| non_numeric()),
        _ => Err(non_numeric()),
    }
}

// ============================================================================
// FEATURE BUILDER
// ============================================================================

/// Builds the model input from answers and the atmosphere score
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, answers: &ItemAnswers, atmosphere: f64) -> Result<FeatureVector, FeatureError> {
        if !(0.0..=1.0).contains(&atmosphere) {
            return Err(FeatureError::AtmosphereOutOfRange(atmosphere));
        }

        let vector = (1..=ITEM_COUNT)
            .fold(FeatureVectorBuilder::new(), |b, item| b.item(item, answers.get(item)))
            .teacher_sentiment(atmosphere)
            .build();

        Ok(vector)
    }

    /// Parse raw answers JSON and build in one step
    pub fn build_from_json(&self, raw_answers: &str, atmosphere: f64) -> Result<FeatureVector, FeatureError> {
        let answers = ItemAnswers::from_json(raw_answers)?;
        self.build(&answers, atmosphere)
    }
}
