//! Feature Vector - Core data structure for model input
//!
//! Versioned: carries the layout version and hash so a vector built for
//! training and one built for inference are structurally identical.

use serde::{Deserialize, Serialize};

use super::layout::{
    item_index, layout_hash, validate_layout, LayoutMismatchError, ATMOSPHERE_INDEX,
    FEATURE_COUNT, FEATURE_VERSION,
};

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Zeroed vector with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: f64) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Ordinal code of a 1-based questionnaire item (0 when out of range)
    pub fn item(&self, item: usize) -> f64 {
        item_index(item).and_then(|i| self.get(i)).unwrap_or(0.0)
    }

    pub fn teacher_sentiment(&self) -> f64 {
        self.values[ATMOSPHERE_INDEX]
    }

    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector from item codes
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self { vector: FeatureVector::new() }
    }

    /// Set a 1-based questionnaire item; unknown items are ignored
    pub fn item(mut self, item: usize, code: i64) -> Self {
        if let Some(index) = item_index(item) {
            self.vector.set(index, code as f64);
        }
        self
    }

    pub fn teacher_sentiment(mut self, value: f64) -> Self {
        self.vector.set(ATMOSPHERE_INDEX, value);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_new() {
        let vector = FeatureVector::new();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert!(vector.values.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_builder_items() {
        let vector = FeatureVectorBuilder::new()
            .item(2, 3)
            .item(13, 4)
            .item(99, 4)
            .teacher_sentiment(0.35)
            .build();

        assert_eq!(vector.item(2), 3.0);
        assert_eq!(vector.item(13), 4.0);
        assert_eq!(vector.teacher_sentiment(), 0.35);
        assert_eq!(vector.item(99), 0.0);
    }

    #[test]
    fn test_validate_detects_foreign_layout() {
        let mut vector = FeatureVector::new();
        assert!(vector.validate().is_ok());

        vector.version = FEATURE_VERSION + 1;
        let err = vector.validate().unwrap_err();
        assert_eq!(err.expected_version, FEATURE_VERSION);
        assert_eq!(err.actual_version, FEATURE_VERSION + 1);
    }

    #[test]
    fn test_set_ignores_out_of_range() {
        let mut vector = FeatureVector::new();
        vector.set(4, 2.0);
        vector.set(FEATURE_COUNT, 9.0);
        assert_eq!(vector.item(5), 2.0);
        assert!(vector.values.iter().all(|v| *v <= 2.0));
    }
}
