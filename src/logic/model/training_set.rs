use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureVector, FEATURE_LAYOUT};

/// Labelled rows fed to the forest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSet {
    pub feature_names: Vec<String>,
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
}

impl TrainingSet {
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            feature_names,
            features: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Empty set over the current feature layout
    pub fn for_layout() -> Self {
        Self::new(FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect())
    }

    pub fn push(&mut self, row: Vec<f64>, label: u8) {
        self.features.push(row);
        self.labels.push(label);
    }

    pub fn push_vector(&mut self, vector: &FeatureVector, label: u8) {
        self.push(vector.as_slice().to_vec(), label);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&y| y == 1).count()
    }

    pub fn negatives(&self) -> usize {
        self.len() - self.positives()
    }

    /// Sorted distinct labels
    pub fn classes(&self) -> Vec<u8> {
        let mut classes = self.labels.clone();
        classes.sort_unstable();
        classes.dedup();
        classes
    }
}
