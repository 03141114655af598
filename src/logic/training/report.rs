use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary of a successful retrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub artifact_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub samples: usize,
    /// Records dropped because their answers could not be parsed
    pub skipped: usize,
    pub positives: usize,
    pub negatives: usize,
    /// Labels that came from an expert annotation rather than the tier
    pub expert_labels: usize,
    pub classes: Vec<u8>,
    pub training_accuracy: f64,
    pub path: Option<PathBuf>,
}

impl TrainingReport {
    /// True when the forest only ever saw one class
    pub fn is_degenerate(&self) -> bool {
        self.classes.len() < 2
    }
}
