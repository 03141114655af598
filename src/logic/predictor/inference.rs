//! Risk Predictor - classifier probability, safety nets, explanation

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::safety::SafetyNet;
use crate::error::AttributionError;
use crate::logic::explain::{self, FeatureAttribution, FeatureContribution};
use crate::logic::features::layout::validate_layout;
use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use crate::logic::model::{ArtifactStore, ModelArtifact};

pub const NOT_TRAINED_TEXT: &str = "Model not trained yet.";

/// Positive class the explanation is written for
const TARGET_CLASS: u8 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    /// Probability of the at-risk class in [0, 1]
    pub probability: f64,
    pub explanation: String,
    pub safety_net: Option<SafetyNet>,
    pub model_available: bool,
    /// Positive factors quoted in the explanation
    #[serde(default)]
    pub factors: Vec<FeatureContribution>,
    #[serde(default)]
    pub artifact_id: Option<Uuid>,
}

impl RiskPrediction {
    fn unavailable(explanation: String) -> Self {
        Self {
            probability: 0.0,
            explanation,
            safety_net: None,
            model_available: false,
            factors: Vec::new(),
            artifact_id: None,
        }
    }

    /// Sentinel returned while no artifact exists
    pub fn not_trained() -> Self {
        Self::unavailable(NOT_TRAINED_TEXT.to_string())
    }

    /// `(probability, explanation)`
    pub fn into_pair(self) -> (f64, String) {
        (self.probability, self.explanation)
    }
}

/// Reads the current artifact from a shared store
#[derive(Debug, Clone)]
pub struct RiskPredictor {
    store: Arc<ArtifactStore>,
}

impl RiskPredictor {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<ArtifactStore> {
        &self.store
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn predict(&self, vector: &FeatureVector) -> RiskPrediction {
        match self.store.current() {
            Some(artifact) => predict_with(&artifact, vector),
            None => RiskPrediction::not_trained(),
        }
    }
}

/// Prediction against a specific artifact
pub fn predict_with(artifact: &ModelArtifact, vector: &FeatureVector) -> RiskPrediction {
    if let Err(reason) = check_compatible(artifact, vector) {
        log::warn!("Model {} unusable for this input: {}", artifact.id, reason);
        return RiskPrediction::unavailable(format!("Model unavailable: {}.", reason));
    }

    let x = vector.as_slice();
    let mut probability = artifact.probability(x);

    let safety_net = SafetyNet::detect(vector);
    if let Some(net) = safety_net {
        probability = net.apply(probability);
        log::debug!("Safety net {:?} fired, probability {:.3}", net, probability);
    }

    let attribution = attribute(artifact, x).unwrap_or_else(|e| {
        log::warn!("Attribution failed ({}), explaining with zero contributions", e);
        FeatureAttribution::zeros(FEATURE_COUNT)
    });
    let explained = explain::explain(&attribution, vector);

    let prefix = safety_net.map(|net| net.prefix()).unwrap_or("");

    RiskPrediction {
        probability,
        explanation: format!("{}{}", prefix, explained.text),
        safety_net,
        model_available: true,
        factors: explained.contributions,
        artifact_id: Some(artifact.id),
    }
}

fn attribute(artifact: &ModelArtifact, x: &[f64]) -> Result<FeatureAttribution, AttributionError> {
    artifact
        .forest
        .contributions(x)?
        .normalize(TARGET_CLASS, FEATURE_COUNT)
}

fn check_compatible(artifact: &ModelArtifact, vector: &FeatureVector) -> Result<(), String> {
    vector.validate().map_err(|e| e.to_string())?;
    validate_layout(artifact.feature_version, artifact.layout_hash).map_err(|e| e.to_string())?;
    if artifact.forest.n_features() != FEATURE_COUNT {
        return Err(format!(
            "model expects {} features, input has {}",
            artifact.forest.n_features(),
            FEATURE_COUNT
        ));
    }
    Ok(())
}
