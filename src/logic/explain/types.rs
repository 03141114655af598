use serde::{Deserialize, Serialize};

use crate::error::AttributionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub name: String,
    /// Input value the model saw
    pub value: f64,
    /// Signed push toward class 1
    pub contribution: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResult {
    pub contributions: Vec<FeatureContribution>,
    pub text: String,
}

/// Attribution as produced by a classifier, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawAttribution {
    /// One row (and bias) per class, ordered like `classes`
    PerClass {
        classes: Vec<u8>,
        rows: Vec<Vec<f64>>,
        bias: Vec<f64>,
    },
    /// Already the positive-class row
    Single { values: Vec<f64>, bias: f64 },
}

/// Target-class contribution list, one value per feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAttribution {
    pub values: Vec<f64>,
    pub bias: f64,
}

impl FeatureAttribution {
    pub fn zeros(n_features: usize) -> Self {
        Self { values: vec![0.0; n_features], bias: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// bias + sum of contributions
    pub fn total(&self) -> f64 {
        self.bias + self.values.iter().sum::<f64>()
    }
}

impl RawAttribution {
    /// Pick the row for `target`
    ///
    /// A model that only ever saw one class exposes a single row; that row
    /// is used whatever the target.
    pub fn for_class(self, target: u8) -> Result<FeatureAttribution, AttributionError> {
        let attribution = match self {
            RawAttribution::Single { values, bias } => FeatureAttribution { values, bias },
            RawAttribution::PerClass { classes, mut rows, bias } => {
                let pos = match classes.iter().position(|&c| c == target) {
                    Some(pos) => pos,
                    None if rows.len() == 1 => 0,
                    None => return Err(AttributionError::MissingClass(target)),
                };
                if pos >= rows.len() {
                    return Err(AttributionError::MissingClass(target));
                }
                FeatureAttribution {
                    values: rows.swap_remove(pos),
                    bias: bias.get(pos).copied().unwrap_or(0.0),
                }
            }
        };

        if attribution.values.iter().any(|v| !v.is_finite()) || !attribution.bias.is_finite() {
            return Err(AttributionError::NonFinite);
        }

        Ok(attribution)
    }

    /// Normalize and check the width against the input
    pub fn normalize(self, target: u8, n_features: usize) -> Result<FeatureAttribution, AttributionError> {
        let attribution = self.for_class(target)?;
        if attribution.len() != n_features {
            return Err(AttributionError::DimensionMismatch {
                expected: n_features,
                actual: attribution.len(),
            });
        }
        Ok(attribution)
    }
}
