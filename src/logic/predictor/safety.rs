//! Safety Nets - item answers that override the classifier
//!
//! Constants and rule order only; the predictor applies them.

use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureVector, PHYSICAL_VIOLENCE_ITEM, THREATS_ITEM};

/// Item code from which a safety net fires ("often" or "always")
pub const SAFETY_NET_MIN_CODE: f64 = 3.0;

/// Probability floor applied for severe threats
pub const THREAT_FLOOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyNet {
    /// Injuries or bruises: probability forced to 1.0
    PhysicalViolence,
    /// Coercion or threats: probability raised to at least 0.8
    SevereThreats,
}

impl SafetyNet {
    /// First match wins
    pub const ORDER: [SafetyNet; 2] = [SafetyNet::PhysicalViolence, SafetyNet::SevereThreats];

    pub fn item(&self) -> usize {
        match self {
            SafetyNet::PhysicalViolence => PHYSICAL_VIOLENCE_ITEM,
            SafetyNet::SevereThreats => THREATS_ITEM,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            SafetyNet::PhysicalViolence => {
                "[SAFETY NET] Physical violence detected (Item 2). Risk set to Critical. "
            }
            SafetyNet::SevereThreats => "[SAFETY NET] Severe threats detected (Item 5). Risk elevated. ",
        }
    }

    pub fn apply(&self, probability: f64) -> f64 {
        match self {
            SafetyNet::PhysicalViolence => 1.0,
            SafetyNet::SevereThreats => probability.max(THREAT_FLOOR),
        }
    }

    pub fn fires(&self, vector: &FeatureVector) -> bool {
        vector.item(self.item()) >= SAFETY_NET_MIN_CODE
    }

    pub fn detect(vector: &FeatureVector) -> Option<SafetyNet> {
        Self::ORDER.into_iter().find(|net| net.fires(vector))
    }
}
