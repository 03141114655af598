//! Heuristic Scoring Rules & Thresholds
//!
//! Constants and configurable thresholds only - no scoring logic.

use serde::{Deserialize, Serialize};

use crate::logic::survey::{Frequency, RiskTier};

// ============================================================================
// THRESHOLDS
// ============================================================================

/// At or above this score = Critical
pub const CRITICAL_THRESHOLD: u32 = 12;

/// At or above this score = High
pub const HIGH_THRESHOLD: u32 = 8;

/// At or above this score = Medium
pub const MEDIUM_THRESHOLD: u32 = 4;

// ============================================================================
// WEIGHTS
// ============================================================================

/// Fixed penalty for each direct ("yes") indicator
pub const DIRECT_INDICATOR_PENALTY: u32 = 5;

/// Frequency → score weight
pub fn frequency_weight(answer: Frequency) -> u32 {
    match answer {
        Frequency::Never => 0,
        Frequency::Sometimes => 1,
        Frequency::Often => 2,
        Frequency::Always => 3,
    }
}

// ============================================================================
// FLAGS
// ============================================================================

pub const FLAG_DAMAGED_ITEMS: &str = "School materials damaged or lost";

pub const FLAG_CONFLICT_VERBALIZED: &str = "Conflict explicitly verbalized";

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

/// Baseline advice per tier; may be enriched by an external advisor later
pub fn recommendation(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Critical => {
            "ALERT: Severe indicators detected. Immediate intervention by the school is required."
        }
        RiskTier::High => {
            "High risk: Consistent worrying patterns observed. We recommend requesting a tutoring meeting."
        }
        RiskTier::Medium => "Caution: Keep observing. There are signs of distress.",
        RiskTier::Low => "No appreciable risk at this time. Continue normal monitoring.",
    }
}

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

/// Score thresholds for tier assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringThresholds {
    pub critical_min: u32,
    pub high_min: u32,
    pub medium_min: u32,
    pub direct_indicator_penalty: u32,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            critical_min: CRITICAL_THRESHOLD,
            high_min: HIGH_THRESHOLD,
            medium_min: MEDIUM_THRESHOLD,
            direct_indicator_penalty: DIRECT_INDICATOR_PENALTY,
        }
    }
}

impl ScoringThresholds {
    /// Additive tier for a score, before the sudden-death override
    pub fn tier_for(&self, score: u32) -> RiskTier {
        if score >= self.critical_min {
            RiskTier::Critical
        } else if score >= self.high_min {
            RiskTier::High
        } else if score >= self.medium_min {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}
