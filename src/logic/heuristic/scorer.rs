//! Heuristic Scorer
//!
//! Input: SurveyInput
//! Output: RiskAnalysisResult
//!
//! Deterministic and explainable: no randomness, no external state.

use super::rules::{
    frequency_weight, recommendation, ScoringThresholds, FLAG_CONFLICT_VERBALIZED,
    FLAG_DAMAGED_ITEMS,
};
use crate::logic::survey::{RiskAnalysisResult, RiskTier, SurveyInput};

/// Rule-based scorer, always available
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer {
    thresholds: ScoringThresholds,
}

impl HeuristicScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: ScoringThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ScoringThresholds {
        &self.thresholds
    }

    pub fn analyze(&self, survey: &SurveyInput) -> RiskAnalysisResult {
        let mut flags = Vec::new();

        // Psychosomatic + behavioural items sum directly
        let mut score: u32 = survey.frequencies().iter().map(|f| frequency_weight(*f)).sum();

        // Direct indicators
        let damaged = survey.damaged_items.is_yes();
        let verbalized = survey.conflict_verbalized.is_yes();

        if damaged {
            score += self.thresholds.direct_indicator_penalty;
            flags.push(FLAG_DAMAGED_ITEMS.to_string());
        }
        if verbalized {
            score += self.thresholds.direct_indicator_penalty;
            flags.push(FLAG_CONFLICT_VERBALIZED.to_string());
        }

        // Sudden death: co-occurring direct indicators force Critical
        let risk_level = if damaged && verbalized {
            RiskTier::Critical
        } else {
            self.thresholds.tier_for(score)
        };

        log::debug!("Heuristic score {} -> {}", score, risk_level);

        RiskAnalysisResult {
            total_score: score,
            risk_level,
            flags,
            recommendation: recommendation(risk_level).to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
