//! Label Rules
//!
//! Ordered rule list deciding the training label of a historical record.
//! The first rule that applies wins; the heuristic fallback always applies.

use serde::{Deserialize, Serialize};

use super::record::ExpertLabel;
use crate::logic::survey::RiskTier;

/// One step of the label precedence chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    /// Expert annotation → fixed label
    Expert(ExpertLabel, u8),
    /// HIGH/CRITICAL heuristic tier → 1, anything else (or no tier) → 0
    HeuristicTier,
}

/// Precedence, highest first
pub const LABEL_RULES: &[LabelRule] = &[
    LabelRule::Expert(ExpertLabel::RealCase, 1),
    LabelRule::Expert(ExpertLabel::FalsePositive, 0),
    LabelRule::Expert(ExpertLabel::FalseNegative, 1),
    LabelRule::HeuristicTier,
];

/// Where a label came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSource {
    Expert,
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDecision {
    pub label: u8,
    pub source: LabelSource,
}

impl LabelRule {
    fn apply(&self, expert: Option<ExpertLabel>, tier: Option<RiskTier>) -> Option<LabelDecision> {
        match self {
            LabelRule::Expert(wanted, label) => (expert == Some(*wanted)).then_some(LabelDecision {
                label: *label,
                source: LabelSource::Expert,
            }),
            LabelRule::HeuristicTier => Some(LabelDecision {
                label: u8::from(tier.map_or(false, |t| t.is_elevated())),
                source: LabelSource::Heuristic,
            }),
        }
    }
}

/// Resolve the label using the default precedence
pub fn resolve_label(expert: Option<ExpertLabel>, tier: Option<RiskTier>) -> LabelDecision {
    resolve_with(LABEL_RULES, expert, tier)
}

/// Resolve against an explicit rule list
pub fn resolve_with(
    rules: &[LabelRule],
    expert: Option<ExpertLabel>,
    tier: Option<RiskTier>,
) -> LabelDecision {
    rules
        .iter()
        .find_map(|rule| rule.apply(expert, tier))
        .unwrap_or(LabelDecision { label: 0, source: LabelSource::Heuristic })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expert_labels_override_tier() {
        let d = resolve_label(Some(ExpertLabel::RealCase), Some(RiskTier::Low));
        assert_eq!(d, LabelDecision { label: 1, source: LabelSource::Expert });

        let d = resolve_label(Some(ExpertLabel::FalsePositive), Some(RiskTier::Critical));
        assert_eq!(d.label, 0);
        assert_eq!(d.source, LabelSource::Expert);

        let d = resolve_label(Some(ExpertLabel::FalseNegative), Some(RiskTier::Low));
        assert_eq!(d.label, 1);
    }

    #[test]
    fn test_heuristic_fallback() {
        assert_eq!(resolve_label(None, Some(RiskTier::Critical)).label, 1);
        assert_eq!(resolve_label(None, Some(RiskTier::High)).label, 1);
        assert_eq!(resolve_label(None, Some(RiskTier::Medium)).label, 0);
        assert_eq!(resolve_label(None, Some(RiskTier::Low)).label, 0);
        assert_eq!(resolve_label(None, None).label, 0);
        assert_eq!(resolve_label(None, None).source, LabelSource::Heuristic);
    }

    #[test]
    fn test_custom_rule_order() {
        // Without expert rules, annotations are ignored
        let d = resolve_with(&[LabelRule::HeuristicTier], Some(ExpertLabel::RealCase), None);
        assert_eq!(d.label, 0);
    }

    #[test]
    fn test_unknown_annotation_falls_through() {
        assert_eq!(ExpertLabel::parse("maybe"), None);
        assert_eq!(ExpertLabel::parse("real_case"), Some(ExpertLabel::RealCase));
    }
}
