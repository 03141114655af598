//! Explain Module - Per-feature attribution rendered as text

pub mod engine;
pub mod types;

pub use engine::{explain, rank, render, LOW_RISK_TEXT, TOP_FACTORS};
pub use types::{ExplainResult, FeatureAttribution, FeatureContribution, RawAttribution};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttributionError;

    #[test]
    fn test_per_class_picks_target_row() {
        let raw = RawAttribution::PerClass {
            classes: vec![0, 1],
            rows: vec![vec![-0.2, 0.1], vec![0.2, -0.1]],
            bias: vec![0.6, 0.4],
        };
        let a = raw.normalize(1, 2).unwrap();
        assert_eq!(a.values, vec![0.2, -0.1]);
        assert!((a.total() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_class_row_is_used() {
        let raw = RawAttribution::PerClass {
            classes: vec![0],
            rows: vec![vec![0.0, 0.0]],
            bias: vec![1.0],
        };
        assert_eq!(raw.for_class(1).unwrap().values, vec![0.0, 0.0]);
    }

    #[test]
    fn test_missing_class_and_bad_values() {
        let raw = RawAttribution::PerClass {
            classes: vec![0, 2],
            rows: vec![vec![0.0], vec![0.0]],
            bias: vec![0.5, 0.5],
        };
        assert_eq!(raw.for_class(1), Err(AttributionError::MissingClass(1)));

        let raw = RawAttribution::Single { values: vec![f64::NAN], bias: 0.0 };
        assert_eq!(raw.for_class(1), Err(AttributionError::NonFinite));

        let raw = RawAttribution::Single { values: vec![0.1], bias: 0.0 };
        assert_eq!(
            raw.normalize(1, 14),
            Err(AttributionError::DimensionMismatch { expected: 14, actual: 1 })
        );
    }
}
