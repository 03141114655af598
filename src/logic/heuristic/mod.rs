//! Heuristic Module
//!
//! Deterministic rule engine mapping survey answers to a score, a risk
//! tier and a list of flags. Used when no trained model exists and as
//! the auditable baseline.
//!
//! ## Structure
//! - `rules`: Thresholds, weights, flag texts, recommendations
//! - `scorer`: Scoring logic
//!
//! ## Usage
//! ```ignore
//! let result = HeuristicScorer::new().analyze(&survey);
//! match result.risk_level {
//!     RiskTier::Critical => escalate(&result),
//!     _ => store(&result),
//! }
//! ```

pub mod rules;
pub mod scorer;

pub use rules::{
    ScoringThresholds,
    CRITICAL_THRESHOLD,
    HIGH_THRESHOLD,
    MEDIUM_THRESHOLD,
    DIRECT_INDICATOR_PENALTY,
};

pub use scorer::HeuristicScorer;
