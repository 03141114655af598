//! Predictor Module - Model-backed risk probability
//!
//! Forest probability, overridden by the item safety nets and explained by
//! per-feature attribution.

pub mod inference;
pub mod safety;


pub use inference::{predict_with, RiskPrediction, RiskPredictor, NOT_TRAINED_TEXT};
pub use safety::{SafetyNet, SAFETY_NET_MIN_CODE, THREAT_FLOOR};
