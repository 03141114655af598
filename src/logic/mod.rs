//! Logic Module - Assessment Engines
//!
//! ## Layout
//! - `survey/` - Input/output types (SurveyInput, observations, tiers)
//! - `context/` - Classroom atmosphere extraction from free-text notes
//! - `heuristic/` - Deterministic rule-based scorer
//! - `features/` - Versioned feature layout and vector builder
//! - `dataset/` - Historical records, label rules, data sources
//! - `model/` - Random forest classifier, artifact, artifact store
//! - `training/` - Full-retrain pipeline
//! - `explain/` - Attribution ranking and rendering
//! - `predictor/` - Probability, safety nets, explanation
//! - `engine` - Service object bundling all of the above

pub mod survey;
pub mod context;
pub mod heuristic;
pub mod features;
pub mod dataset;
pub mod model;
pub mod training;
pub mod explain;
pub mod predictor;
pub mod engine;
