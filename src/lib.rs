//! Wellbeing Risk - Core Assessment Engine
//!
//! Assesses bullying/wellbeing risk for a student from a structured survey
//! plus recent classroom observations.
//!
//! # Architecture
//!
//! ```text
//!   SurveyInput ──────────────► HeuristicScorer ──► RiskAnalysisResult
//!
//!   ItemAnswers ─────┐
//!                    ├─► FeatureBuilder ──► RiskPredictor ──► RiskPrediction
//!   Observations ──► ContextSignalExtractor      ▲   (safety nets + explanation)
//!                                                │
//!   HistoricalSource ──► ModelTrainer ──► ArtifactStore
//! ```
//!
//! Every engine is an explicitly constructed value; there are no
//! process-wide singletons. The only shared state is the model artifact,
//! held by [`logic::model::ArtifactStore`] and swapped atomically on retrain.

pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use logic::engine::{Assessment, AssessmentService};
pub use logic::heuristic::HeuristicScorer;
pub use logic::predictor::{RiskPrediction, RiskPredictor};
pub use logic::survey::{ClassObservation, RiskAnalysisResult, RiskTier, SurveyInput};
pub use logic::training::{ModelTrainer, TrainingReport};
