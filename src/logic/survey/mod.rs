//! Survey Module
//!
//! Types exchanged with the form-submission and persistence collaborators.

pub mod types;


pub use types::{
    ClassObservation,
    Frequency,
    RiskAnalysisResult,
    RiskTier,
    SurveyInput,
    YesNo,
};
