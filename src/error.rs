//! Error handling

use thiserror::Error;

use crate::logic::features::layout::LayoutMismatchError;

pub type EngineResult<T> = Result<T, EngineError>;

/// Survey answers outside the enumerated domain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurveyError {
    #[error("invalid frequency answer for `{field}`: {value:?}")]
    InvalidFrequency { field: String, value: String },

    #[error("invalid yes/no answer for `{field}`: {value:?}")]
    InvalidYesNo { field: String, value: String },

    #[error("missing required answer `{0}`")]
    MissingField(String),

    #[error("malformed survey payload: {0}")]
    Malformed(String),
}

/// Raw item answers that cannot be turned into a feature vector
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    #[error("answers are not a JSON object")]
    NotAnObject,

    #[error("item `{item}` is not numeric: {value}")]
    NonNumeric { item: String, value: String },

    #[error("atmosphere score {0} is outside [0, 1]")]
    AtmosphereOutOfRange(f64),

    #[error("raw answers are not valid JSON: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

/// Model artifact persistence failures
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("artifact checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("unsupported artifact format v{0}")]
    UnsupportedFormat(u8),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

/// Per-feature attribution could not be computed
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AttributionError {
    #[error("expected {expected} feature(s), got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("attribution for class {0} is not available")]
    MissingClass(u8),

    #[error("attribution contains non-finite values")]
    NonFinite,
}

/// Training failures, reported to the caller and never fatal
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("no usable training data: {skipped} record(s) skipped, nothing written")]
    EmptyDataset { skipped: usize },

    #[error("a retrain is already in progress")]
    AlreadyRunning,

    #[error("historical data source failed: {0}")]
    Source(String),

    #[error("failed to commit model artifact: {0}")]
    Artifact(#[from] ArtifactError),
}

/// Top-level engine error
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Survey(#[from] SurveyError),

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Training(#[from] TrainingError),
}
