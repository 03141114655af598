//! Training Module - Retraining the classifier from historical data

pub mod report;
pub mod trainer;

#[cfg(test)]
mod tests;

pub use report::TrainingReport;
pub use trainer::{ModelTrainer, PreparedDataset};
