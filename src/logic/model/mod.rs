//! Model Module - Random forest classifier and its artifact lifecycle
//!
//! train -> persist -> load -> predict; artifacts are replaced wholesale.

pub mod tree;
pub mod forest;
pub mod training_set;
pub mod artifact;
pub mod store;

#[cfg(test)]
mod tests;

pub use artifact::{ModelArtifact, ARTIFACT_FORMAT};
pub use forest::{ForestConfig, RandomForest};
pub use store::ArtifactStore;
pub use training_set::TrainingSet;
pub use tree::{DecisionTree, TreeConfig};
