//! Features Module - Feature Engineering
//!
//! Centralized layout, versioned vector, and the builder that merges
//! questionnaire answers with the classroom atmosphere signal.

pub mod layout;
pub mod vector;
pub mod builder;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{
    feature_name, ATMOSPHERE_INDEX, FEATURE_COUNT, FEATURE_LAYOUT, ITEM_COUNT,
    PHYSICAL_VIOLENCE_ITEM, THREATS_ITEM,
};
pub use vector::{FeatureVector, FeatureVectorBuilder};
pub use builder::{FeatureBuilder, ItemAnswers};
