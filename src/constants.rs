//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment overrides are resolved in `config.rs`.

/// Application directory name under the local data dir
pub const APP_DIR_NAME: &str = "wellbeing-risk";

/// Default model artifact file name
pub const DEFAULT_MODEL_FILE: &str = "model_v1.json";

/// Maximum number of classroom observations considered per assessment
pub const OBSERVATION_WINDOW: usize = 5;

/// Default number of trees in the forest
pub const DEFAULT_FOREST_TREES: usize = 100;

/// Default maximum tree depth
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Default minimum samples required to split a node
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;

/// Default minimum samples in a leaf
pub const DEFAULT_MIN_SAMPLES_LEAF: usize = 1;

/// Default training seed (reproducible forests)
pub const DEFAULT_SEED: u64 = 42;
