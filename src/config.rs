//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::constants::{
    APP_DIR_NAME, DEFAULT_FOREST_TREES, DEFAULT_MAX_DEPTH, DEFAULT_MIN_SAMPLES_LEAF,
    DEFAULT_MIN_SAMPLES_SPLIT, DEFAULT_MODEL_FILE, DEFAULT_SEED, OBSERVATION_WINDOW,
};
use crate::logic::model::ForestConfig;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Where the model artifact is read from and committed to
    pub model_path: PathBuf,

    /// Forest hyper-parameters used by the trainer
    pub forest: ForestConfig,

    /// Number of recent observations fed to the atmosphere extractor
    pub observation_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            forest: ForestConfig::default(),
            observation_window: OBSERVATION_WINDOW,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_path: env::var("RISK_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_model_path()),

            forest: ForestConfig {
                n_trees: env_parse("RISK_FOREST_TREES").unwrap_or(DEFAULT_FOREST_TREES),
                max_depth: env_parse("RISK_FOREST_MAX_DEPTH").unwrap_or(DEFAULT_MAX_DEPTH),
                min_samples_split: env_parse("RISK_FOREST_MIN_SPLIT")
                    .unwrap_or(DEFAULT_MIN_SAMPLES_SPLIT),
                min_samples_leaf: env_parse("RISK_FOREST_MIN_LEAF")
                    .unwrap_or(DEFAULT_MIN_SAMPLES_LEAF),
                seed: env_parse("RISK_FOREST_SEED").unwrap_or(DEFAULT_SEED),
                ..ForestConfig::default()
            },

            observation_window: observation_window(env_parse("RISK_OBSERVATION_WINDOW")),
        }
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }
}

/// Override may lower the window but not raise it; 0 falls back to the default
fn observation_window(raw: Option<usize>) -> usize {
    raw.filter(|w| *w > 0)
        .map(|w| w.min(OBSERVATION_WINDOW))
        .unwrap_or(OBSERVATION_WINDOW)
}

/// Get default model artifact path
pub fn default_model_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(DEFAULT_MODEL_FILE)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.observation_window, OBSERVATION_WINDOW);
        assert_eq!(config.forest.n_trees, DEFAULT_FOREST_TREES);
        assert!(config.model_path.ends_with(DEFAULT_MODEL_FILE));
    }

    #[test]
    fn test_observation_window_override() {
        assert_eq!(observation_window(None), OBSERVATION_WINDOW);
        assert_eq!(observation_window(Some(0)), OBSERVATION_WINDOW);
        assert_eq!(observation_window(Some(3)), 3);
        assert_eq!(observation_window(Some(99)), OBSERVATION_WINDOW);
    }

    #[test]
    fn test_with_model_path() {
        let config = EngineConfig::default().with_model_path("/tmp/custom.json");
        assert_eq!(config.model_path, PathBuf::from("/tmp/custom.json"));
    }
}
