//! Random Forest - bagged Gini trees with seeded bootstrap sampling

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::training_set::TrainingSet;
use super::tree::{DecisionTree, TreeConfig};
use crate::constants::{
    DEFAULT_FOREST_TREES, DEFAULT_MAX_DEPTH, DEFAULT_MIN_SAMPLES_LEAF, DEFAULT_MIN_SAMPLES_SPLIT,
    DEFAULT_SEED,
};
use crate::error::AttributionError;
use crate::logic::explain::RawAttribution;

/// Random Forest configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Features tried per split (sqrt of total if None)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_FOREST_TREES,
            max_depth: DEFAULT_MAX_DEPTH,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            min_samples_leaf: DEFAULT_MIN_SAMPLES_LEAF,
            max_features: None,
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }
}

/// Binary random forest classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    feature_names: Vec<String>,
    classes: Vec<u8>,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            feature_names: Vec::new(),
            classes: Vec::new(),
        }
    }

    /// Train the forest; each tree gets its own seeded RNG
    pub fn fit(&mut self, data: &TrainingSet) {
        self.feature_names = data.feature_names.clone();
        self.classes = data.classes();

        let n = data.len();
        let n_features = data.n_features();
        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize)
            .max(1);

        let tree_config = TreeConfig {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            min_samples_leaf: self.config.min_samples_leaf,
            max_features: Some(max_features),
        };

        let n_trees = self.config.n_trees.max(1);
        self.trees = (0..n_trees)
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed.wrapping_add(i as u64));
                let indices: Vec<usize> = if self.config.bootstrap && n > 0 {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };

                let mut tree = DecisionTree::new(tree_config);
                tree.fit(data, &indices, &mut rng);
                tree
            })
            .collect();

        log::debug!(
            "Forest fitted: {} trees, {} rows, {} features, classes {:?}",
            self.trees.len(),
            n,
            n_features,
            self.classes
        );
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Labels observed during training, sorted
    pub fn classes(&self) -> &[u8] {
        &self.classes
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Mean class-1 probability over all trees
    pub fn predict_proba(&self, x: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_proba_one(x)).sum();
        sum / self.trees.len() as f64
    }

    pub fn predict(&self, x: &[f64]) -> u8 {
        u8::from(self.predict_proba(x) >= 0.5)
    }

    /// Fraction of rows predicted correctly
    pub fn accuracy(&self, data: &TrainingSet) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let correct = data
            .features
            .iter()
            .zip(&data.labels)
            .filter(|&(x, &y)| self.predict(x) == y)
            .count();
        correct as f64 / data.len() as f64
    }

    /// Per-class path attribution averaged over the forest
    ///
    /// One row per observed class, ordered like `classes()`. The class-0
    /// row mirrors class 1 because the two probabilities sum to one.
    pub fn contributions(&self, x: &[f64]) -> Result<RawAttribution, AttributionError> {
        if x.len() != self.n_features() {
            return Err(AttributionError::DimensionMismatch {
                expected: self.n_features(),
                actual: x.len(),
            });
        }

        let mut positive = vec![0.0; x.len()];
        let mut bias = 0.0;
        for tree in &self.trees {
            bias += tree.contributions(x, &mut positive);
        }

        if !self.trees.is_empty() {
            let n = self.trees.len() as f64;
            bias /= n;
            positive.iter_mut().for_each(|v| *v /= n);
        }

        let rows = self
            .classes
            .iter()
            .map(|&class| {
                if class == 1 {
                    positive.clone()
                } else {
                    positive.iter().map(|v| -v).collect()
                }
            })
            .collect();

        let biases = self
            .classes
            .iter()
            .map(|&class| if class == 1 { bias } else { 1.0 - bias })
            .collect();

        Ok(RawAttribution::PerClass {
            classes: self.classes.clone(),
            rows,
            bias: biases,
        })
    }
}
