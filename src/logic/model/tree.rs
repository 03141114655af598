//! Decision Tree - binary Gini classification tree
//!
//! Nodes live in a flat arena so the tree serializes as a plain list and
//! prediction/attribution are simple index walks.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::training_set::TrainingSet;

/// Decision tree configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all)
    pub max_features: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }
}

/// Internal split of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub feature: usize,
    /// Samples with `x[feature] <= threshold` go left
    pub threshold: f64,
    pub left: usize,
    pub right: usize,
}

/// Tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Share of class-1 samples that reached this node
    pub positive_rate: f64,
    pub n_samples: usize,
    pub impurity: f64,
    pub split: Option<Split>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.split.is_none()
    }
}

/// Binary classification tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    config: TreeConfig,
    nodes: Vec<TreeNode>,
}

/// (feature, threshold, left indices, right indices)
type Candidate = (usize, f64, Vec<usize>, Vec<usize>);

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self { config, nodes: Vec::new() }
    }

    /// Train on the rows selected by `indices` (may contain repeats)
    pub fn fit(&mut self, data: &TrainingSet, indices: &[usize], rng: &mut ChaCha8Rng) {
        self.nodes.clear();
        self.build(data, indices, 0, rng);
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn is_fitted(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], idx: usize) -> usize {
            match nodes[idx].split {
                Some(s) => 1 + walk(nodes, s.left).max(walk(nodes, s.right)),
                None => 1,
            }
        }
        if self.nodes.is_empty() { 0 } else { walk(&self.nodes, 0) }
    }

    /// Builds the subtree and returns its node index
    fn build(&mut self, data: &TrainingSet, indices: &[usize], depth: usize, rng: &mut ChaCha8Rng) -> usize {
        let n = indices.len();
        let positives = indices.iter().filter(|&&i| data.labels[i] == 1).count();
        let positive_rate = if n == 0 { 0.0 } else { positives as f64 / n as f64 };
        let impurity = gini(positive_rate);

        let id = self.nodes.len();
        self.nodes.push(TreeNode { positive_rate, n_samples: n, impurity, split: None });

        if depth >= self.config.max_depth
            || n < self.config.min_samples_split
            || impurity < 1e-12
        {
            return id;
        }

        if let Some((feature, threshold, left_idx, right_idx)) = self.best_split(data, indices, impurity, rng) {
            let left = self.build(data, &left_idx, depth + 1, rng);
            let right = self.build(data, &right_idx, depth + 1, rng);
            self.nodes[id].split = Some(Split { feature, threshold, left, right });
        }

        id
    }

    fn best_split(
        &self,
        data: &TrainingSet,
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<Candidate> {
        let n_features = data.n_features();
        let max_features = self.config.max_features.unwrap_or(n_features).clamp(1, n_features.max(1));

        let mut features: Vec<usize> = (0..n_features).collect();
        features.shuffle(rng);

        let n = indices.len();
        let min_leaf = self.config.min_samples_leaf.max(1);
        let mut best_gain = 0.0;
        let mut best: Option<(usize, f64)> = None;
        let mut visited = 0;

        // Constant features don't count toward max_features
        for &feature in &features {
            if visited >= max_features {
                break;
            }

            let mut column: Vec<(f64, u8)> = indices
                .iter()
                .map(|&i| (data.features[i][feature], data.labels[i]))
                .collect();
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            if column.first().map(|c| c.0) == column.last().map(|c| c.0) {
                continue;
            }
            visited += 1;

            let total_pos = column.iter().filter(|(_, y)| *y == 1).count();
            let mut left_pos = 0usize;

            // Sweep split points between distinct values
            for k in 0..n.saturating_sub(1) {
                if column[k].1 == 1 {
                    left_pos += 1;
                }
                if column[k].0 == column[k + 1].0 {
                    continue;
                }

                let n_left = k + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let p_left = left_pos as f64 / n_left as f64;
                let p_right = (total_pos - left_pos) as f64 / n_right as f64;
                let weighted = (n_left as f64 * gini(p_left) + n_right as f64 * gini(p_right)) / n as f64;
                let gain = parent_impurity - weighted;

                if gain > best_gain + 1e-12 {
                    best_gain = gain;
                    best = Some((feature, (column[k].0 + column[k + 1].0) / 2.0));
                }
            }
        }

        best.map(|(feature, threshold)| {
            let (left, right): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .copied()
                .partition(|&i| data.features[i][feature] <= threshold);
            (feature, threshold, left, right)
        })
    }

    /// Index of the leaf reached by `x`
    fn leaf_for(&self, x: &[f64]) -> usize {
        let mut idx = 0;
        while let Some(split) = self.nodes[idx].split {
            idx = if x[split.feature] <= split.threshold { split.left } else { split.right };
        }
        idx
    }

    /// Class-1 probability; `x` must have the training width
    pub fn predict_proba_one(&self, x: &[f64]) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        self.nodes[self.leaf_for(x)].positive_rate
    }

    /// Path attribution for class 1
    ///
    /// Each split credits its feature with the change in positive rate
    /// between parent and child. `bias + sum(contributions)` equals the
    /// predicted probability.
    pub fn contributions(&self, x: &[f64], out: &mut [f64]) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }

        let bias = self.nodes[0].positive_rate;
        let mut idx = 0;
        while let Some(split) = self.nodes[idx].split {
            let next = if x[split.feature] <= split.threshold { split.left } else { split.right };
            out[split.feature] += self.nodes[next].positive_rate - self.nodes[idx].positive_rate;
            idx = next;
        }
        bias
    }
}

/// Binary Gini impurity from the positive share
fn gini(p: f64) -> f64 {
    2.0 * p * (1.0 - p)
}
