/*!
 * # Random forest regressor
 *
 * Bagged CART regression trees with squared-error splits. Defaults: 100
 * fully grown trees, bootstrap sampling, every feature considered at each
 * split.
 */

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{StockoutFeatures, StockoutModel, FEATURE_COUNT};
use crate::errors::ServiceError;

type Sample = [f64; FEATURE_COUNT];

/// Forest hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub seed: u64,
    /// Minimum rows a node needs before it may be split
    pub min_samples_split: usize,
    /// Minimum rows on each side of a split
    pub min_samples_leaf: usize,
    pub max_depth: Option<usize>,
    pub bootstrap: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            seed: 42,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_depth: None,
            bootstrap: true,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    score: f64,
}

/// A single regression tree stored as a flat node arena; node 0 is the root.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    fn fit(
        samples: &[Sample],
        targets: &[f64],
        indices: &mut [usize],
        config: &ForestConfig,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(samples, targets, indices, 0, config, rng);
        tree
    }

    fn grow(
        &mut self,
        samples: &[Sample],
        targets: &[f64],
        indices: &mut [usize],
        depth: usize,
        config: &ForestConfig,
        rng: &mut StdRng,
    ) -> usize {
        let id = self.nodes.len();
        let mean = indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64;
        self.nodes.push(Node::Leaf { value: mean });

        let depth_exhausted = config.max_depth.map_or(false, |max| depth >= max);
        if indices.len() < config.min_samples_split || depth_exhausted || is_pure(targets, indices)
        {
            return id;
        }

        let Some(split) = best_split(samples, targets, indices, config.min_samples_leaf, rng) else {
            return id;
        };

        let mid = partition(indices, |i| samples[i][split.feature] <= split.threshold);
        if mid == 0 || mid == indices.len() {
            return id;
        }

        let (left_indices, right_indices) = indices.split_at_mut(mid);
        let left = self.grow(samples, targets, left_indices, depth + 1, config, rng);
        let right = self.grow(samples, targets, right_indices, depth + 1, config, rng);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    pub fn predict(&self, sample: &Sample) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if sample[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn is_pure(targets: &[f64], indices: &[usize]) -> bool {
    let first = targets[indices[0]];
    indices
        .iter()
        .all(|&i| (targets[i] - first).abs() <= f64::EPSILON)
}

/// Moves every index satisfying `goes_left` to the front; returns the boundary.
fn partition(indices: &mut [usize], goes_left: impl Fn(usize) -> bool) -> usize {
    let mut mid = 0;
    for i in 0..indices.len() {
        if goes_left(indices[i]) {
            indices.swap(i, mid);
            mid += 1;
        }
    }
    mid
}

/// Finds the threshold maximizing squared-error reduction. A zero-gain split
/// is still taken, so non-pure nodes keep growing until leaves are pure.
///
/// Maximizing `sum_l^2 / n_l + sum_r^2 / n_r` is equivalent to minimizing the
/// children's total squared error, without recomputing variances per cut.
fn best_split(
    samples: &[Sample],
    targets: &[f64],
    indices: &[usize],
    min_samples_leaf: usize,
    rng: &mut StdRng,
) -> Option<SplitCandidate> {
    let n = indices.len();
    let total: f64 = indices.iter().map(|&i| targets[i]).sum();
    let min_leaf = min_samples_leaf.max(1);

    let mut features: Vec<usize> = (0..FEATURE_COUNT).collect();
    features.shuffle(rng);

    let mut best: Option<SplitCandidate> = None;
    let mut column: Vec<(f64, f64)> = Vec::with_capacity(n);

    for feature in features {
        column.clear();
        column.extend(indices.iter().map(|&i| (samples[i][feature], targets[i])));
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_sum = 0.0;
        for cut in 1..n {
            left_sum += column[cut - 1].1;
            if cut < min_leaf || n - cut < min_leaf {
                continue;
            }
            let (lower, upper) = (column[cut - 1].0, column[cut].0);
            if upper <= lower {
                continue;
            }

            let right_sum = total - left_sum;
            let score = left_sum * left_sum / cut as f64
                + right_sum * right_sum / (n - cut) as f64;
            if best.as_ref().map_or(true, |b| score > b.score) {
                let mut threshold = lower + (upper - lower) / 2.0;
                if threshold >= upper {
                    threshold = lower;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    score,
                });
            }
        }
    }

    best
}

/// Bagged ensemble of [`RegressionTree`]s.
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    trees: Vec<RegressionTree>,
    version: String,
}

impl RandomForestRegressor {
    pub fn fit(
        config: ForestConfig,
        samples: &[Sample],
        targets: &[f64],
    ) -> Result<Self, ServiceError> {
        if samples.is_empty() {
            return Err(ServiceError::ModelError(
                "cannot fit a forest on an empty dataset".to_string(),
            ));
        }
        if samples.len() != targets.len() {
            return Err(ServiceError::ModelError(format!(
                "{} feature rows but {} targets",
                samples.len(),
                targets.len()
            )));
        }
        if config.n_estimators == 0 {
            return Err(ServiceError::ModelError(
                "forest needs at least one tree".to_string(),
            ));
        }
        if targets.iter().any(|t| !t.is_finite())
            || samples.iter().flatten().any(|v| !v.is_finite())
        {
            return Err(ServiceError::ModelError(
                "training data contains non-finite values".to_string(),
            ));
        }

        let n = samples.len();
        let mut seeder = StdRng::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.n_estimators);
        for _ in 0..config.n_estimators {
            let mut rng = StdRng::seed_from_u64(seeder.gen());
            let mut indices: Vec<usize> = if config.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };
            trees.push(RegressionTree::fit(
                samples,
                targets,
                &mut indices,
                &config,
                &mut rng,
            ));
        }

        Ok(Self {
            trees,
            version: format!(
                "random-forest/{}-trees/seed-{}",
                config.n_estimators, config.seed
            ),
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn predict_sample(&self, sample: &Sample) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.predict(sample)).sum();
        sum / self.trees.len() as f64
    }
}

impl StockoutModel for RandomForestRegressor {
    fn model_version(&self) -> &str {
        &self.version
    }

    fn predict(&self, features: &StockoutFeatures) -> f64 {
        self.predict_sample(&features.to_array())
    }
}
