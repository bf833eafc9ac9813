// ABOUTME: CART decision tree classifier using Gini impurity
// ABOUTME: Supports depth limits, leaf size limits and random feature subsampling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Decision tree.
//!
//! Nodes live in a flat arena indexed from the root at position 0. Splits
//! send rows with `feature <= threshold` to the left child, where the
//! threshold is the midpoint between two adjacent distinct values. Leaves keep
//! the class distribution of the training rows that reached them.

use crate::classifier::{Classifier, MaxFeatures};
use crate::errors::TrainingError;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use routine_core::models::{FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth; `None` grows until leaves are pure or too small
    pub max_depth: Option<usize>,
    /// Minimum rows a node needs to be split
    pub min_samples_split: usize,
    /// Minimum rows each child of a split must keep
    pub min_samples_leaf: usize,
    /// Features sampled per split
    pub max_features: MaxFeatures,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Fitted CART classifier
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
    depth: usize,
}

struct Grower<'a> {
    features: &'a [FeatureVector],
    labels: &'a [usize],
    n_classes: usize,
    params: TreeParams,
    n_sampled: usize,
    rng: &'a mut ChaCha8Rng,
    nodes: Vec<Node>,
    depth: usize,
}

impl DecisionTree {
    /// Fit on every row of `features`/`labels`
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InsufficientData`] when there are no rows,
    /// the slices are misaligned, or a label is not below `n_classes`.
    pub fn fit(
        features: &[FeatureVector],
        labels: &[usize],
        n_classes: usize,
        params: TreeParams,
        rng: &mut ChaCha8Rng,
    ) -> Result<Self, TrainingError> {
        Self::fit_rows(features, labels, (0..labels.len()).collect(), n_classes, params, rng)
    }

    /// Fit on the rows listed in `rows`; repeated indices weigh a row more
    ///
    /// # Errors
    ///
    /// Same conditions as [`DecisionTree::fit`].
    pub fn fit_rows(
        features: &[FeatureVector],
        labels: &[usize],
        rows: Vec<usize>,
        n_classes: usize,
        params: TreeParams,
        rng: &mut ChaCha8Rng,
    ) -> Result<Self, TrainingError> {
        if rows.is_empty() || n_classes == 0 {
            return Err(TrainingError::InsufficientData(
                "cannot fit a tree without training rows".to_owned(),
            ));
        }
        if features.len() != labels.len() {
            return Err(TrainingError::InsufficientData(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if let Some(&bad) = rows.iter().find(|&&row| row >= labels.len() || labels[row] >= n_classes) {
            return Err(TrainingError::InsufficientData(format!(
                "row {bad} is out of range or carries a label outside 0..{n_classes}"
            )));
        }

        let mut grower = Grower {
            features,
            labels,
            n_classes,
            params,
            n_sampled: params.max_features.resolve(FEATURE_COUNT),
            rng,
            nodes: Vec::new(),
            depth: 0,
        };
        grower.grow(rows, 0);

        Ok(Self {
            nodes: grower.nodes,
            n_classes,
            depth: grower.depth,
        })
    }

    /// Depth of the deepest leaf (a single leaf has depth 0)
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Number of leaves
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    fn leaf_for(&self, features: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or_default();
                    index = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

impl Classifier for DecisionTree {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        self.leaf_for(features).to_vec()
    }
}

impl Grower<'_> {
    fn grow(&mut self, rows: Vec<usize>, depth: usize) -> usize {
        self.depth = self.depth.max(depth);
        let counts = self.class_counts(&rows);
        let node_id = self.nodes.len();

        let pure = counts.iter().filter(|&&count| count > 0).count() <= 1;
        let depth_reached = self.params.max_depth.is_some_and(|max| depth >= max);
        let too_small = rows.len() < self.params.min_samples_split.max(2)
            || rows.len() < 2 * self.params.min_samples_leaf.max(1);

        let split = if pure || depth_reached || too_small {
            None
        } else {
            self.best_split(&rows)
        };

        let Some(split) = split else {
            self.nodes.push(Node::Leaf {
                distribution: distribution(&counts, rows.len()),
            });
            return node_id;
        };

        // Reserve the slot so children get larger indices than their parent
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&row| self.features[row][split.feature] <= split.threshold);
        let left = self.grow(left_rows, depth + 1);
        let right = self.grow(right_rows, depth + 1);

        self.nodes[node_id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_id
    }

    fn class_counts(&self, rows: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes];
        for &row in rows {
            counts[self.labels[row]] += 1;
        }
        counts
    }

    /// Visit features in random order. Keep looking past the sampled count
    /// until at least one valid split exists.
    fn best_split(&mut self, rows: &[usize]) -> Option<SplitCandidate> {
        let mut order: Vec<usize> = (0..FEATURE_COUNT).collect();
        if self.n_sampled < FEATURE_COUNT {
            order.shuffle(&mut *self.rng);
        }

        let mut best: Option<SplitCandidate> = None;
        for (visited, &feature) in order.iter().enumerate() {
            if visited >= self.n_sampled && best.is_some() {
                break;
            }
            if let Some(candidate) = self.best_split_on(rows, feature) {
                if best.is_none_or(|current| candidate.impurity < current.impurity) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    fn best_split_on(&self, rows: &[usize], feature: usize) -> Option<SplitCandidate> {
        let mut sorted: Vec<(f64, usize)> = rows
            .iter()
            .map(|&row| (self.features[row][feature], self.labels[row]))
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let total = sorted.len();
        let min_leaf = self.params.min_samples_leaf.max(1);
        let mut right_counts = vec![0usize; self.n_classes];
        for &(_, label) in &sorted {
            right_counts[label] += 1;
        }
        let mut left_counts = vec![0usize; self.n_classes];

        let mut best: Option<SplitCandidate> = None;
        for position in 0..total - 1 {
            let (value, label) = sorted[position];
            left_counts[label] += 1;
            right_counts[label] -= 1;

            let next_value = sorted[position + 1].0;
            if value >= next_value {
                continue;
            }
            let n_left = position + 1;
            let n_right = total - n_left;
            if n_left < min_leaf || n_right < min_leaf {
                continue;
            }

            let impurity = (n_left as f64).mul_add(
                gini(&left_counts, n_left),
                n_right as f64 * gini(&right_counts, n_right),
            ) / total as f64;

            if best.is_none_or(|current| impurity < current.impurity) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (value + next_value) / 2.0,
                    impurity,
                });
            }
        }
        best
    }
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&count| {
            let share = count as f64 / total;
            share * share
        })
        .sum::<f64>()
}

fn distribution(counts: &[usize], total: usize) -> Vec<f64> {
    let total = total.max(1) as f64;
    counts.iter().map(|&count| count as f64 / total).collect()
}
