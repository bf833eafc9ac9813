// ABOUTME: Random forest classifier built from bootstrapped CART trees
// ABOUTME: Trees are fitted in parallel with rayon and scored out-of-bag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::classifier::{argmax, Classifier, MaxFeatures};
use crate::errors::TrainingError;
use crate::split::EncodedDataset;
use crate::tree::{DecisionTree, TreeParams};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ensemble hyper-parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees
    pub n_estimators: usize,
    /// Per-tree growth limits
    pub tree: TreeParams,
    /// Draw each tree's rows with replacement
    pub bootstrap: bool,
    /// Base seed; tree `i` uses `seed + i`
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 150,
            tree: TreeParams {
                max_features: MaxFeatures::Sqrt,
                ..TreeParams::default()
            },
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Fitted forest; prediction averages the trees' class distributions
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
    oob_score: Option<f64>,
}

impl RandomForest {
    /// Fit `params.n_estimators` trees on `data`
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::InvalidConfig`] for a forest without trees and
    /// propagates tree fitting failures.
    pub fn fit(data: &EncodedDataset, n_classes: usize, params: ForestParams) -> Result<Self, TrainingError> {
        if params.n_estimators == 0 {
            return Err(TrainingError::InvalidConfig(
                "n_estimators must be at least 1".to_owned(),
            ));
        }
        if data.is_empty() {
            return Err(TrainingError::InsufficientData(
                "cannot fit a forest without training rows".to_owned(),
            ));
        }

        let n_rows = data.len();
        let fitted = (0..params.n_estimators)
            .into_par_iter()
            .map(|index| -> Result<(DecisionTree, Vec<bool>), TrainingError> {
                let mut rng = ChaCha8Rng::seed_from_u64(params.seed.wrapping_add(index as u64));
                let rows: Vec<usize> = if params.bootstrap {
                    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect()
                } else {
                    (0..n_rows).collect()
                };

                let mut in_bag = vec![false; n_rows];
                for &row in &rows {
                    in_bag[row] = true;
                }

                let tree = DecisionTree::fit_rows(
                    &data.features,
                    &data.labels,
                    rows,
                    n_classes,
                    params.tree,
                    &mut rng,
                )?;
                Ok((tree, in_bag))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let oob_score = if params.bootstrap {
            out_of_bag_score(data, n_classes, &fitted)
        } else {
            None
        };
        let trees: Vec<DecisionTree> = fitted.into_iter().map(|(tree, _)| tree).collect();

        debug!(
            n_estimators = trees.len(),
            max_depth = trees.iter().map(DecisionTree::depth).max().unwrap_or_default(),
            oob_score = ?oob_score,
            "Random forest fitted"
        );

        Ok(Self {
            trees,
            n_classes,
            oob_score,
        })
    }

    /// Accuracy on rows each tree did not draw, `None` if every row was drawn by every tree
    #[must_use]
    pub const fn oob_score(&self) -> Option<f64> {
        self.oob_score
    }

    /// Number of fitted trees
    #[must_use]
    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }
}

fn out_of_bag_score(
    data: &EncodedDataset,
    n_classes: usize,
    fitted: &[(DecisionTree, Vec<bool>)],
) -> Option<f64> {
    let mut votes = vec![vec![0.0; n_classes]; data.len()];
    let mut voted = vec![false; data.len()];

    for (tree, in_bag) in fitted {
        for (row, features) in data.features.iter().enumerate() {
            if in_bag[row] {
                continue;
            }
            voted[row] = true;
            for (total, share) in votes[row].iter_mut().zip(tree.predict_proba(features)) {
                *total += share;
            }
        }
    }

    let scored: Vec<(usize, usize)> = votes
        .iter()
        .zip(&voted)
        .zip(&data.labels)
        .filter(|((_, &was_voted), _)| was_voted)
        .map(|((row_votes, _), &label)| (label, argmax(row_votes)))
        .collect();

    if scored.is_empty() {
        return None;
    }
    let correct = scored.iter().filter(|(truth, guess)| truth == guess).count();
    Some(correct as f64 / scored.len() as f64)
}

impl Classifier for RandomForest {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut totals = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (total, share) in totals.iter_mut().zip(tree.predict_proba(features)) {
                *total += share;
            }
        }
        let count = self.trees.len().max(1) as f64;
        totals.iter().map(|total| total / count).collect()
    }
}
