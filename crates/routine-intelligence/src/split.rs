// ABOUTME: Encoded dataset container, rare-class filtering and stratified train/test split
// ABOUTME: Deterministic for a given seed via ChaCha8 shuffling per class
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::TrainingError;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use routine_core::models::FeatureVector;
use std::collections::BTreeMap;

/// Feature matrix and label codes, row-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedDataset {
    /// One feature vector per row
    pub features: Vec<FeatureVector>,
    /// Label code per row
    pub labels: Vec<usize>,
}

impl EncodedDataset {
    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row count per label code
    #[must_use]
    pub fn class_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for &label in &self.labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    /// Remove every row whose class has fewer than `min_members` rows.
    ///
    /// Returns the removed label codes in ascending order.
    pub fn drop_rare_classes(&mut self, min_members: usize) -> Vec<usize> {
        let rare: Vec<usize> = self
            .class_counts()
            .into_iter()
            .filter(|&(_, count)| count < min_members)
            .map(|(label, _)| label)
            .collect();

        if rare.is_empty() {
            return rare;
        }

        let (features, labels): (Vec<FeatureVector>, Vec<usize>) = self
            .features
            .iter()
            .zip(&self.labels)
            .filter(|(_, label)| !rare.contains(*label))
            .map(|(features, &label)| (*features, label))
            .unzip();
        self.features = features;
        self.labels = labels;

        rare
    }

    /// Rows selected by `indices`
    #[must_use]
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            features: indices.iter().map(|&i| self.features[i]).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

/// Row indices of the two partitions, each sorted ascending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    /// Rows used for fitting
    pub train: Vec<usize>,
    /// Rows held out for evaluation
    pub test: Vec<usize>,
}

/// Stratified split keeping each class's proportion in both partitions.
///
/// Each class contributes `round(count * test_size)` rows to the test set,
/// capped so at least one row of every class stays in the training set.
///
/// # Errors
///
/// Returns [`TrainingError::InvalidConfig`] unless `0.0 <= test_size < 1.0`.
pub fn stratified_split(
    labels: &[usize],
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit, TrainingError> {
    if !(0.0..1.0).contains(&test_size) {
        return Err(TrainingError::InvalidConfig(format!(
            "test_size must be in [0, 1), got {test_size}"
        )));
    }

    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (row, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(row);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for mut rows in by_class.into_values() {
        rows.shuffle(&mut rng);
        let wanted = (rows.len() as f64 * test_size).round() as usize;
        let n_test = wanted.min(rows.len().saturating_sub(1));
        test.extend_from_slice(&rows[..n_test]);
        train.extend_from_slice(&rows[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok(TrainTestSplit { train, test })
}
