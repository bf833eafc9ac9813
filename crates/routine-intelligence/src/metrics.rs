// ABOUTME: Evaluation metrics for fitted classifiers
// ABOUTME: Accuracy over aligned expected/predicted label slices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Fraction of positions where `predicted` equals `expected`.
///
/// Returns `None` when there is nothing to score or the slices differ in length.
#[must_use]
pub fn accuracy(expected: &[usize], predicted: &[usize]) -> Option<f64> {
    if expected.is_empty() || expected.len() != predicted.len() {
        return None;
    }
    let correct = expected
        .iter()
        .zip(predicted)
        .filter(|(truth, guess)| truth == guess)
        .count();
    Some(correct as f64 / expected.len() as f64)
}
