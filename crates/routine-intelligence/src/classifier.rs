// ABOUTME: Classifier trait, model selection and the fitted-model wrapper
// ABOUTME: Lets the training pipeline and the service treat tree and forest uniformly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::forest::RandomForest;
use crate::tree::DecisionTree;
use routine_core::models::FeatureVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fitted multi-class classifier over encoded feature vectors
pub trait Classifier: Send + Sync {
    /// Number of label classes the model distinguishes
    fn n_classes(&self) -> usize;

    /// Class probability distribution for one row
    fn predict_proba(&self, features: &[f64]) -> Vec<f64>;

    /// Most probable class for one row (lowest index on ties)
    fn predict(&self, features: &[f64]) -> usize {
        argmax(&self.predict_proba(features))
    }

    /// Most probable class for every row
    fn predict_batch(&self, rows: &[FeatureVector]) -> Vec<usize> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}

/// Index of the largest value, first one wins on ties
#[must_use]
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = index;
        }
    }
    best
}

/// Number of features examined when searching for a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// Every feature
    #[default]
    All,
    /// `floor(sqrt(n))`, at least one
    Sqrt,
    /// `floor(log2(n))`, at least one
    Log2,
    /// A fixed count, clamped to `1..=n`
    Count(usize),
}

impl MaxFeatures {
    /// Resolve to a concrete count for `n_features` features
    #[must_use]
    pub fn resolve(self, n_features: usize) -> usize {
        let n = n_features.max(1);
        let count = match self {
            Self::All => n,
            Self::Sqrt => (n as f64).sqrt().floor() as usize,
            Self::Log2 => (n as f64).log2().floor() as usize,
            Self::Count(count) => count,
        };
        count.clamp(1, n)
    }
}

/// Which classifier to fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Single CART tree
    DecisionTree,
    /// Bagged ensemble of CART trees
    #[default]
    RandomForest,
}

impl ModelKind {
    /// Name reported by the health endpoint
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::DecisionTree => "DecisionTreeClassifier",
            Self::RandomForest => "RandomForestClassifier",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecisionTree => write!(f, "decision_tree"),
            Self::RandomForest => write!(f, "random_forest"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "decision_tree" | "tree" | "dt" => Ok(Self::DecisionTree),
            "random_forest" | "forest" | "rf" => Ok(Self::RandomForest),
            other => Err(format!(
                "unknown model kind '{other}' (expected 'random_forest' or 'decision_tree')"
            )),
        }
    }
}

/// The model kept in memory for the server's lifetime
#[derive(Debug, Clone)]
pub enum FittedModel {
    /// Fitted single tree
    DecisionTree(DecisionTree),
    /// Fitted forest
    RandomForest(RandomForest),
}

impl FittedModel {
    /// Kind of the wrapped model
    #[must_use]
    pub const fn kind(&self) -> ModelKind {
        match self {
            Self::DecisionTree(_) => ModelKind::DecisionTree,
            Self::RandomForest(_) => ModelKind::RandomForest,
        }
    }

    /// Out-of-bag accuracy, only available for forests fitted with bootstrap
    #[must_use]
    pub fn oob_score(&self) -> Option<f64> {
        match self {
            Self::DecisionTree(_) => None,
            Self::RandomForest(forest) => forest.oob_score(),
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            Self::DecisionTree(tree) => tree,
            Self::RandomForest(forest) => forest,
        }
    }
}

impl Classifier for FittedModel {
    fn n_classes(&self) -> usize {
        self.inner().n_classes()
    }

    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        self.inner().predict_proba(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
        assert_eq!(argmax(&[0.5]), 0);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn test_max_features_resolution() {
        assert_eq!(MaxFeatures::All.resolve(7), 7);
        assert_eq!(MaxFeatures::Sqrt.resolve(7), 2);
        assert_eq!(MaxFeatures::Log2.resolve(7), 2);
        assert_eq!(MaxFeatures::Count(0).resolve(7), 1);
        assert_eq!(MaxFeatures::Count(20).resolve(7), 7);
        assert_eq!(MaxFeatures::Sqrt.resolve(1), 1);
    }

    #[test]
    fn test_model_kind_parsing() {
        assert_eq!("random_forest".parse::<ModelKind>(), Ok(ModelKind::RandomForest));
        assert_eq!("Decision-Tree".parse::<ModelKind>(), Ok(ModelKind::DecisionTree));
        assert_eq!(" rf ".parse::<ModelKind>(), Ok(ModelKind::RandomForest));
        assert!("svm".parse::<ModelKind>().is_err());
        assert_eq!(ModelKind::RandomForest.to_string(), "random_forest");
        assert_eq!(ModelKind::DecisionTree.display_name(), "DecisionTreeClassifier");
    }
}
