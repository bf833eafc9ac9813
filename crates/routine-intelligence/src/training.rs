// ABOUTME: End-to-end training pipeline from CSV records to a ready-to-serve recommender
// ABOUTME: Encodes, filters rare classes, splits, fits and evaluates the configured model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::classifier::{Classifier, FittedModel, MaxFeatures, ModelKind};
use crate::dataset::load_records;
use crate::encoding::EncoderTable;
use crate::errors::TrainingError;
use crate::forest::{ForestParams, RandomForest};
use crate::metrics::accuracy;
use crate::split::{stratified_split, EncodedDataset};
use crate::tree::{DecisionTree, TreeParams};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use routine_core::constants::training;
use routine_core::models::{TrainingRecord, UserAttributes};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Knobs for [`train`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Model to fit
    pub model: ModelKind,
    /// Trees in the forest (ignored for a single tree)
    pub n_estimators: usize,
    /// Seed for the split and the model
    pub seed: u64,
    /// Fraction of each class held out for evaluation
    pub test_size: f64,
    /// Optional depth limit for every tree
    pub max_depth: Option<usize>,
    /// Classes with fewer rows are dropped before splitting
    pub min_class_members: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::RandomForest,
            n_estimators: training::DEFAULT_N_ESTIMATORS,
            seed: training::DEFAULT_RANDOM_SEED,
            test_size: training::DEFAULT_TEST_SIZE,
            max_depth: None,
            min_class_members: training::MIN_CLASS_MEMBERS,
        }
    }
}

/// Summary of a training run, reported by `/health` and the trainer binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Classifier name, e.g. `RandomForestClassifier`
    pub model: String,
    /// Rows loaded from the dataset
    pub total_samples: usize,
    /// Routines removed for having too few rows
    pub dropped_classes: Vec<String>,
    /// Rows used for fitting
    pub train_samples: usize,
    /// Rows held out for evaluation
    pub test_samples: usize,
    /// Accuracy on the held-out rows, `None` when nothing was held out
    pub test_accuracy: Option<f64>,
    /// Out-of-bag accuracy, forests only
    pub oob_accuracy: Option<f64>,
    /// Wall-clock fitting time
    pub training_time_ms: u64,
}

/// A fitted model together with the encoders it was trained with
#[derive(Debug, Clone)]
pub struct TrainedRecommender {
    model: FittedModel,
    encoders: EncoderTable,
    report: TrainingReport,
}

impl TrainedRecommender {
    /// Recommend a routine for already-normalized attributes
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::UnknownCategory`] when a categorical value was
    /// not part of the training data.
    pub fn predict(&self, attributes: &UserAttributes) -> Result<String, TrainingError> {
        let features = self.encoders.encode_attributes(attributes)?;
        let class = self.model.predict(&features);
        self.encoders.decode_label(class).map(str::to_owned)
    }

    /// The fitted classifier
    #[must_use]
    pub const fn model(&self) -> &FittedModel {
        &self.model
    }

    /// Encoders learned from the dataset
    #[must_use]
    pub const fn encoders(&self) -> &EncoderTable {
        &self.encoders
    }

    /// How training went
    #[must_use]
    pub const fn report(&self) -> &TrainingReport {
        &self.report
    }
}

/// Load the CSV at `path` and train on it
///
/// # Errors
///
/// Propagates loading and training failures.
pub fn train_from_path(path: &Path, config: &TrainingConfig) -> Result<TrainedRecommender, TrainingError> {
    let records = load_records(path)?;
    train(&records, config)
}

/// Fit encoders and the configured model on `records`
///
/// # Errors
///
/// Returns [`TrainingError::InsufficientData`] when there are no records or
/// no class survives rare-class filtering, and
/// [`TrainingError::InvalidConfig`] for an out-of-range `test_size`.
pub fn train(records: &[TrainingRecord], config: &TrainingConfig) -> Result<TrainedRecommender, TrainingError> {
    if records.is_empty() {
        return Err(TrainingError::InsufficientData("no training records".to_owned()));
    }
    let started = Instant::now();

    let encoders = EncoderTable::fit(records);
    let mut data = EncodedDataset::default();
    for record in records {
        let (features, label) = encoders.encode_record(record)?;
        data.features.push(features);
        data.labels.push(label);
    }

    let dropped_classes: Vec<String> = data
        .drop_rare_classes(config.min_class_members)
        .into_iter()
        .map(|code| encoders.decode_label(code).map(str::to_owned))
        .collect::<Result<_, _>>()?;
    if !dropped_classes.is_empty() {
        warn!(
            dropped = ?dropped_classes,
            min_members = config.min_class_members,
            "Dropping routines with too few samples"
        );
    }
    if data.is_empty() {
        return Err(TrainingError::InsufficientData(format!(
            "no routine has at least {} samples",
            config.min_class_members
        )));
    }

    let split = stratified_split(&data.labels, config.test_size, config.seed)?;
    let train_set = data.subset(&split.train);
    let test_set = data.subset(&split.test);

    let n_classes = encoders.label().len();
    let model = fit_model(&train_set, n_classes, config)?;

    let test_accuracy = accuracy(&test_set.labels, &model.predict_batch(&test_set.features));
    let oob_accuracy = model.oob_score();
    let training_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let report = TrainingReport {
        model: model.kind().display_name().to_owned(),
        total_samples: records.len(),
        dropped_classes,
        train_samples: train_set.len(),
        test_samples: test_set.len(),
        test_accuracy,
        oob_accuracy,
        training_time_ms,
    };

    info!(
        model = %report.model,
        total_samples = report.total_samples,
        train_samples = report.train_samples,
        test_samples = report.test_samples,
        routines = n_classes,
        test_accuracy = ?report.test_accuracy,
        oob_accuracy = ?report.oob_accuracy,
        training_time_ms = report.training_time_ms,
        "Model trained"
    );

    Ok(TrainedRecommender {
        model,
        encoders,
        report,
    })
}

fn fit_model(
    train_set: &EncodedDataset,
    n_classes: usize,
    config: &TrainingConfig,
) -> Result<FittedModel, TrainingError> {
    match config.model {
        ModelKind::DecisionTree => {
            let params = TreeParams {
                max_depth: config.max_depth,
                ..TreeParams::default()
            };
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
            DecisionTree::fit(&train_set.features, &train_set.labels, n_classes, params, &mut rng)
                .map(FittedModel::DecisionTree)
        }
        ModelKind::RandomForest => {
            let params = ForestParams {
                n_estimators: config.n_estimators,
                tree: TreeParams {
                    max_depth: config.max_depth,
                    max_features: MaxFeatures::Sqrt,
                    ..TreeParams::default()
                },
                bootstrap: true,
                seed: config.seed,
            };
            RandomForest::fit(train_set, n_classes, params).map(FittedModel::RandomForest)
        }
    }
}
