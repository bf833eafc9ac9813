// ABOUTME: Training engine for the routine recommender
// ABOUTME: CSV loading, label encoding, CART trees, random forests and the training pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Routine Intelligence
//!
//! Everything needed to turn the routine CSV into a fitted classifier:
//!
//! - **dataset**: CSV loading and dataset path resolution
//! - **encoding**: Label encoders for categorical columns and the routine label
//! - **split**: Rare-class filtering and stratified train/test split
//! - **tree** / **forest**: CART decision tree and bagged random forest
//! - **classifier**: The `Classifier` trait and model selection
//! - **metrics**: Accuracy
//! - **training**: The pipeline tying it together

/// CSV dataset loading
pub mod dataset;

/// Label encoders
pub mod encoding;

/// Training error type
pub mod errors;

/// Rare-class filtering and stratified splitting
pub mod split;

/// Evaluation metrics
pub mod metrics;

/// Classifier trait and model wrapper
pub mod classifier;

/// CART decision tree
pub mod tree;

/// Random forest ensemble
pub mod forest;

/// Training pipeline
pub mod training;

pub use classifier::{Classifier, FittedModel, MaxFeatures, ModelKind};
pub use encoding::{EncoderTable, LabelEncoder};
pub use errors::TrainingError;
pub use training::{train, train_from_path, TrainedRecommender, TrainingConfig, TrainingReport};
