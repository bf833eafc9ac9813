// ABOUTME: Error type for dataset loading, encoding and model training
// ABOUTME: Converts into the unified AppError so HTTP handlers can propagate with `?`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use routine_core::errors::{AppError, ErrorCode};
use routine_core::models::FeatureColumn;
use serde_json::json;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while preparing data, training or predicting
#[derive(Debug, Error)]
pub enum TrainingError {
    /// The dataset file could not be opened
    #[error("cannot read dataset '{}': {source}", path.display())]
    Io {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The CSV is malformed or a cell does not parse
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the CSV header
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// The dataset has a header but no rows
    #[error("dataset contains no rows")]
    EmptyDataset,

    /// Not enough rows or classes to fit a model
    #[error("insufficient training data: {0}")]
    InsufficientData(String),

    /// A categorical value was never seen during training
    #[error("unrecognized value for '{}': '{value}'", column.request_field())]
    UnknownCategory {
        /// Column that failed to encode
        column: FeatureColumn,
        /// Value as received
        value: String,
        /// Classes the encoder knows
        expected: Vec<String>,
    },

    /// The model produced a class index without a label
    #[error("predicted class index {0} has no label")]
    UnknownLabel(usize),

    /// Training parameters are inconsistent
    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),
}

impl From<TrainingError> for AppError {
    fn from(error: TrainingError) -> Self {
        match error {
            TrainingError::UnknownCategory {
                column,
                value,
                expected,
            } => {
                let field = column.request_field();
                Self::invalid_input(format!("Unrecognized value for '{field}': '{value}'"))
                    .with_resource_id(field)
                    .with_details(json!({
                        "field": field,
                        "value": value,
                        "expected": expected,
                    }))
            }
            TrainingError::UnknownLabel(_) => Self::model(error.to_string()).with_source(error),
            TrainingError::InvalidConfig(_) => {
                Self::new(ErrorCode::ConfigInvalid, error.to_string()).with_source(error)
            }
            TrainingError::Io { .. }
            | TrainingError::Csv(_)
            | TrainingError::MissingColumn(_)
            | TrainingError::EmptyDataset
            | TrainingError::InsufficientData(_) => {
                Self::dataset(error.to_string()).with_source(error)
            }
        }
    }
}
