// ABOUTME: Label encoders mapping categorical values to integer codes and back
// ABOUTME: One encoder per categorical column plus one for the routine label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Categorical encoding.
//!
//! Classes are sorted and numbered from zero, so the code assigned to a value
//! depends only on the set of values seen in training, never on row order.

use crate::errors::TrainingError;
use routine_core::models::{FeatureColumn, FeatureVector, TrainingRecord, UserAttributes, FEATURE_COUNT};
use routine_core::text::fold;
use serde::Serialize;
use std::collections::BTreeSet;

/// Maps the distinct values of one column to `0..n`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
    folded: Vec<String>,
}

impl LabelEncoder {
    /// Learn the sorted set of distinct values
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<String> = values
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect();
        let folded = classes.iter().map(|class| fold(class)).collect();
        Self { classes, folded }
    }

    /// Code of `value`; exact match first, then folded match
    #[must_use]
    pub fn transform(&self, value: &str) -> Option<usize> {
        if let Ok(index) = self.classes.binary_search_by(|class| class.as_str().cmp(value)) {
            return Some(index);
        }
        let key = fold(value);
        self.folded.iter().position(|candidate| *candidate == key)
    }

    /// Value assigned to `index`
    #[must_use]
    pub fn inverse_transform(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    /// Known classes in code order
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of classes
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class was learned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Encoders for every categorical feature and the label
#[derive(Debug, Clone, Serialize)]
pub struct EncoderTable {
    goal: LabelEncoder,
    level: LabelEncoder,
    equipment: LabelEncoder,
    sex: LabelEncoder,
    routine: LabelEncoder,
}

impl EncoderTable {
    /// Fit all encoders from the training records
    #[must_use]
    pub fn fit(records: &[TrainingRecord]) -> Self {
        Self {
            goal: LabelEncoder::fit(records.iter().map(|r| r.goal.as_str())),
            level: LabelEncoder::fit(records.iter().map(|r| r.level.as_str())),
            equipment: LabelEncoder::fit(records.iter().map(|r| r.equipment.as_str())),
            sex: LabelEncoder::fit(records.iter().map(|r| r.sex.as_str())),
            routine: LabelEncoder::fit(records.iter().map(|r| r.routine.as_str())),
        }
    }

    /// Encoder of a categorical column, `None` for numeric columns
    #[must_use]
    pub const fn column(&self, column: FeatureColumn) -> Option<&LabelEncoder> {
        match column {
            FeatureColumn::Goal => Some(&self.goal),
            FeatureColumn::Level => Some(&self.level),
            FeatureColumn::Equipment => Some(&self.equipment),
            FeatureColumn::Sex => Some(&self.sex),
            FeatureColumn::Days | FeatureColumn::Duration | FeatureColumn::Age => None,
        }
    }

    /// Encoder of the routine label
    #[must_use]
    pub const fn label(&self) -> &LabelEncoder {
        &self.routine
    }

    /// Encode user attributes into a feature vector
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::UnknownCategory`] for the first categorical
    /// value (in feature order) that was not seen during training.
    pub fn encode_attributes(&self, attributes: &UserAttributes) -> Result<FeatureVector, TrainingError> {
        let mut features = [0.0; FEATURE_COUNT];

        for column in FeatureColumn::ALL {
            features[column.index()] = match (self.column(column), attributes.categorical(column)) {
                (Some(encoder), Some(value)) => {
                    let code = encoder.transform(value).ok_or_else(|| TrainingError::UnknownCategory {
                        column,
                        value: value.to_owned(),
                        expected: encoder.classes().to_vec(),
                    })?;
                    code as f64
                }
                _ => attributes.numeric(column).unwrap_or_default(),
            };
        }

        Ok(features)
    }

    /// Encode a training record into its feature vector and label code
    ///
    /// # Errors
    ///
    /// Fails only if the record was not part of the data the table was fit on.
    pub fn encode_record(&self, record: &TrainingRecord) -> Result<(FeatureVector, usize), TrainingError> {
        let features = self.encode_attributes(&record.attributes())?;
        let label = self
            .routine
            .transform(&record.routine)
            .ok_or_else(|| TrainingError::InsufficientData(format!(
                "routine '{}' missing from label encoder",
                record.routine
            )))?;
        Ok((features, label))
    }

    /// Routine name for a predicted class index
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::UnknownLabel`] if the index is out of range.
    pub fn decode_label(&self, index: usize) -> Result<&str, TrainingError> {
        self.routine
            .inverse_transform(index)
            .ok_or(TrainingError::UnknownLabel(index))
    }
}
