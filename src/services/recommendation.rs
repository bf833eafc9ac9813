// ABOUTME: Recommendation service wrapping the recommender trained at startup
// ABOUTME: Normalizes request bodies, predicts a routine and reports model health
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::normalization::normalize_request;
use routine_core::models::UserAttributes;
use routine_intelligence::dataset::resolve_dataset_path;
use routine_intelligence::{train_from_path, TrainedRecommender, TrainingReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Accuracy placeholder when a metric could not be computed
const NOT_AVAILABLE: &str = "N/A";

/// Successful prediction body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Predicted routine label
    #[serde(rename = "rutina_recomendada")]
    pub routine: String,
}

/// Model summary returned by the health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `"ok"` once the service exists
    pub status: String,
    /// Classifier name, e.g. `RandomForestClassifier`
    pub model: String,
    /// File name of the training CSV
    pub dataset: String,
    /// Rows loaded before rare classes were dropped
    pub total_samples: usize,
    /// Held-out accuracy with two decimals, or `N/A`
    pub test_set_accuracy: String,
    /// Out-of-bag accuracy with two decimals, or `N/A`
    pub oob_accuracy: String,
}

/// Prediction service shared by the HTTP handlers
pub struct RecommendationService {
    recommender: TrainedRecommender,
    dataset_name: String,
}

impl RecommendationService {
    /// Wrap an already trained recommender
    #[must_use]
    pub fn new(recommender: TrainedRecommender, dataset_name: impl Into<String>) -> Self {
        Self {
            recommender,
            dataset_name: dataset_name.into(),
        }
    }

    /// Load the configured dataset and train the configured model
    ///
    /// # Errors
    ///
    /// Returns `DATASET_ERROR` when the CSV cannot be read and `MODEL_ERROR`
    /// when there is not enough data to fit a model
    pub fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let path = resolve_dataset_path(&config.dataset_path);
        info!(dataset = %path.display(), model = %config.training.model, "Training recommender");

        let recommender = train_from_path(&path, &config.training)?;
        Ok(Self::new(recommender, dataset_file_name(&path)))
    }

    /// Normalize a raw request body and predict its routine
    ///
    /// # Errors
    ///
    /// Returns the normalization error for malformed fields and
    /// `INVALID_INPUT` for categories the model was not trained on
    pub fn recommend(&self, body: &Value) -> AppResult<Recommendation> {
        let attributes = normalize_request(body)?;
        self.recommend_attributes(&attributes)
    }

    /// Predict the routine for already normalized attributes
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for unseen categories
    pub fn recommend_attributes(&self, attributes: &UserAttributes) -> AppResult<Recommendation> {
        let routine = self.recommender.predict(attributes)?;
        debug!(goal = %attributes.goal, level = %attributes.level, routine = %routine, "Routine predicted");
        Ok(Recommendation { routine })
    }

    /// Training summary for the health endpoint
    #[must_use]
    pub fn health(&self) -> HealthStatus {
        let report = self.recommender.report();
        HealthStatus {
            status: "ok".to_owned(),
            model: report.model.clone(),
            dataset: self.dataset_name.clone(),
            total_samples: report.total_samples,
            test_set_accuracy: format_accuracy(report.test_accuracy),
            oob_accuracy: format_accuracy(report.oob_accuracy),
        }
    }

    /// Full training report
    #[must_use]
    pub const fn report(&self) -> &TrainingReport {
        self.recommender.report()
    }

    /// Name of the dataset the model was trained on
    #[must_use]
    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }
}

fn dataset_file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn format_accuracy(accuracy: Option<f64>) -> String {
    accuracy.map_or_else(|| NOT_AVAILABLE.to_owned(), |value| format!("{value:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_accuracy() {
        assert_eq!(format_accuracy(Some(0.8666)), "0.87");
        assert_eq!(format_accuracy(Some(1.0)), "1.00");
        assert_eq!(format_accuracy(None), "N/A");
    }

    #[test]
    fn test_dataset_file_name() {
        assert_eq!(dataset_file_name(&PathBuf::from("data/pruebas.csv")), "pruebas.csv");
        assert_eq!(dataset_file_name(&PathBuf::from("pruebas.csv")), "pruebas.csv");
    }
}
