// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Trains a recommender on the fixture CSV and builds the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::expect_used
)]
//! Shared test utilities for `routine_recommender`

use axum::Router;
use routine_intelligence::{train_from_path, ModelKind, TrainingConfig};
use routine_recommender::config::ServerConfig;
use routine_recommender::server::build_router;
use routine_recommender::services::RecommendationService;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fixture CSV: six rows per goal, each goal mapped to one routine, plus one `Strongman` row
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("rutinas_test.csv")
}

/// Deterministic single tree trained on every fixture row
pub fn tree_config() -> TrainingConfig {
    TrainingConfig {
        model: ModelKind::DecisionTree,
        test_size: 0.0,
        ..TrainingConfig::default()
    }
}

/// Small forest with a held-out set
pub fn forest_config() -> TrainingConfig {
    TrainingConfig {
        model: ModelKind::RandomForest,
        n_estimators: 25,
        ..TrainingConfig::default()
    }
}

/// Service trained on the fixture with `config`
pub fn create_test_service(config: &TrainingConfig) -> Arc<RecommendationService> {
    init_test_logging();
    let recommender = train_from_path(&fixture_path(), config).expect("fixture trains");
    Arc::new(RecommendationService::new(recommender, "rutinas_test.csv"))
}

/// Full router (middleware included) over a decision tree service
pub fn create_test_router() -> Router {
    build_router(create_test_service(&tree_config()), &ServerConfig::default())
}

/// Well-formed request using dataset labels
pub fn valid_request() -> Value {
    json!({
        "objetivo": "Hipertrofia",
        "nivel": "Intermedio",
        "dias": 4,
        "tiempo": 60,
        "equipo": "Gimnasio",
        "edad": 28,
        "sexo": "Masculino"
    })
}
