// ABOUTME: Integration tests for the health route
// ABOUTME: Checks the reported model name, dataset and formatted accuracies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use routine_recommender::config::ServerConfig;
use routine_recommender::server::build_router;
use routine_recommender::services::HealthStatus;

#[tokio::test]
async fn test_health_for_decision_tree_without_test_set() {
    let response = AxumTestRequest::get("/health")
        .send(common::create_test_router())
        .await;

    assert_eq!(response.status(), 200);
    let health: HealthStatus = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.model, "DecisionTreeClassifier");
    assert_eq!(health.dataset, "rutinas_test.csv");
    assert_eq!(health.total_samples, 25);
    assert_eq!(health.test_set_accuracy, "N/A");
    assert_eq!(health.oob_accuracy, "N/A");
}

#[tokio::test]
async fn test_health_for_random_forest_formats_accuracies() {
    let service = common::create_test_service(&common::forest_config());
    let response = AxumTestRequest::get("/health")
        .send(build_router(service, &ServerConfig::default()))
        .await;

    assert_eq!(response.status(), 200);
    let health: HealthStatus = response.json();
    assert_eq!(health.model, "RandomForestClassifier");

    for formatted in [&health.test_set_accuracy, &health.oob_accuracy] {
        assert_eq!(formatted.len(), 4, "two decimals expected, got {formatted}");
        let value: f64 = formatted.parse().unwrap();
        assert!((0.0..=1.0).contains(&value));
    }
}

#[tokio::test]
async fn test_health_echoes_request_id() {
    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "health-probe-1")
        .send(common::create_test_router())
        .await;

    assert_eq!(
        response.header("x-request-id").as_deref(),
        Some("health-probe-1")
    );
}
