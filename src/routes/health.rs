// ABOUTME: Health route reporting the loaded model and its training accuracy
// ABOUTME: Used by load balancers and by humans checking which model is served
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::routes;
use crate::services::{HealthStatus, RecommendationService};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// `GET /health`
    #[must_use]
    pub fn routes(service: Arc<RecommendationService>) -> Router {
        async fn health_handler(
            State(service): State<Arc<RecommendationService>>,
        ) -> Json<HealthStatus> {
            Json(service.health())
        }

        Router::new()
            .route(routes::HEALTH, get(health_handler))
            .with_state(service)
    }
}
