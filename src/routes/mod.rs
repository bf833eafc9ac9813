// ABOUTME: Route module organization for the routine recommender HTTP endpoints
// ABOUTME: Each module holds route definitions and thin handlers delegating to services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Handlers only extract the request and delegate to
//! [`RecommendationService`](crate::services::RecommendationService).

/// Model status route
pub mod health;
/// Routine prediction route
pub mod predict;

pub use health::HealthRoutes;
pub use predict::PredictRoutes;
