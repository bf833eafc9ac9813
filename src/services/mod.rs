// ABOUTME: Domain service layer sitting between route handlers and the training engine
// ABOUTME: Owns the trained recommender shared by every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they extract the request, hand it to a service
//! and map the result to a response.

/// Routine recommendation backed by the model trained at startup
pub mod recommendation;

pub use recommendation::{HealthStatus, Recommendation, RecommendationService};
