// ABOUTME: Main library entry point for the workout routine recommender
// ABOUTME: Wires configuration, normalization, the recommendation service and the HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Routine Recommender
//!
//! Trains a tabular classifier (decision tree or random forest) on a CSV of
//! gym questionnaires at startup and serves routine recommendations over HTTP.
//!
//! ## Architecture
//!
//! - **`routine-core`**: error types, constants and the feature schema
//! - **`routine-intelligence`**: CSV loading, label encoding and the classifiers
//! - **Normalization**: turns loosely typed answers into encodable attributes
//! - **Services**: the trained recommender shared by every request
//! - **Routes**: `POST /predict` and `GET /health`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use routine_recommender::config::ServerConfig;
//! use routine_recommender::services::RecommendationService;
//! use serde_json::json;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let service = RecommendationService::from_config(&config)?;
//!
//!     let recommendation = service.recommend(&json!({
//!         "objetivo": "ganar musculo",
//!         "nivel": "principiante",
//!         "dias": "4 dias",
//!         "tiempo": "1 hora",
//!         "equipo": "gimnasio",
//!         "edad": 25,
//!         "sexo": "hombre"
//!     }))?;
//!     println!("{}", recommendation.routine);
//!     Ok(())
//! }
//! ```

/// Environment-driven server configuration
pub mod config;

/// Application constants and environment lookups
pub mod constants;

/// Error types shared with the core crates
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Request ID and CORS middleware
pub mod middleware;

/// Request normalization into typed user attributes
pub mod normalization;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Recommendation service
pub mod services;
