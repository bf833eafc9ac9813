// ABOUTME: Service-level constants and environment variable accessors
// ABOUTME: Defaults for the HTTP listener, dataset location and training parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Domain constants (column names, request fields, bounds) live in
//! `routine_core::constants` and are re-exported here. This module adds the
//! service defaults and the environment lookups the server reads at startup.

use std::env;

pub use routine_core::constants::{bounds, columns, request_fields, training};

/// Service names used in structured logs
pub mod service_names {
    /// The HTTP prediction service
    pub const ROUTINE_RECOMMENDER: &str = "routine-recommender";
    /// The standalone trainer
    pub const ROUTINE_TRAINER: &str = "routine-trainer";
}

/// Default values for server configuration
pub mod defaults {
    /// Listening port
    pub const HTTP_PORT: u16 = 5000;
    /// Bind address
    pub const HOST: &str = "0.0.0.0";
    /// Training CSV, relative to the working directory or the executable
    pub const DATASET_PATH: &str = "data/pruebas.csv";
    /// Allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
    /// Request body limit for `/predict`
    pub const MAX_BODY_BYTES: usize = 64 * 1024;
    /// Per-request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// HTTP routes
pub mod routes {
    /// Prediction endpoint
    pub const PREDICT: &str = "/predict";
    /// Health endpoint
    pub const HEALTH: &str = "/health";
}

/// Environment-based configuration lookups
pub mod env_config {
    use super::{defaults, env};

    /// HTTP port from `HTTP_PORT`, then `PORT`, then the default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .or_else(|| env::var("PORT").ok().and_then(|s| s.parse().ok()))
            .unwrap_or(defaults::HTTP_PORT)
    }

    /// Bind address from `HOST` or default
    #[must_use]
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| defaults::HOST.to_owned())
    }

    /// Dataset path from `DATASET_PATH` or default
    #[must_use]
    pub fn dataset_path() -> String {
        env::var("DATASET_PATH").unwrap_or_else(|_| defaults::DATASET_PATH.to_owned())
    }

    /// Allowed CORS origins from `CORS_ALLOWED_ORIGINS` or default
    #[must_use]
    pub fn cors_allowed_origins() -> String {
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| defaults::CORS_ALLOWED_ORIGINS.to_owned())
    }

    /// Deployment environment from `ENVIRONMENT` or `development`
    #[must_use]
    pub fn environment() -> String {
        env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_owned())
    }

    /// Log level from `RUST_LOG` or `info`
    #[must_use]
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned())
    }
}
