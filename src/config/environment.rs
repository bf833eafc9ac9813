// ABOUTME: Environment configuration management for the prediction server
// ABOUTME: Parses listener, dataset, training and CORS settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::constants::{defaults, env_config, training};
use anyhow::{anyhow, Context, Result};
use routine_intelligence::{ModelKind, TrainingConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Cross-origin settings for the prediction endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorsConfig {
    /// `*` or a comma-separated list of origins
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: defaults::CORS_ALLOWED_ORIGINS.to_owned(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listening port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Training CSV location
    pub dataset_path: PathBuf,
    /// Model and split parameters
    pub training: TrainingConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            host: defaults::HOST.to_owned(),
            log_level: LogLevel::default(),
            environment: Environment::default(),
            dataset_path: PathBuf::from(defaults::DATASET_PATH),
            training: TrainingConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse, `MODEL_KIND` is
    /// unknown, or the resulting configuration fails [`ServerConfig::validate`].
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let model = match env::var("MODEL_KIND") {
            Ok(value) => value.parse::<ModelKind>().map_err(|e| anyhow!(e))?,
            Err(_) => ModelKind::default(),
        };

        let max_depth = match env::var("MAX_DEPTH") {
            Ok(value) if !value.trim().is_empty() => Some(
                value
                    .trim()
                    .parse()
                    .context("Invalid MAX_DEPTH value")?,
            ),
            _ => None,
        };

        let config = Self {
            http_port: env_config::http_port(),
            host: env_config::host(),
            log_level: LogLevel::from_str_or_default(&env_config::log_level()),
            environment: Environment::from_str_or_default(&env_config::environment()),
            dataset_path: PathBuf::from(env_config::dataset_path()),
            training: TrainingConfig {
                model,
                n_estimators: env_var_or("N_ESTIMATORS", &training::DEFAULT_N_ESTIMATORS.to_string())
                    .parse()
                    .context("Invalid N_ESTIMATORS value")?,
                seed: env_var_or("RANDOM_SEED", &training::DEFAULT_RANDOM_SEED.to_string())
                    .parse()
                    .context("Invalid RANDOM_SEED value")?,
                test_size: env_var_or("TEST_SIZE", &training::DEFAULT_TEST_SIZE.to_string())
                    .parse()
                    .context("Invalid TEST_SIZE value")?,
                max_depth,
                min_class_members: training::MIN_CLASS_MEMBERS,
            },
            cors: CorsConfig {
                allowed_origins: env_config::cors_allowed_origins(),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Apply command-line overrides on top of the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the overridden configuration is invalid.
    pub fn with_overrides(
        mut self,
        http_port: Option<u16>,
        dataset_path: Option<PathBuf>,
        model: Option<ModelKind>,
    ) -> Result<Self> {
        if let Some(port) = http_port {
            self.http_port = port;
        }
        if let Some(path) = dataset_path {
            self.dataset_path = path;
        }
        if let Some(model) = model {
            self.training.model = model;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.training.n_estimators == 0 {
            return Err(anyhow!("N_ESTIMATORS must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.training.test_size) {
            return Err(anyhow!(
                "TEST_SIZE must be in [0.0, 1.0), got {}",
                self.training.test_size
            ));
        }
        if self.training.max_depth == Some(0) {
            return Err(anyhow!("MAX_DEPTH must be at least 1 when set"));
        }
        if self.dataset_path.as_os_str().is_empty() {
            return Err(anyhow!("DATASET_PATH cannot be empty"));
        }
        if self.host.trim().is_empty() {
            return Err(anyhow!("HOST cannot be empty"));
        }
        Ok(())
    }

    /// Address the listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Routine Recommender Configuration:\n\
             - Bind Address: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Dataset: {}\n\
             - Model: {}\n\
             - Trees: {}\n\
             - Max Depth: {}\n\
             - Test Size: {}\n\
             - Random Seed: {}\n\
             - CORS Origins: {}",
            self.bind_address(),
            self.environment,
            self.log_level,
            self.dataset_path.display(),
            self.training.model,
            self.training.n_estimators,
            self.training
                .max_depth
                .map_or_else(|| "unlimited".to_owned(), |depth| depth.to_string()),
            self.training.test_size,
            self.training.seed,
            self.cors.allowed_origins,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
