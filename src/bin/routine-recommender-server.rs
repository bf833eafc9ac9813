// ABOUTME: HTTP server binary for the routine recommender
// ABOUTME: Loads configuration, trains the model on startup and serves predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Routine Recommender Server
//!
//! Trains the configured classifier once, then serves `POST /predict` and
//! `GET /health` until Ctrl-C or SIGTERM.

use anyhow::Result;
use clap::Parser;
use routine_intelligence::ModelKind;
use routine_recommender::{
    config::ServerConfig, constants::routes, logging, server, services::RecommendationService,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "routine-recommender-server")]
#[command(about = "Workout routine recommender - trains at startup and serves predictions over HTTP")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the training CSV path
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Override the model (`random_forest` or `decision_tree`)
    #[arg(long)]
    model: Option<ModelKind>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let config = match ServerConfig::from_env()
        .and_then(|config| config.with_overrides(args.http_port, args.dataset, args.model))
    {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e:#}");
            return Err(e);
        }
    };
    info!("{}", config.summary());

    let service = match RecommendationService::from_config(&config) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            error!("Failed to train recommender: {e}");
            return Err(e.into());
        }
    };

    let report = service.report();
    info!(
        model = %report.model,
        dataset = %service.dataset_name(),
        samples = report.total_samples,
        "Recommender ready"
    );

    display_available_endpoints(&config);

    if let Err(e) = server::serve(service, &config).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}

/// Log the endpoint list
fn display_available_endpoints(config: &ServerConfig) {
    let address = config.bind_address();
    info!("=== Available API Endpoints ===");
    info!("   Predict Routine:   POST http://{address}{}", routes::PREDICT);
    info!("   Model Health:      GET  http://{address}{}", routes::HEALTH);
    info!("=== End of Endpoint List ===");
}
