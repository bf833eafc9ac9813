// ABOUTME: Offline trainer binary printing the training report as JSON
// ABOUTME: Runs the same pipeline as the server without opening a port
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Routine Trainer
//!
//! ```bash
//! routine-trainer --dataset data/pruebas.csv --model decision_tree
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use routine_intelligence::dataset::resolve_dataset_path;
use routine_intelligence::{train_from_path, ModelKind, TrainingConfig};
use routine_recommender::constants::{defaults, service_names};
use routine_recommender::logging::LoggingConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "routine-trainer")]
#[command(about = "Train the routine classifier and print its evaluation report")]
pub struct Args {
    /// Training CSV
    #[arg(long, default_value = defaults::DATASET_PATH)]
    dataset: PathBuf,

    /// Model to fit (`random_forest` or `decision_tree`)
    #[arg(long, default_value_t = ModelKind::RandomForest)]
    model: ModelKind,

    /// Trees in the forest
    #[arg(long)]
    n_estimators: Option<usize>,

    /// Seed for the split and the forest
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of rows held out for evaluation
    #[arg(long)]
    test_size: Option<f64>,

    /// Maximum tree depth
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the JSON report
    LoggingConfig::for_cli(service_names::ROUTINE_TRAINER).init()?;

    let baseline = TrainingConfig::default();
    let config = TrainingConfig {
        model: args.model,
        n_estimators: args.n_estimators.unwrap_or(baseline.n_estimators),
        seed: args.seed.unwrap_or(baseline.seed),
        test_size: args.test_size.unwrap_or(baseline.test_size),
        max_depth: args.max_depth,
        min_class_members: baseline.min_class_members,
    };

    let path = resolve_dataset_path(&args.dataset);
    let recommender = train_from_path(&path, &config)
        .with_context(|| format!("Training on {} failed", path.display()))?;

    println!("{}", serde_json::to_string_pretty(recommender.report())?);
    Ok(())
}
