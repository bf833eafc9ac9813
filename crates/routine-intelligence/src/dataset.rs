// ABOUTME: Training dataset loading from headered CSV files
// ABOUTME: Validates the column schema and resolves the dataset path next to the executable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! CSV dataset loading.

use crate::errors::TrainingError;
use csv::{ReaderBuilder, StringRecord, Trim};
use routine_core::constants::columns;
use routine_core::models::{FeatureColumn, TrainingRecord};
use std::env;
use std::fs::File;
use std::io::Read;
use std::iter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolve the dataset location.
///
/// The configured path wins when it exists. A relative path that does not
/// exist from the working directory is retried next to the running
/// executable. Otherwise the path is returned unchanged so the loader can
/// report it.
#[must_use]
pub fn resolve_dataset_path(path: &Path) -> PathBuf {
    if path.exists() || path.is_absolute() {
        return path.to_path_buf();
    }

    let beside_exe = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(path)));

    match beside_exe {
        Some(candidate) if candidate.exists() => {
            debug!(path = %candidate.display(), "Dataset resolved next to executable");
            candidate
        }
        _ => path.to_path_buf(),
    }
}

/// Load every record of the CSV at `path`
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the header lacks a required
/// column, a cell fails to parse, or the file has no data rows.
pub fn load_records(path: &Path) -> Result<Vec<TrainingRecord>, TrainingError> {
    let file = File::open(path).map_err(|source| TrainingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_records(file)?;

    info!(
        dataset = %path.display(),
        total_records = records.len(),
        "Training data loaded"
    );
    Ok(records)
}

/// Parse records from any CSV reader
///
/// # Errors
///
/// Same as [`load_records`], minus the file-opening failure.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<TrainingRecord>, TrainingError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    check_headers(&headers)?;

    let records = csv_reader
        .deserialize::<TrainingRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    if records.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }
    Ok(records)
}

fn check_headers(headers: &StringRecord) -> Result<(), TrainingError> {
    let required = FeatureColumn::ALL
        .iter()
        .map(|column| column.column_name())
        .chain(iter::once(columns::ROUTINE));

    for name in required {
        if !headers.iter().any(|header| header == name) {
            return Err(TrainingError::MissingColumn(name));
        }
    }
    Ok(())
}
