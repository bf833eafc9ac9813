// ABOUTME: Domain constants shared by the trainer and the prediction service
// ABOUTME: Dataset column names, request field names and validation bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Column names of the training CSV, field names of the prediction request,
//! and the bounds applied to numeric user input.

/// Column headers of the training CSV
pub mod columns {
    /// Training goal
    pub const GOAL: &str = "Objetivo";
    /// Experience level
    pub const LEVEL: &str = "Nivel";
    /// Training days per week
    pub const DAYS: &str = "Dias";
    /// Session length in minutes
    pub const DURATION: &str = "Tiempo";
    /// Available equipment
    pub const EQUIPMENT: &str = "Equipo_Disponible";
    /// Age in years
    pub const AGE: &str = "Edad";
    /// Sex
    pub const SEX: &str = "Sexo";
    /// Label column: recommended routine
    pub const ROUTINE: &str = "Rutina";
}

/// JSON field names accepted by the prediction endpoint
pub mod request_fields {
    /// Training goal
    pub const GOAL: &str = "objetivo";
    /// Experience level
    pub const LEVEL: &str = "nivel";
    /// Training days per week
    pub const DAYS: &str = "dias";
    /// Session length
    pub const DURATION: &str = "tiempo";
    /// Available equipment
    pub const EQUIPMENT: &str = "equipo";
    /// Age
    pub const AGE: &str = "edad";
    /// Sex
    pub const SEX: &str = "sexo";

    /// Every field a prediction request must carry, in documentation order
    pub const REQUIRED: [&str; 7] = [GOAL, LEVEL, DAYS, DURATION, EQUIPMENT, AGE, SEX];

    /// Response field holding the predicted routine
    pub const RECOMMENDED_ROUTINE: &str = "rutina_recomendada";
}

/// Accepted ranges for numeric user input (inclusive)
pub mod bounds {
    /// Minimum training days per week
    pub const MIN_DAYS: i64 = 1;
    /// Maximum training days per week
    pub const MAX_DAYS: i64 = 7;
    /// Minimum session length in minutes
    pub const MIN_DURATION_MINUTES: i64 = 10;
    /// Maximum session length in minutes
    pub const MAX_DURATION_MINUTES: i64 = 240;
    /// Minimum age in years
    pub const MIN_AGE: i64 = 12;
    /// Maximum age in years
    pub const MAX_AGE: i64 = 100;
}

/// Training defaults
pub mod training {
    /// Number of trees in the random forest
    pub const DEFAULT_N_ESTIMATORS: usize = 150;
    /// Seed used for the split and the forest
    pub const DEFAULT_RANDOM_SEED: u64 = 42;
    /// Fraction of rows held out for evaluation
    pub const DEFAULT_TEST_SIZE: f64 = 0.2;
    /// Classes with fewer rows than this are dropped before the stratified split
    pub const MIN_CLASS_MEMBERS: usize = 2;
}
