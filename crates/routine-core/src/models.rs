// ABOUTME: Shared data models for the training dataset and normalized user input
// ABOUTME: Defines the fixed feature schema that both encoding directions follow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models shared between the trainer and the prediction endpoint.

use crate::constants::{columns, request_fields};
use serde::{Deserialize, Serialize};

/// Number of features the classifier consumes
pub const FEATURE_COUNT: usize = 7;

/// Encoded feature vector in [`FeatureColumn::ALL`] order
pub type FeatureVector = [f64; FEATURE_COUNT];

/// One row of the training CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Training goal
    #[serde(rename = "Objetivo")]
    pub goal: String,
    /// Experience level
    #[serde(rename = "Nivel")]
    pub level: String,
    /// Training days per week
    #[serde(rename = "Dias")]
    pub days: u16,
    /// Session length in minutes
    #[serde(rename = "Tiempo")]
    pub duration_minutes: u16,
    /// Available equipment
    #[serde(rename = "Equipo_Disponible")]
    pub equipment: String,
    /// Age in years
    #[serde(rename = "Edad")]
    pub age: u16,
    /// Sex
    #[serde(rename = "Sexo")]
    pub sex: String,
    /// Recommended routine (label)
    #[serde(rename = "Rutina")]
    pub routine: String,
}

impl TrainingRecord {
    /// Categorical view used by the encoders
    #[must_use]
    pub fn attributes(&self) -> UserAttributes {
        UserAttributes {
            goal: self.goal.clone(),
            level: self.level.clone(),
            days: self.days,
            duration_minutes: self.duration_minutes,
            equipment: self.equipment.clone(),
            age: self.age,
            sex: self.sex.clone(),
        }
    }
}

/// A user's attributes after request normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttributes {
    /// Canonical training goal
    pub goal: String,
    /// Canonical experience level
    pub level: String,
    /// Training days per week
    pub days: u16,
    /// Session length in minutes
    pub duration_minutes: u16,
    /// Canonical equipment label
    pub equipment: String,
    /// Age in years
    pub age: u16,
    /// Canonical sex label
    pub sex: String,
}

impl UserAttributes {
    /// Value of a categorical column, `None` for numeric ones
    #[must_use]
    pub fn categorical(&self, column: FeatureColumn) -> Option<&str> {
        match column {
            FeatureColumn::Goal => Some(&self.goal),
            FeatureColumn::Level => Some(&self.level),
            FeatureColumn::Equipment => Some(&self.equipment),
            FeatureColumn::Sex => Some(&self.sex),
            FeatureColumn::Days | FeatureColumn::Duration | FeatureColumn::Age => None,
        }
    }

    /// Value of a numeric column, `None` for categorical ones
    #[must_use]
    pub fn numeric(&self, column: FeatureColumn) -> Option<f64> {
        match column {
            FeatureColumn::Days => Some(f64::from(self.days)),
            FeatureColumn::Duration => Some(f64::from(self.duration_minutes)),
            FeatureColumn::Age => Some(f64::from(self.age)),
            FeatureColumn::Goal
            | FeatureColumn::Level
            | FeatureColumn::Equipment
            | FeatureColumn::Sex => None,
        }
    }
}

/// Feature columns in the order the classifier expects them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureColumn {
    /// `Objetivo`
    Goal,
    /// `Nivel`
    Level,
    /// `Dias`
    Days,
    /// `Tiempo`
    Duration,
    /// `Equipo_Disponible`
    Equipment,
    /// `Edad`
    Age,
    /// `Sexo`
    Sex,
}

impl FeatureColumn {
    /// All columns in feature-vector order
    pub const ALL: [Self; FEATURE_COUNT] = [
        Self::Goal,
        Self::Level,
        Self::Days,
        Self::Duration,
        Self::Equipment,
        Self::Age,
        Self::Sex,
    ];

    /// Categorical columns, in feature-vector order
    pub const CATEGORICAL: [Self; 4] = [Self::Goal, Self::Level, Self::Equipment, Self::Sex];

    /// CSV header of the column
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Goal => columns::GOAL,
            Self::Level => columns::LEVEL,
            Self::Days => columns::DAYS,
            Self::Duration => columns::DURATION,
            Self::Equipment => columns::EQUIPMENT,
            Self::Age => columns::AGE,
            Self::Sex => columns::SEX,
        }
    }

    /// JSON field carrying the column in a prediction request
    #[must_use]
    pub const fn request_field(self) -> &'static str {
        match self {
            Self::Goal => request_fields::GOAL,
            Self::Level => request_fields::LEVEL,
            Self::Days => request_fields::DAYS,
            Self::Duration => request_fields::DURATION,
            Self::Equipment => request_fields::EQUIPMENT,
            Self::Age => request_fields::AGE,
            Self::Sex => request_fields::SEX,
        }
    }

    /// Whether the column is label-encoded
    #[must_use]
    pub const fn is_categorical(self) -> bool {
        matches!(self, Self::Goal | Self::Level | Self::Equipment | Self::Sex)
    }

    /// Position in the feature vector
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}
