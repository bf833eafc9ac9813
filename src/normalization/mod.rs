// ABOUTME: Request normalization turning an untyped JSON body into typed user attributes
// ABOUTME: Applies required-field checks, synonym mapping, tolerant numeric parsing and bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Input Normalization
//!
//! The prediction endpoint accepts loosely typed answers from a web form or a
//! chat client. This module converts them into [`UserAttributes`] whose
//! categorical values match the labels of the training CSV whenever a synonym
//! is known. Values without a synonym are passed through unchanged so that
//! the encoder can report them with the list of accepted values.
//!
//! | Field | Accepts |
//! |-------|---------|
//! | `objetivo`, `nivel`, `equipo`, `sexo` | strings (numbers are stringified), folded then mapped through synonyms |
//! | `dias` | numbers, `"4 dias"`, `"3-4"`, `"tres"` |
//! | `tiempo` | minutes, `"45 min"`, `"1h30"`, `"1:30"`, `"hora y media"`, `"45-60 min"` |
//! | `edad` | numbers, `"30 años"`, `"treinta y cinco"` |

/// Free-text numeric parsing
pub mod numeric;
/// Categorical synonym tables
pub mod synonyms;

use crate::constants::{bounds, request_fields};
use crate::errors::{AppError, AppResult};
use routine_core::models::{FeatureColumn, UserAttributes};
use routine_core::text::fold;
use serde_json::{json, Map, Value};

/// Normalize a raw prediction request body
///
/// # Errors
///
/// - `MISSING_REQUIRED_FIELD` when the body is not an object or a field is absent or null
/// - `INVALID_INPUT` for empty categorical values
/// - `INVALID_FORMAT` for values of the wrong JSON type or unparsable text
/// - `VALUE_OUT_OF_RANGE` for numbers outside the accepted bounds
pub fn normalize_request(body: &Value) -> AppResult<UserAttributes> {
    let empty = Map::new();
    let fields = body.as_object().unwrap_or(&empty);

    let missing: Vec<&str> = request_fields::REQUIRED
        .iter()
        .copied()
        .filter(|field| fields.get(*field).is_none_or(Value::is_null))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::missing_fields(&request_fields::REQUIRED, &missing));
    }

    let field = |column: FeatureColumn| field_value(fields, column);

    Ok(UserAttributes {
        goal: normalize_categorical(FeatureColumn::Goal, field(FeatureColumn::Goal))?,
        level: normalize_categorical(FeatureColumn::Level, field(FeatureColumn::Level))?,
        days: normalize_numeric(FeatureColumn::Days, field(FeatureColumn::Days))?,
        duration_minutes: normalize_numeric(FeatureColumn::Duration, field(FeatureColumn::Duration))?,
        equipment: normalize_categorical(FeatureColumn::Equipment, field(FeatureColumn::Equipment))?,
        age: normalize_numeric(FeatureColumn::Age, field(FeatureColumn::Age))?,
        sex: normalize_categorical(FeatureColumn::Sex, field(FeatureColumn::Sex))?,
    })
}

/// Canonical label for a categorical answer, or the trimmed input when no synonym applies
///
/// # Errors
///
/// Returns `INVALID_FORMAT` for booleans, arrays and objects and
/// `INVALID_INPUT` for blank strings.
pub fn normalize_categorical(column: FeatureColumn, value: &Value) -> AppResult<String> {
    let name = column.request_field();
    let raw = match value {
        Value::String(text) => text.trim().to_owned(),
        Value::Number(number) => number.to_string(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            return Err(wrong_type(name, value, "a string"));
        }
    };

    if raw.is_empty() {
        return Err(AppError::invalid_input(format!("Field '{name}' cannot be empty"))
            .with_resource_id(name)
            .with_details(json!({ "field": name })));
    }

    Ok(synonyms::canonical(column, &fold(&raw)).map_or(raw, str::to_owned))
}

/// Parse and bound-check a numeric answer
///
/// # Errors
///
/// Returns `INVALID_FORMAT` when no quantity can be read and
/// `VALUE_OUT_OF_RANGE` when the rounded value falls outside the bounds.
pub fn normalize_numeric(column: FeatureColumn, value: &Value) -> AppResult<u16> {
    let name = column.request_field();
    let (parser, min, max, hint): (fn(&str) -> Option<f64>, i64, i64, &str) = match column {
        FeatureColumn::Days => (
            numeric::parse_days,
            bounds::MIN_DAYS,
            bounds::MAX_DAYS,
            "days per week, e.g. 4, \"4 dias\", \"3-4\" or \"tres\"",
        ),
        FeatureColumn::Duration => (
            numeric::parse_minutes,
            bounds::MIN_DURATION_MINUTES,
            bounds::MAX_DURATION_MINUTES,
            "minutes per session, e.g. 60, \"45 min\", \"1h30\" or \"hora y media\"",
        ),
        FeatureColumn::Age => (
            numeric::parse_age,
            bounds::MIN_AGE,
            bounds::MAX_AGE,
            "age in years, e.g. 30 or \"30 años\"",
        ),
        FeatureColumn::Goal | FeatureColumn::Level | FeatureColumn::Equipment | FeatureColumn::Sex => {
            return Err(AppError::internal(format!("'{name}' is not a numeric field")));
        }
    };

    let parsed = match value {
        Value::Number(number) => number.as_f64().map(f64::round),
        Value::String(text) => parser(text),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            return Err(wrong_type(name, value, "a number or a string"));
        }
    };

    let Some(parsed) = parsed.filter(|number| number.is_finite()) else {
        return Err(AppError::invalid_format(format!(
            "Could not read a value for '{name}' from {value}"
        ))
        .with_resource_id(name)
        .with_details(json!({ "field": name, "value": value, "expected": hint })));
    };

    let whole = parsed.clamp(i64::MIN as f64, i64::MAX as f64) as i64;
    if !(min..=max).contains(&whole) {
        return Err(AppError::out_of_range(name, whole, min, max).with_resource_id(name));
    }

    u16::try_from(whole)
        .map_err(|_| AppError::out_of_range(name, whole, min, max).with_resource_id(name))
}

fn field_value(fields: &Map<String, Value>, column: FeatureColumn) -> &Value {
    fields.get(column.request_field()).unwrap_or(&Value::Null)
}

fn wrong_type(name: &str, value: &Value, expected: &str) -> AppError {
    AppError::invalid_format(format!("Field '{name}' must be {expected}"))
        .with_resource_id(name)
        .with_details(json!({ "field": name, "value": value }))
}
