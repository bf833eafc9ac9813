// ABOUTME: Core types and constants for the workout routine recommender
// ABOUTME: Foundation crate with error handling, shared models, text folding and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Routine Core
//!
//! Foundation crate providing shared types for the routine recommender. The
//! training engine and the HTTP service both depend on it, so it is kept
//! small and free of heavy dependencies.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `ErrorResponse`
//! - **constants**: Dataset column names, request field names and validation bounds
//! - **models**: Training records, user attributes and the feature schema
//! - **text**: Case, accent and whitespace folding shared by encoders and normalization

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (training records, user attributes, feature schema)
pub mod models;

/// Text folding used for tolerant categorical matching
pub mod text;
