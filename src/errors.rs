// ABOUTME: Error types for the HTTP service
// ABOUTME: Re-exports the unified AppError from routine-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use routine_core::errors::{
    AppError, AppResult, ErrorCode, ErrorContext, ErrorResponse, ErrorResponseDetails,
};
pub use routine_intelligence::TrainingError;
