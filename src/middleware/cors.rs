// ABOUTME: CORS middleware configuration for the prediction endpoint
// ABOUTME: Allows browser clients to POST JSON from the configured origins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use http::{header::CONTENT_TYPE, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS for `/predict`
///
/// Origins come from `CORS_ALLOWED_ORIGINS`. An empty value or `*` allows
/// any origin; otherwise the comma-separated list is used as is.
///
/// ```bash
/// export CORS_ALLOWED_ORIGINS="https://app.example.com,https://coach.example.com"
/// ```
#[must_use]
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let allowed = config.cors.allowed_origins.trim();
    let allow_origin = if allowed.is_empty() || allowed == "*" {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::OPTIONS])
}
