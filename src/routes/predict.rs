// ABOUTME: Prediction route turning a JSON questionnaire into a recommended routine
// ABOUTME: Parses the body leniently and maps failures to structured error responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::routes;
use crate::errors::AppError;
use crate::middleware::RequestId;
use crate::services::RecommendationService;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Prediction routes
pub struct PredictRoutes;

impl PredictRoutes {
    /// `POST /predict`
    #[must_use]
    pub fn routes(service: Arc<RecommendationService>) -> Router {
        Router::new()
            .route(routes::PREDICT, post(Self::handle_predict))
            .with_state(service)
    }

    /// The body is read as raw bytes so that a missing or wrong
    /// `Content-Type` does not prevent parsing.
    async fn handle_predict(
        State(service): State<Arc<RecommendationService>>,
        request_id: Option<Extension<RequestId>>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let request_id = request_id.map(|Extension(id)| id.0);
        let tag = |error: AppError| match &request_id {
            Some(id) => error.with_request_id(id.clone()),
            None => error,
        };

        let payload = parse_body(&body).map_err(tag)?;
        let recommendation = service.recommend(&payload).map_err(tag)?;
        Ok(Json(recommendation).into_response())
    }
}

fn parse_body(body: &[u8]) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::invalid_format("Request body must be a JSON object"));
    }
    serde_json::from_slice(body).map_err(|e| {
        AppError::invalid_format("Request body is not valid JSON")
            .with_details(json!({ "line": e.line(), "column": e.column() }))
            .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(br#"{"edad": 30}"#).unwrap()["edad"], 30);
        assert_eq!(parse_body(b"  ").unwrap_err().code, ErrorCode::InvalidFormat);

        let error = parse_body(b"{\"edad\": ").unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidFormat);
        assert_eq!(error.context.details["line"], 1);
    }
}
