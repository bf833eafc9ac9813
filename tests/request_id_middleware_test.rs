// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Integration tests for request ID middleware
//!
//! Tests the request ID middleware functionality including:
//! - UUID generation for each request
//! - Propagation of a client-supplied ID
//! - Request ID availability in handlers via extensions

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::{to_bytes, Body},
    http::{Request as HttpRequest, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use routine_recommender::middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
use std::error::Error;
use tower::ServiceExt;
use uuid::Uuid;

async fn test_handler(Extension(request_id): Extension<RequestId>) -> String {
    format!("Request ID: {request_id}")
}

fn app() -> Router {
    Router::new()
        .route("/", get(test_handler))
        .layer(middleware::from_fn(request_id_middleware))
}

#[tokio::test]
async fn test_request_id_middleware_generates_id() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder().uri("/").body(Body::empty())?;
    let response = app().oneshot(request).await?;

    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .ok_or("Request ID header not present")?;
    assert!(
        Uuid::parse_str(header.to_str()?).is_ok(),
        "Request ID is not a valid UUID"
    );

    Ok(())
}

#[tokio::test]
async fn test_request_id_available_in_handler() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder().uri("/").body(Body::empty())?;
    let response = app().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .ok_or("Request ID header not present")?
        .to_str()?
        .to_owned();

    let body = to_bytes(response.into_body(), usize::MAX).await?;
    let body = String::from_utf8(body.to_vec())?;
    assert_eq!(body, format!("Request ID: {header}"));

    Ok(())
}

#[tokio::test]
async fn test_incoming_request_id_is_kept() -> Result<(), Box<dyn Error>> {
    let request = HttpRequest::builder()
        .uri("/")
        .header(REQUEST_ID_HEADER, "client-trace-7")
        .body(Body::empty())?;
    let response = app().oneshot(request).await?;

    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "client-trace-7"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(&body[..], b"Request ID: client-trace-7");

    Ok(())
}

#[tokio::test]
async fn test_blank_or_oversized_ids_are_replaced() -> Result<(), Box<dyn Error>> {
    for incoming in ["   ".to_owned(), "x".repeat(200)] {
        let request = HttpRequest::builder()
            .uri("/")
            .header(REQUEST_ID_HEADER, incoming.as_str())
            .body(Body::empty())?;
        let response = app().oneshot(request).await?;

        let header = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str()?;
        assert!(Uuid::parse_str(header).is_ok());
    }

    Ok(())
}

#[tokio::test]
async fn test_each_request_gets_a_distinct_id() -> Result<(), Box<dyn Error>> {
    let mut seen = Vec::new();
    for _ in 0..3 {
        let request = HttpRequest::builder().uri("/").body(Body::empty())?;
        let response = app().oneshot(request).await?;
        let id = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str()?.to_owned();
        assert!(!seen.contains(&id));
        seen.push(id);
    }

    Ok(())
}
