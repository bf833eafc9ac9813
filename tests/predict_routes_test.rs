// ABOUTME: Integration tests for the prediction route through the full middleware stack
// ABOUTME: Covers successful predictions, free-text normalization, error bodies and CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use routine_recommender::config::{CorsConfig, ServerConfig};
use routine_recommender::server::build_router;
use serde_json::{json, Value};

#[tokio::test]
async fn test_predict_with_dataset_labels() {
    let response = AxumTestRequest::post("/predict")
        .json(&common::valid_request())
        .send(common::create_test_router())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({ "rutina_recomendada": "Push-Pull-Legs" }));
}

#[tokio::test]
async fn test_predict_with_synonyms_and_free_text() {
    let cases = [
        ("ganar musculo", "Push-Pull-Legs"),
        ("strength", "Fuerza 5x5"),
        ("bajar de peso", "HIIT"),
        ("cardio", "Cardio y Resistencia"),
        ("  RESISTENCIA ", "Cardio y Resistencia"),
        ("Pérdida de peso", "HIIT"),
    ];

    for (goal, expected) in cases {
        let response = AxumTestRequest::post("/predict")
            .json(&json!({
                "objetivo": goal,
                "nivel": "novato",
                "dias": "3-4",
                "tiempo": "hora y media",
                "equipo": "gym",
                "edad": "30 años",
                "sexo": "mujer"
            }))
            .send(common::create_test_router())
            .await;

        assert_eq!(response.status(), 200, "goal {goal}");
        let body: Value = response.json();
        assert_eq!(body["rutina_recomendada"], expected, "goal {goal}");
    }
}

#[tokio::test]
async fn test_predict_accepts_every_web_form_value() {
    let goals = [
        ("Ganar_Musculo", "Push-Pull-Legs"),
        ("Perder_Grasa", "HIIT"),
        ("Mantenerse", "Cardio y Resistencia"),
    ];
    let equipment = ["Solo_Cuerpo", "Mancuernas", "Gym_Completo"];
    let levels = ["Principiante", "Intermedio", "Avanzado"];
    let days = ["2", "3", "4", "5", "6"];
    let minutes = ["30", "45", "60", "75", "90"];
    let router = common::create_test_router();

    for (index, (goal, expected)) in goals.iter().enumerate() {
        for (offset, equipo) in equipment.iter().enumerate() {
            let position = index * equipment.len() + offset;
            let request = json!({
                "objetivo": goal,
                "nivel": levels[position % levels.len()],
                "dias": days[position % days.len()],
                "tiempo": minutes[position % minutes.len()],
                "equipo": equipo,
                "edad": "25",
                "sexo": if position % 2 == 0 { "Masculino" } else { "Femenino" }
            });

            let response = AxumTestRequest::post("/predict")
                .json(&request)
                .send(router.clone())
                .await;

            assert_eq!(response.status(), 200, "{goal}/{equipo}");
            let body: Value = response.json();
            assert_eq!(body["rutina_recomendada"], *expected, "{goal}/{equipo}");
        }
    }
}

#[tokio::test]
async fn test_predict_without_content_type() {
    let response = AxumTestRequest::post("/predict")
        .raw_body(&common::valid_request().to_string())
        .send(common::create_test_router())
        .await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_missing_fields_are_listed() {
    let mut request = common::valid_request();
    request.as_object_mut().unwrap().remove("edad");
    request["sexo"] = Value::Null;

    let response = AxumTestRequest::post("/predict")
        .json(&request)
        .send(common::create_test_router())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert_eq!(body["error"]["details"]["missing"], json!(["edad", "sexo"]));
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("objetivo, nivel, dias, tiempo, equipo, edad, sexo"));
}

#[tokio::test]
async fn test_malformed_and_empty_bodies() {
    for raw in ["{\"objetivo\": ", "", "not json"] {
        let response = AxumTestRequest::post("/predict")
            .header("content-type", "application/json")
            .raw_body(raw)
            .send(common::create_test_router())
            .await;

        assert_eq!(response.status(), 400, "body {raw:?}");
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "INVALID_FORMAT");
    }
}

#[tokio::test]
async fn test_unknown_category_lists_expected_values() {
    let mut request = common::valid_request();
    request["objetivo"] = json!("Yoga");

    let response = AxumTestRequest::post("/predict")
        .json(&request)
        .send(common::create_test_router())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(
        body["error"]["message"],
        "Unrecognized value for 'objetivo': 'Yoga'"
    );
    assert_eq!(
        body["error"]["details"]["expected"],
        json!(["Fuerza", "Hipertrofia", "Perdida de peso", "Resistencia"])
    );
}

#[tokio::test]
async fn test_out_of_range_and_unparsable_numbers() {
    let mut request = common::valid_request();
    request["dias"] = json!(9);
    let response = AxumTestRequest::post("/predict")
        .json(&request)
        .send(common::create_test_router())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALUE_OUT_OF_RANGE");
    assert_eq!(body["error"]["details"]["max"], 7);

    let mut request = common::valid_request();
    request["tiempo"] = json!("bastante");
    let response = AxumTestRequest::post("/predict")
        .json(&request)
        .send(common::create_test_router())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
    assert_eq!(body["error"]["details"]["field"], "tiempo");
}

#[tokio::test]
async fn test_error_body_carries_request_id() {
    let response = AxumTestRequest::post("/predict")
        .header("x-request-id", "req-predict-42")
        .json(&json!({}))
        .send(common::create_test_router())
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.header("x-request-id").as_deref(), Some("req-predict-42"));
    let body: Value = response.json();
    assert_eq!(body["error"]["request_id"], "req-predict-42");
}

#[tokio::test]
async fn test_cors_preflight_on_predict() {
    let response = AxumTestRequest::options("/predict")
        .header("origin", "https://coach.example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send(common::create_test_router())
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
    let methods = response.header("access-control-allow-methods").unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn test_cors_preflight_with_origin_list() {
    let config = ServerConfig {
        cors: CorsConfig {
            allowed_origins: "https://app.example.com, https://coach.example.com".to_owned(),
        },
        ..ServerConfig::default()
    };
    let router = build_router(common::create_test_service(&common::tree_config()), &config);

    let preflight = |origin: &'static str| {
        AxumTestRequest::options("/predict")
            .header("origin", origin)
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
    };

    let listed = preflight("https://coach.example.com").send(router.clone()).await;
    assert_eq!(
        listed.header("access-control-allow-origin").as_deref(),
        Some("https://coach.example.com")
    );

    let unlisted = preflight("https://evil.example.com").send(router).await;
    assert_eq!(unlisted.header("access-control-allow-origin"), None);
}

#[tokio::test]
async fn test_get_predict_is_not_allowed() {
    let response = AxumTestRequest::get("/predict")
        .send(common::create_test_router())
        .await;

    assert_eq!(response.status(), 405);
}
