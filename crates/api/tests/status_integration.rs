//! Integration tests for the status log, root and health endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{create_test_app, get_request, json_request, parse_response_body, send};
use fleet_telemetry_api::middleware::REQUEST_ID_HEADER;
use serde_json::json;

#[tokio::test]
async fn test_root_message() {
    let (app, _store) = create_test_app();

    let response = send(&app, get_request("/api/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        parse_response_body(response).await,
        json!({"message": "Hello World"})
    );
}

#[tokio::test]
async fn test_status_checks_append() {
    let (app, _store) = create_test_app();

    let mut created = Vec::new();
    for _ in 0..2 {
        let response = send(
            &app,
            json_request(Method::POST, "/api/status", json!({"client_name": "dashboard"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_response_body(response).await;
        assert_eq!(body["client_name"], "dashboard");
        assert!(uuid::Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
        created.push(body);
    }
    assert_ne!(created[0]["id"], created[1]["id"]);

    let response = send(&app, get_request("/api/status")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = parse_response_body(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    for check in &created {
        assert!(listed.contains(check));
    }
}

#[tokio::test]
async fn test_status_check_requires_client_name() {
    let (app, store) = create_test_app();

    for body in [json!({}), json!({"client_name": ""})] {
        let response = send(&app, json_request(Method::POST, "/api/status", body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(store.operation_count(), 0);
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _store) = create_test_app();

    let response = send(&app, get_request("/api/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["backend"], "memory");
    assert_eq!(body["storage"]["connected"], true);

    let response = send(&app, get_request("/api/health/live")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "alive");

    let response = send(&app, get_request("/api/health/ready")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "ready");
}

#[tokio::test]
async fn test_request_id_header() {
    let (app, _store) = create_test_app();

    let response = send(&app, get_request("/api/")).await;
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let request = axum::http::Request::builder()
        .uri("/api/")
        .header(REQUEST_ID_HEADER, "dash-42")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "dash-42");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _store) = create_test_app();

    let response = send(&app, get_request("/api/unknown")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
