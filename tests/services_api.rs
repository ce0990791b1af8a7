//! Integration tests for the service catalog endpoints.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, login, send_request, setup_test_app, TestApp};

async fn create_service(app: &TestApp, token: &str, name: &str, status: &str) -> i64 {
    let response = send_request(
        app,
        Method::POST,
        "/api/services",
        Some(token),
        Some(json!({ "name": name, "description": format!("{} service", name), "status": status })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn create_then_read_round_trip() {
    let app = setup_test_app().await;
    let token = login(&app, "admin", "password").await;

    let id = create_service(&app, &token, "api-gateway", "OPERATIONAL").await;

    let response =
        send_request(&app, Method::GET, &format!("/api/services/{}", id), None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "api-gateway");
    assert_eq!(body["status"], "OPERATIONAL");
    assert_eq!(body["description"], "api-gateway service");
    assert!(body["createdAt"].is_string());
    assert!(body["lastUpdated"].is_string());

    let response = send_request(&app, Method::GET, "/api/services", None, None).await;
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_service_is_404() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::GET, "/api/services/999", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_name_is_a_conflict() {
    let app = setup_test_app().await;
    let token = login(&app, "admin", "password").await;

    create_service(&app, &token, "billing", "OPERATIONAL").await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/services",
        Some(&token),
        Some(json!({ "name": "billing" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_payload_is_rejected() {
    let app = setup_test_app().await;
    let token = login(&app, "admin", "password").await;

    // Single-character name violates the 2..=100 constraint.
    let response = send_request(
        &app,
        Method::POST,
        "/api/services",
        Some(&token),
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_update_replaces_fields() {
    let app = setup_test_app().await;
    let token = login(&app, "admin", "password").await;
    let id = create_service(&app, &token, "notifications", "OPERATIONAL").await;

    let response = send_request(
        &app,
        Method::PUT,
        &format!("/api/services/{}", id),
        Some(&token),
        Some(json!({
            "name": "notifications-v2",
            "description": "push + email",
            "status": "MAINTENANCE",
            "maintenanceMessage": "migrating brokers"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "notifications-v2");
    assert_eq!(body["status"], "MAINTENANCE");
    assert_eq!(body["maintenanceMessage"], "migrating brokers");

    let response = send_request(
        &app,
        Method::PUT,
        "/api/services/999",
        Some(&token),
        Some(json!({ "name": "ghost" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_patch_updates_status_and_message() {
    let app = setup_test_app().await;
    let token = login(&app, "admin", "password").await;
    let id = create_service(&app, &token, "payments", "OPERATIONAL").await;

    let response = send_request(
        &app,
        Method::PATCH,
        &format!("/api/services/{}/status", id),
        Some(&token),
        Some(json!({ "status": "OUTAGE", "message": "provider down" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "OUTAGE");
    assert_eq!(body["maintenanceMessage"], "provider down");

    // Unknown status values are a 400, like the original dashboard API.
    let response = send_request(
        &app,
        Method::PATCH,
        &format!("/api/services/{}/status", id),
        Some(&token),
        Some(json!({ "status": "BROKEN" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_filter_alerts_and_health_summary() {
    let app = setup_test_app().await;
    let token = login(&app, "admin", "password").await;

    create_service(&app, &token, "a", "OPERATIONAL").await;
    create_service(&app, &token, "b", "DEGRADED").await;
    create_service(&app, &token, "c", "OUTAGE").await;

    let response =
        send_request(&app, Method::GET, "/api/services/status/DEGRADED", None, None).await;
    let degraded = body_json(response).await;
    assert_eq!(degraded.as_array().unwrap().len(), 1);
    assert_eq!(degraded[0]["name"], "b");

    let response = send_request(&app, Method::GET, "/api/services/status/BROKEN", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_request(&app, Method::GET, "/api/services/alerts", None, None).await;
    let alerts = body_json(response).await;
    assert_eq!(alerts.as_array().unwrap().len(), 2);

    let response =
        send_request(&app, Method::GET, "/api/services/health-summary", None, None).await;
    let summary = body_json(response).await;
    assert_eq!(summary["totalServices"], 3);
    assert_eq!(summary["allOperational"], false);
    assert_eq!(summary["alertCount"], 2);
    assert_eq!(summary["alerts"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn health_summary_is_green_when_everything_is_operational() {
    let app = setup_test_app().await;
    let token = login(&app, "admin", "password").await;
    create_service(&app, &token, "a", "OPERATIONAL").await;

    let response =
        send_request(&app, Method::GET, "/api/services/health-summary", None, None).await;
    let summary = body_json(response).await;
    assert_eq!(summary["allOperational"], true);
    assert_eq!(summary["alertCount"], 0);
}

#[tokio::test]
async fn search_matches_case_insensitively() {
    let app = setup_test_app().await;
    let token = login(&app, "admin", "password").await;

    create_service(&app, &token, "Payment-API", "OPERATIONAL").await;
    create_service(&app, &token, "notifications", "OPERATIONAL").await;

    let response =
        send_request(&app, Method::GET, "/api/services/search?q=payment", None, None).await;
    let hits = body_json(response).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["name"], "Payment-API");

    let response =
        send_request(&app, Method::GET, "/api/services/search?q=zzz", None, None).await;
    let hits = body_json(response).await;
    assert!(hits.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delete_then_404() {
    let app = setup_test_app().await;
    let token = login(&app, "admin", "password").await;
    let id = create_service(&app, &token, "legacy", "OPERATIONAL").await;

    let response = send_request(
        &app,
        Method::DELETE,
        &format!("/api/services/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send_request(
        &app,
        Method::DELETE,
        &format!("/api/services/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
