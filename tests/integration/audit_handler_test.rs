// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use auditrs::application::pipeline_factory::build_pipeline;
use auditrs::config::settings::Settings;
use auditrs::presentation::routes::routes;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{
    closed_port_url, lighthouse_payload, start_target_site, test_settings, PAGESPEED_PATH,
};

fn test_server(settings: &Settings) -> TestServer {
    let pipeline = build_pipeline(settings).expect("pipeline");
    TestServer::new(routes(Arc::new(pipeline))).expect("test server")
}

#[tokio::test]
async fn test_health_and_version() {
    let audit_api = MockServer::start().await;
    let server = test_server(&test_settings(&audit_api));

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");

    let response = server.get("/v1/version").await;
    response.assert_status_ok();
    response.assert_text(env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_audit_success_returns_result() {
    let site = start_target_site().await;
    let audit_api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAGESPEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(lighthouse_payload()))
        .mount(&audit_api)
        .await;

    let server = test_server(&test_settings(&audit_api));
    let response = server
        .post("/v1/audit")
        .json(&json!({ "url": site.uri(), "leadId": "lead-42" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["seo_score"], 90);
    assert_eq!(body["ai_visibility_score"], 82);
    assert_eq!(body["analyzed_url"], site.uri());
    assert_eq!(body["is_deep_page"], false);
    assert!(body["analysis_timestamp"].is_string());
    assert!(body["opportunities"].is_array());
}

#[tokio::test]
async fn test_blocked_host_is_bad_request() {
    let audit_api = MockServer::start().await;
    let mut settings = test_settings(&audit_api);
    settings.sanitizer.allow_private_hosts = false;
    let server = test_server(&settings);

    let response = server
        .post("/v1/audit")
        .json(&json!({ "url": "http://localhost:8080/admin" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
    assert!(audit_api.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_url_is_bad_request() {
    let audit_api = MockServer::start().await;
    let server = test_server(&test_settings(&audit_api));

    let response = server.post("/v1/audit").json(&json!({ "url": "" })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unreachable_site_returns_classified_error() {
    let audit_api = MockServer::start().await;
    let server = test_server(&test_settings(&audit_api));
    let target = closed_port_url().await;

    let response = server.post("/v1/audit").json(&json!({ "url": target })).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["errorCode"], "CONNECTION_FAILED");
    assert_eq!(body["checkedUrl"], target);
    assert!(body["error"].is_string());
    assert!(body["suggestion"].is_string());
}

#[tokio::test]
async fn test_rate_limited_audit_api_returns_429() {
    let site = start_target_site().await;
    let audit_api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAGESPEED_PATH))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&audit_api)
        .await;

    let server = test_server(&test_settings(&audit_api));
    let response = server.post("/v1/audit").json(&json!({ "url": site.uri() })).await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(body["errorCode"], "RATE_LIMITED");
}
