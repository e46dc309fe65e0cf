// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::{Duration, Instant};

use auditrs::engines::pagespeed_client::{PageSpeedClient, PageSpeedConfig};
use auditrs::engines::resilient_client::{FetchError, ResilientAuditClient};
use auditrs::utils::retry_policy::RetryPolicy;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{lighthouse_payload, PAGESPEED_PATH};

fn client_for(server: &MockServer, policy: RetryPolicy) -> ResilientAuditClient {
    let transport = PageSpeedClient::new(PageSpeedConfig {
        endpoint: format!("{}{}", server.uri(), PAGESPEED_PATH),
        timeout: Duration::from_secs(5),
        ..PageSpeedConfig::default()
    })
    .expect("client");
    ResilientAuditClient::new(Arc::new(transport), policy)
}

#[tokio::test]
async fn test_rate_limited_twice_then_success_backs_off() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PAGESPEED_PATH))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PAGESPEED_PATH))
        .and(query_param("url", "https://example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lighthouse_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::standard());
    let start = Instant::now();
    let payload = client.fetch_audit("https://example.com").await.unwrap();

    // 1s + 2s backoff
    assert!(start.elapsed() >= Duration::from_millis(3000));
    assert!(payload.0.get("lighthouseResult").is_some());
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PAGESPEED_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": { "code": 404, "message": "Not Found" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::standard());
    let err = client.fetch_audit("https://example.com").await.unwrap_err();

    match err {
        FetchError::Status(response) => {
            assert_eq!(response.status, 404);
            assert_eq!(response.error_message().as_deref(), Some("Not Found"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_exhausts_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PAGESPEED_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let policy = RetryPolicy {
        initial_backoff: Duration::from_millis(10),
        ..RetryPolicy::standard()
    };
    let client = client_for(&server, policy);
    let err = client.fetch_audit("https://example.com").await.unwrap_err();

    assert!(matches!(err, FetchError::Status(ref r) if r.status == 500));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PAGESPEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, RetryPolicy::standard());
    let err = client.fetch_audit("https://example.com").await.unwrap_err();

    assert!(matches!(err, FetchError::MalformedPayload(_)));
}
