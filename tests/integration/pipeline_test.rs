// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use auditrs::application::pipeline_factory::build_pipeline;
use auditrs::domain::models::classified_error::ErrorCode;
use auditrs::domain::services::audit_pipeline::AuditError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{
    closed_port_url, lighthouse_payload, start_target_site, test_settings, PAGESPEED_PATH,
};

#[tokio::test]
async fn test_deep_page_audits_reachable_homepage() {
    let site = start_target_site().await;
    let audit_api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PAGESPEED_PATH))
        .and(query_param("url", site.uri().as_str()))
        .and(query_param("strategy", "mobile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lighthouse_payload()))
        .expect(1)
        .mount(&audit_api)
        .await;

    let pipeline = build_pipeline(&test_settings(&audit_api)).unwrap();
    let deep_url = format!("{}/blog/2024/hello?ref=mail", site.uri());
    let result = pipeline.run_audit(&deep_url).await.unwrap();

    assert_eq!(result.analyzed_url, site.uri());
    assert_eq!(result.original_url, deep_url);
    assert!(result.is_deep_page);

    assert_eq!(result.performance_score, 64);
    assert_eq!(result.accessibility_score, 88);
    assert_eq!(result.best_practices_score, 96);
    assert_eq!(result.seo_score, 90);
    // 90*0.4 + 64*0.3 + 88*0.2 + 96*0.1 = 36 + 19.2 + 17.6 + 9.6 = 82.4
    assert_eq!(result.ai_visibility_score, 82);
    assert_eq!(result.technical_issues, 3);
    assert_eq!(result.opportunities.len(), 1);
    assert_eq!(result.opportunities[0].title, "Reduce unused JavaScript");
    assert_eq!(result.diagnostics.len(), 2);
}

#[tokio::test]
async fn test_unreachable_site_never_calls_audit_api() {
    let audit_api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lighthouse_payload()))
        .expect(0)
        .mount(&audit_api)
        .await;

    let pipeline = build_pipeline(&test_settings(&audit_api)).unwrap();
    let target = closed_port_url().await;
    let err = pipeline.run_audit(&target).await.unwrap_err();

    match err {
        AuditError::Failed(classified) => {
            assert_eq!(classified.code, ErrorCode::ConnectionFailed);
            assert_eq!(classified.checked_url.as_deref(), Some(target.as_str()));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_site_answering_server_errors_is_unreachable() {
    let site = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&site)
        .await;
    let audit_api = MockServer::start().await;

    let pipeline = build_pipeline(&test_settings(&audit_api)).unwrap();
    let err = pipeline.run_audit(&site.uri()).await.unwrap_err();

    assert!(matches!(err, AuditError::Failed(ref c) if c.code == ErrorCode::ConnectionFailed));
}

#[tokio::test]
async fn test_lighthouse_document_failure_is_classified() {
    let site = start_target_site().await;
    let audit_api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAGESPEED_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": {
                "code": 500,
                "message": "Lighthouse returned error: ERRORED_DOCUMENT_REQUEST. Lighthouse was unable to reliably load the page you requested. (Status code: 403)"
            }
        })))
        .expect(3)
        .mount(&audit_api)
        .await;

    let pipeline = build_pipeline(&test_settings(&audit_api)).unwrap();
    let err = pipeline.run_audit(&site.uri()).await.unwrap_err();

    match err {
        AuditError::Failed(classified) => {
            assert_eq!(classified.code, ErrorCode::DocumentRequestFailed);
            assert_eq!(classified.checked_url.as_deref(), Some(site.uri().as_str()));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_private_hosts_rejected_by_default() {
    let audit_api = MockServer::start().await;
    let mut settings = test_settings(&audit_api);
    settings.sanitizer.allow_private_hosts = false;

    let pipeline = build_pipeline(&settings).unwrap();
    let err = pipeline
        .run_audit("http://169.254.169.254/latest/meta-data")
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::Invalid(_)));
    assert!(audit_api.received_requests().await.unwrap().is_empty());
}
