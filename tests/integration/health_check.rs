// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use auditrs::application::pipeline_factory::build_pipeline;
use auditrs::config::settings::Settings;
use auditrs::presentation::routes;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use tower::util::ServiceExt;

fn app() -> axum::Router {
    let settings = Settings::defaults().unwrap();
    routes::routes(Arc::new(build_pipeline(&settings).unwrap()))
}

/// 健康检查测试
///
/// 验证健康检查端点是否正常工作
#[tokio::test]
async fn health_check_works() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// 元数据地址测试
///
/// 默认配置下云元数据地址在任何网络调用之前被拒绝
#[tokio::test]
async fn audit_endpoint_rejects_metadata_address() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/v1/audit")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"url": "http://169.254.169.254/latest/meta-data"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// 缺少字段测试
#[tokio::test]
async fn audit_endpoint_rejects_missing_url() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/v1/audit")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"leadId": "lead-1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
