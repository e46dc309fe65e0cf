// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::audit_pipeline::AuditPipeline;
use crate::presentation::handlers::audit_handler;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `pipeline` - 审计流水线，所有请求共享
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(pipeline: Arc<AuditPipeline>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let audit_routes = Router::new()
        .route("/v1/audit", post(audit_handler::create_audit))
        .layer(Extension(pipeline));

    Router::new()
        .merge(public_routes)
        .merge(audit_routes)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
