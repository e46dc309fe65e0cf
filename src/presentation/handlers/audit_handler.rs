// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::{
    application::dto::audit_request::AuditRequestDto,
    domain::services::audit_pipeline::AuditPipeline, presentation::errors::AppError,
};

/// 执行网站审计
///
/// 成功返回 `AuditResult`，失败返回带稳定错误码的 `ClassifiedError`
pub async fn create_audit(
    Extension(pipeline): Extension<Arc<AuditPipeline>>,
    Json(payload): Json<AuditRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    // 验证请求参数
    payload.validate()?;

    info!(
        "Audit requested for {} (lead: {})",
        payload.url,
        payload.lead_id.as_deref().unwrap_or("-")
    );

    let result = pipeline.run_audit(&payload.url).await?;
    Ok((StatusCode::OK, Json(result)))
}
