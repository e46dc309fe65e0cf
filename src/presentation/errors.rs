// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domain::models::classified_error::ErrorCode;
use crate::domain::services::audit_pipeline::AuditError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

/// 错误码对应的HTTP状态码
pub fn status_for_code(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::Unknown => StatusCode::BAD_GATEWAY,
        ErrorCode::ConnectionFailed
        | ErrorCode::DnsFailure
        | ErrorCode::DocumentRequestFailed
        | ErrorCode::ProtocolError => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(audit_error) = self.0.downcast_ref::<AuditError>() {
            return match audit_error {
                AuditError::Invalid(e) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response(),
                AuditError::Failed(classified) => {
                    (status_for_code(classified.code), Json(classified.clone())).into_response()
                }
            };
        }

        if let Some(errors) = self.0.downcast_ref::<validator::ValidationErrors>() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Validation error: {}", errors) })),
            )
                .into_response();
        }

        // 未知错误只记录日志，不向调用方暴露原始信息
        error!("Unhandled application error: {:?}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
