// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::classified_error::{ClassifiedError, ErrorCode};
use crate::engines::resilient_client::FetchError;
use crate::engines::traits::TransportError;

/// 失败原因
///
/// 流水线各阶段可能产生的底层失败
#[derive(Debug, Clone, PartialEq)]
pub enum FailureCause {
    /// 所有候选地址均不可达，携带探测器给出的分类
    Unreachable(ErrorCode),
    /// 传输层错误
    Transport(TransportError),
    /// 上游返回非 2xx，`message` 为上游的错误描述
    UpstreamStatus { status: u16, message: Option<String> },
    /// 上游返回了无法解析的报告
    MalformedPayload(String),
}

impl From<FetchError> for FailureCause {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(e) => FailureCause::Transport(e),
            FetchError::Status(response) => FailureCause::UpstreamStatus {
                status: response.status,
                message: response.error_message(),
            },
            FetchError::MalformedPayload(detail) => FailureCause::MalformedPayload(detail),
        }
    }
}

/// 将传输层错误映射为错误码
pub fn code_for_transport(err: &TransportError) -> ErrorCode {
    match err {
        TransportError::Timeout => ErrorCode::Timeout,
        TransportError::Dns(_) => ErrorCode::DnsFailure,
        TransportError::Tls(_) => ErrorCode::ProtocolError,
        TransportError::Connect(_) => ErrorCode::ConnectionFailed,
        TransportError::Other(_) => ErrorCode::Unknown,
    }
}

/// 根据上游错误信息中的 Lighthouse 运行时错误标识分类
fn code_for_upstream(status: u16, message: Option<&str>) -> ErrorCode {
    if status == 429 {
        return ErrorCode::RateLimited;
    }

    let message = match message {
        Some(message) => message.to_uppercase(),
        None => return ErrorCode::Unknown,
    };

    if message.contains("DNS_FAILURE") {
        ErrorCode::DnsFailure
    } else if message.contains("FAILED_DOCUMENT_REQUEST")
        || message.contains("ERRORED_DOCUMENT_REQUEST")
    {
        ErrorCode::DocumentRequestFailed
    } else if message.contains("INSECURE_DOCUMENT_REQUEST")
        || message.contains("SSL")
        || message.contains("CERT")
    {
        ErrorCode::ProtocolError
    } else if message.contains("PROTOCOL_TIMEOUT")
        || message.contains("NO_FCP")
        || message.contains("TIMED OUT")
    {
        ErrorCode::Timeout
    } else {
        ErrorCode::Unknown
    }
}

/// 分类失败原因
///
/// 纯映射，不会失败；无法识别的原因归入 `UNKNOWN`。
///
/// # 参数
///
/// * `cause` - 失败原因
/// * `checked_url` - 失败时正在检查的候选地址
pub fn classify(cause: &FailureCause, checked_url: Option<&str>) -> ClassifiedError {
    let code = match cause {
        FailureCause::Unreachable(code) => *code,
        FailureCause::Transport(err) => code_for_transport(err),
        FailureCause::UpstreamStatus { status, message } => {
            code_for_upstream(*status, message.as_deref())
        }
        FailureCause::MalformedPayload(_) => ErrorCode::Unknown,
    };

    ClassifiedError::new(code, checked_url.map(str::to_string))
}
