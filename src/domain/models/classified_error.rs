// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 面向用户的错误码
///
/// 固定且封闭的错误分类，调用方可直接按错误码分支处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// 所有候选地址都无法建立连接
    ConnectionFailed,
    /// 域名无法解析
    DnsFailure,
    /// 站点可访问但拒绝了自动化请求
    DocumentRequestFailed,
    /// TLS/SSL 握手失败
    ProtocolError,
    /// 超时
    Timeout,
    /// 审计接口限流
    RateLimited,
    /// 未分类错误
    Unknown,
}

impl ErrorCode {
    /// 全部错误码
    pub const ALL: [ErrorCode; 7] = [
        ErrorCode::ConnectionFailed,
        ErrorCode::DnsFailure,
        ErrorCode::DocumentRequestFailed,
        ErrorCode::ProtocolError,
        ErrorCode::Timeout,
        ErrorCode::RateLimited,
        ErrorCode::Unknown,
    ];

    /// 错误码的字符串形式
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConnectionFailed => "CONNECTION_FAILED",
            ErrorCode::DnsFailure => "DNS_FAILURE",
            ErrorCode::DocumentRequestFailed => "DOCUMENT_REQUEST_FAILED",
            ErrorCode::ProtocolError => "PROTOCOL_ERROR",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::Unknown => "UNKNOWN",
        }
    }

    /// 面向用户的错误描述
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ConnectionFailed => {
                "We couldn't connect to this website. It refused or dropped every connection we tried."
            }
            ErrorCode::DnsFailure => "This domain name could not be found.",
            ErrorCode::DocumentRequestFailed => {
                "The website loaded, but it blocked our automated analysis request."
            }
            ErrorCode::ProtocolError => {
                "We couldn't establish a secure connection to this website."
            }
            ErrorCode::Timeout => "The website took too long to respond.",
            ErrorCode::RateLimited => {
                "The analysis service is receiving too many requests right now."
            }
            ErrorCode::Unknown => "Something went wrong while analyzing this website.",
        }
    }

    /// 面向用户的处理建议
    pub fn suggestion(&self) -> &'static str {
        match self {
            ErrorCode::ConnectionFailed => {
                "Verify that the server is up and is not blocking traffic with a firewall."
            }
            ErrorCode::DnsFailure => {
                "Check the spelling of the address and make sure the domain is registered."
            }
            ErrorCode::DocumentRequestFailed => {
                "The page may require a login or block automated tools. Try a public page."
            }
            ErrorCode::ProtocolError => {
                "The SSL certificate may be invalid or expired. Check it with your hosting provider."
            }
            ErrorCode::Timeout => {
                "The site may be slow or overloaded. Please try again in a few minutes."
            }
            ErrorCode::RateLimited => "Please wait a minute before running another analysis.",
            ErrorCode::Unknown => {
                "Please try again. If the problem persists, contact support."
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分类后的错误
///
/// 每个失败请求对应一个，只包含稳定的错误码和面向用户的文案，
/// 不包含原始异常信息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedError {
    /// 错误描述
    #[serde(rename = "error")]
    pub message: String,
    /// 错误码
    #[serde(rename = "errorCode")]
    pub code: ErrorCode,
    /// 处理建议
    pub suggestion: String,
    /// 失败时正在检查的地址
    #[serde(rename = "checkedUrl", skip_serializing_if = "Option::is_none")]
    pub checked_url: Option<String>,
}

impl ClassifiedError {
    /// 根据错误码创建
    pub fn new(code: ErrorCode, checked_url: Option<String>) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            suggestion: code.suggestion().to_string(),
            checked_url,
        }
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ClassifiedError {}
