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

use async_trait::async_trait;
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

/// 传输层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// 超时
    #[error("Request timed out")]
    Timeout,
    /// DNS 解析失败
    #[error("DNS resolution failed: {0}")]
    Dns(String),
    /// TLS 握手失败
    #[error("TLS handshake failed: {0}")]
    Tls(String),
    /// 连接失败
    #[error("Connection failed: {0}")]
    Connect(String),
    /// 其他错误
    #[error("Request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // 去掉URL，避免主机名中的 "ssl"/"tls" 等字样干扰分类
        let err = err.without_url();
        let chain = error_chain(&err);
        let lower = chain.to_lowercase();

        if err.is_timeout() || lower.contains("timed out") {
            return TransportError::Timeout;
        }
        if lower.contains("dns error")
            || lower.contains("failed to lookup address")
            || lower.contains("name or service not known")
            || lower.contains("no such host")
        {
            return TransportError::Dns(chain);
        }
        if lower.contains("certificate")
            || lower.contains("tls")
            || lower.contains("ssl")
            || lower.contains("handshake")
        {
            return TransportError::Tls(chain);
        }
        if err.is_connect() {
            return TransportError::Connect(chain);
        }
        TransportError::Other(chain)
    }
}

/// 展开错误链，reqwest 只在 source 中携带底层原因
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// 上游响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    /// HTTP状态码
    pub status: u16,
    /// 响应内容
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 上游错误信息 (`{"error": {"message": ...}}`)
    pub fn error_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        value
            .pointer("/error/message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
    }
}

/// 可达性探测特质
#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// 对候选地址发起一次轻量探测，返回HTTP状态码
    async fn probe(&self, url: &str, timeout: Duration) -> Result<u16, TransportError>;

    /// 探测器名称
    fn name(&self) -> &'static str;
}

/// 审计接口传输特质
///
/// 每次调用只发起一次请求，重试由 `ResilientAuditClient` 负责。
#[async_trait]
pub trait AuditTransport: Send + Sync {
    /// 请求目标地址的审计报告
    async fn run_audit(&self, target_url: &str) -> Result<UpstreamResponse, TransportError>;

    /// 传输名称
    fn name(&self) -> &'static str;
}
