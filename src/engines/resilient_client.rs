// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::models::audit_result::RawAuditPayload;
use crate::engines::traits::{AuditTransport, TransportError, UpstreamResponse};
use crate::utils::retry_policy::RetryPolicy;

/// 审计请求错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// 从未收到响应
    #[error("Audit transport failed: {0}")]
    Transport(#[from] TransportError),
    /// 最后一次响应不是 2xx
    #[error("Audit API returned status {}", .0.status)]
    Status(UpstreamResponse),
    /// 2xx 响应无法解析为 JSON
    #[error("Audit API returned a malformed payload: {0}")]
    MalformedPayload(String),
}

/// 带重试的审计客户端
///
/// 只对 429 和 500 进行有界的指数退避重试，退避发生在下一次尝试之前
pub struct ResilientAuditClient {
    transport: Arc<dyn AuditTransport>,
    policy: RetryPolicy,
}

impl ResilientAuditClient {
    pub fn new(transport: Arc<dyn AuditTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// 获取审计报告
    ///
    /// # 参数
    ///
    /// * `url` - 探测成功的候选地址
    ///
    /// # 返回值
    ///
    /// * `Ok(RawAuditPayload)` - 上游原始报告
    /// * `Err(FetchError)` - 重试耗尽后的最后一次响应，或传输层错误
    ///
    /// 只有 429/500 响应会重试。传输层错误（超时、DNS、TLS、连接失败）不重试：
    /// 此前已收到过响应时返回该响应，否则返回传输层错误本身。
    /// `max_attempts` 至少按 1 计，最后一次尝试总会在循环内返回。
    pub async fn fetch_audit(&self, url: &str) -> Result<RawAuditPayload, FetchError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_response: Option<UpstreamResponse> = None;

        for attempt in 1..=max_attempts {
            if let Some(previous) = &last_response {
                let delay = self.policy.calculate_backoff(attempt - 1);
                warn!(
                    "Audit API returned {} for {}, retrying in {}ms (attempt {}/{})",
                    previous.status,
                    url,
                    delay.as_millis(),
                    attempt,
                    max_attempts
                );
                tokio::time::sleep(delay).await;
            }

            debug!(
                "Audit attempt {}/{} for {} via {}",
                attempt,
                max_attempts,
                url,
                self.transport.name()
            );

            let response = match self.transport.run_audit(url).await {
                Ok(response) => response,
                Err(e) => {
                    counter!("audit_upstream_attempts_total", "status" => "transport_error")
                        .increment(1);
                    warn!("Audit transport error for {}: {}", url, e);
                    return Err(match last_response {
                        Some(previous) => FetchError::Status(previous),
                        None => FetchError::Transport(e),
                    });
                }
            };

            counter!("audit_upstream_attempts_total", "status" => response.status.to_string())
                .increment(1);

            if response.is_success() {
                return serde_json::from_str(&response.body)
                    .map(RawAuditPayload)
                    .map_err(|e| FetchError::MalformedPayload(e.to_string()));
            }

            if !self.policy.is_retryable_status(response.status) {
                return Err(FetchError::Status(response));
            }
            if !self.policy.has_attempts_left(attempt) {
                warn!(
                    "Audit API still returning {} for {} after {} attempts",
                    response.status, url, attempt
                );
                return Err(FetchError::Status(response));
            }
            last_response = Some(response);
        }

        // max_attempts >= 1 且最后一次尝试必定返回，这里只为满足类型
        Err(match last_response {
            Some(response) => FetchError::Status(response),
            None => FetchError::Transport(TransportError::Other(
                "retry policy allowed no attempts".to_string(),
            )),
        })
    }
}
