// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, histogram};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::models::audit_result::AuditResult;
use crate::domain::models::classified_error::{ClassifiedError, ErrorCode};
use crate::domain::services::error_classifier::{classify, FailureCause};
use crate::domain::services::homepage_resolver::resolve_homepage;
use crate::domain::services::reachability_prober::ReachabilityProber;
use crate::domain::services::result_normalizer::normalize;
use crate::domain::services::url_sanitizer::{UrlSanitizer, ValidationError};
use crate::engines::resilient_client::ResilientAuditClient;

/// 审计流水线错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// 调用方输入无效，不重试也不进入错误分类
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),
    /// 已分类的网络或上游错误
    #[error("Audit failed: {0}")]
    Failed(ClassifiedError),
}

/// 审计编排器
///
/// 线性状态机：清洗 → 主页解析 → 探测 → 获取报告 → 归一化。
/// 任一阶段失败立即终止，不返回部分结果；实例本身不持有跨请求的可变状态。
pub struct AuditPipeline {
    sanitizer: UrlSanitizer,
    prober: ReachabilityProber,
    client: ResilientAuditClient,
}

impl AuditPipeline {
    pub fn new(
        sanitizer: UrlSanitizer,
        prober: ReachabilityProber,
        client: ResilientAuditClient,
    ) -> Self {
        Self {
            sanitizer,
            prober,
            client,
        }
    }

    /// 执行一次完整审计
    ///
    /// # 参数
    ///
    /// * `raw_url` - 用户提交的原始地址
    ///
    /// # 返回值
    ///
    /// * `Ok(AuditResult)` - 归一化后的审计结果
    /// * `Err(AuditError)` - 输入无效或已分类的失败
    pub async fn run_audit(&self, raw_url: &str) -> Result<AuditResult, AuditError> {
        let start = Instant::now();
        counter!("audit_requests_total").increment(1);

        let result = self.execute(raw_url).await;

        histogram!("audit_duration_seconds").record(start.elapsed().as_secs_f64());
        match &result {
            Ok(audit) => info!(
                "Audit of {} completed in {}ms (analyzed {})",
                audit.original_url,
                start.elapsed().as_millis(),
                audit.analyzed_url
            ),
            Err(AuditError::Invalid(e)) => {
                counter!("audit_failures_total", "code" => "INVALID_INPUT").increment(1);
                warn!("Rejected audit input: {}", e);
            }
            Err(AuditError::Failed(e)) => {
                counter!("audit_failures_total", "code" => e.code.as_str()).increment(1);
                warn!(
                    "Audit failed with {} (checked {:?})",
                    e.code, e.checked_url
                );
            }
        }
        result
    }

    async fn execute(&self, raw_url: &str) -> Result<AuditResult, AuditError> {
        let safe_url = self.sanitizer.sanitize(raw_url)?;
        let request = resolve_homepage(&safe_url)?;

        let outcome = self.prober.probe(&request).await;
        let responded_url = match (outcome.reachable, outcome.responded_url) {
            (true, Some(url)) => url,
            _ => {
                let cause = FailureCause::Unreachable(
                    outcome.failure_class.unwrap_or(ErrorCode::ConnectionFailed),
                );
                return Err(AuditError::Failed(classify(
                    &cause,
                    Some(&request.target_url),
                )));
            }
        };

        let payload = self
            .client
            .fetch_audit(&responded_url)
            .await
            .map_err(|e| {
                let cause = FailureCause::from(e);
                AuditError::Failed(classify(&cause, Some(&responded_url)))
            })?;

        Ok(normalize(&payload, &request.with_target(responded_url.as_str())))
    }
}
