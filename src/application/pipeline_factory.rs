// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::domain::services::audit_pipeline::AuditPipeline;
use crate::domain::services::reachability_prober::{ProbeConfig, ReachabilityProber};
use crate::domain::services::url_sanitizer::{SanitizerConfig, UrlSanitizer};
use crate::engines::pagespeed_client::{PageSpeedClient, PageSpeedConfig};
use crate::engines::reqwest_probe::ReqwestProbe;
use crate::engines::resilient_client::ResilientAuditClient;
use crate::engines::traits::TransportError;
use crate::utils::retry_policy::RetryPolicy;

/// 根据配置组装审计流水线
///
/// HTTP 客户端在这里创建一次，之后所有请求复用
pub fn build_pipeline(settings: &Settings) -> Result<AuditPipeline, TransportError> {
    let sanitizer = UrlSanitizer::new(SanitizerConfig::from(&settings.sanitizer));

    let probe = Arc::new(ReqwestProbe::new(&settings.probe.user_agent)?);
    let prober = ReachabilityProber::new(probe, ProbeConfig::from(&settings.probe));

    let transport = Arc::new(PageSpeedClient::new(PageSpeedConfig::from(&settings.audit))?);
    let client = ResilientAuditClient::new(transport, RetryPolicy::from(&settings.retry));

    Ok(AuditPipeline::new(sanitizer, prober, client))
}
