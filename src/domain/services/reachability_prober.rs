// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::{Host, Url};

use crate::domain::models::audit_request::AuditRequest;
use crate::domain::models::classified_error::ErrorCode;
use crate::domain::models::probe::{CandidateUrl, ProbeOutcome};
use crate::domain::services::error_classifier::code_for_transport;
use crate::engines::traits::{HttpProbe, TransportError};

/// 探测配置
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// 单个候选地址的超时时间
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
        }
    }
}

/// 生成候选地址列表
///
/// 顺序：主页本身、切换 `www.` 前缀后的主页、https 主页的 http 版本。
/// IP 地址不做 `www.` 切换，重复项去除。
pub fn candidate_urls(homepage: &str) -> Vec<CandidateUrl> {
    let mut candidates = vec![homepage.to_string()];

    let parsed = match Url::parse(homepage) {
        Ok(parsed) => parsed,
        Err(_) => return candidates,
    };

    if let Some(Host::Domain(domain)) = parsed.host() {
        let toggled = match domain.strip_prefix("www.") {
            Some(apex) => apex.to_string(),
            None => format!("www.{}", domain),
        };
        let mut variant = parsed.clone();
        if variant.set_host(Some(&toggled)).is_ok() {
            push_unique(&mut candidates, trim_root(&variant));
        }
    }

    if parsed.scheme() == "https" {
        let mut variant = parsed.clone();
        if variant.set_scheme("http").is_ok() {
            push_unique(&mut candidates, trim_root(&variant));
        }
    }

    candidates
}

fn trim_root(url: &Url) -> String {
    let serialized = url.as_str();
    if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
        serialized.trim_end_matches('/').to_string()
    } else {
        serialized.to_string()
    }
}

fn push_unique(candidates: &mut Vec<CandidateUrl>, candidate: CandidateUrl) {
    if !candidates.contains(&candidate) {
        candidates.push(candidate);
    }
}

/// 状态码是否表示站点存在（2xx/3xx，以及仍可分析的 4xx）
pub fn is_reachable_status(status: u16) -> bool {
    (100..500).contains(&status)
}

/// 可达性探测器
///
/// 依次探测候选地址，第一个可达的地址胜出并立即停止
pub struct ReachabilityProber {
    probe: Arc<dyn HttpProbe>,
    config: ProbeConfig,
}

impl ReachabilityProber {
    pub fn new(probe: Arc<dyn HttpProbe>, config: ProbeConfig) -> Self {
        Self { probe, config }
    }

    /// 探测审计请求的目标地址
    pub async fn probe(&self, request: &AuditRequest) -> ProbeOutcome {
        let candidates = candidate_urls(&request.target_url);
        // 主候选地址（用户自己的地址）的错误用于分类
        let mut primary_error: Option<TransportError> = None;

        for (index, candidate) in candidates.iter().enumerate() {
            debug!(
                "Probing candidate {}/{}: {} via {}",
                index + 1,
                candidates.len(),
                candidate,
                self.probe.name()
            );

            match self.probe.probe(candidate, self.config.timeout).await {
                Ok(status) if is_reachable_status(status) => {
                    counter!("probe_attempts_total", "outcome" => "reachable").increment(1);
                    info!("Target reachable at {} (status {})", candidate, status);
                    return ProbeOutcome::reachable(candidate.clone());
                }
                Ok(status) => {
                    counter!("probe_attempts_total", "outcome" => "server_error").increment(1);
                    debug!("Candidate {} answered {}", candidate, status);
                }
                Err(e) => {
                    counter!("probe_attempts_total", "outcome" => "transport_error").increment(1);
                    debug!("Candidate {} failed: {}", candidate, e);
                    if index == 0 {
                        primary_error = Some(e);
                    }
                }
            }
        }

        let failure_class = match primary_error.as_ref().map(code_for_transport) {
            Some(code) if code != ErrorCode::Unknown => code,
            _ => ErrorCode::ConnectionFailed,
        };
        warn!(
            "No candidate reachable for {} ({} tried): {}",
            request.target_url,
            candidates.len(),
            failure_class
        );
        ProbeOutcome::unreachable(failure_class)
    }
}
