// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{AuditTransport, TransportError, UpstreamResponse};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::debug;

/// PageSpeed Insights v5 接口地址
pub const DEFAULT_PAGESPEED_ENDPOINT: &str =
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// 请求的审计类别
pub const AUDIT_CATEGORIES: [&str; 4] = ["performance", "accessibility", "best-practices", "seo"];

/// PageSpeed 客户端配置
#[derive(Debug, Clone)]
pub struct PageSpeedConfig {
    /// 接口地址
    pub endpoint: String,
    /// API 密钥
    pub api_key: Option<String>,
    /// 测试策略 (mobile, desktop)
    pub strategy: String,
    /// 单次请求超时时间
    pub timeout: Duration,
}

impl Default for PageSpeedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PAGESPEED_ENDPOINT.to_string(),
            api_key: None,
            strategy: "mobile".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// PageSpeed 审计传输
///
/// 每次调用发起一次审计请求，非 2xx 响应同样作为 `UpstreamResponse` 返回，交由上层判断是否重试
pub struct PageSpeedClient {
    client: reqwest::Client,
    config: PageSpeedConfig,
}

impl PageSpeedClient {
    pub fn new(config: PageSpeedConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn query(&self, target_url: &str) -> Vec<(&'static str, String)> {
        let mut query = vec![("url", target_url.to_string())];
        for category in AUDIT_CATEGORIES {
            query.push(("category", category.to_string()));
        }
        query.push(("strategy", self.config.strategy.clone()));
        if let Some(key) = &self.config.api_key {
            query.push(("key", key.clone()));
        }
        query
    }
}

#[async_trait]
impl AuditTransport for PageSpeedClient {
    async fn run_audit(&self, target_url: &str) -> Result<UpstreamResponse, TransportError> {
        let start = Instant::now();
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&self.query(target_url))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(
            "Audit API answered {} for {} in {}ms",
            status,
            target_url,
            start.elapsed().as_millis()
        );
        Ok(UpstreamResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "pagespeed"
    }
}
