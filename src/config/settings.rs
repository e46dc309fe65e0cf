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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::services::reachability_prober::ProbeConfig;
use crate::domain::services::url_sanitizer::{SanitizerConfig, MAX_URL_LENGTH};
use crate::engines::pagespeed_client::{PageSpeedConfig, DEFAULT_PAGESPEED_ENDPOINT};
use crate::engines::reqwest_probe::DEFAULT_PROBE_USER_AGENT;
use crate::utils::retry_policy::RetryPolicy;

/// 应用程序配置设置
///
/// 包含服务器、指标、URL清洗、探测、审计接口和重试等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
    /// URL清洗配置
    pub sanitizer: SanitizerSettings,
    /// 可达性探测配置
    pub probe: ProbeSettings,
    /// 审计接口配置
    pub audit: AuditSettings,
    /// 重试配置
    pub retry: RetrySettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

/// URL清洗配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SanitizerSettings {
    /// URL 最大长度
    pub max_url_length: usize,
    /// 是否允许私有地址（仅限本地开发）
    pub allow_private_hosts: bool,
}

/// 探测配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    /// 单个候选地址超时时间（秒）
    pub timeout_secs: u64,
    /// 探测时使用的客户端标识
    pub user_agent: String,
}

/// 审计接口配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AuditSettings {
    /// 接口地址
    pub api_endpoint: String,
    /// API 密钥
    pub api_key: Option<String>,
    /// 测试策略 (mobile, desktop)
    pub strategy: String,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
}

/// 重试配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    /// 最大尝试次数
    pub max_attempts: u32,
    /// 初始退避时间（毫秒）
    pub initial_backoff_ms: u64,
    /// 最大退避时间（毫秒）
    pub max_backoff_ms: u64,
    /// 退避乘数
    pub backoff_multiplier: f64,
    /// 是否启用抖动
    pub enable_jitter: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和 `AUDITRS__*` 环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("AUDITRS").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅使用默认值构建配置
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .set_default("sanitizer.max_url_length", MAX_URL_LENGTH as u64)?
            .set_default("sanitizer.allow_private_hosts", false)?
            .set_default("probe.timeout_secs", 15)?
            .set_default("probe.user_agent", DEFAULT_PROBE_USER_AGENT)?
            .set_default("audit.api_endpoint", DEFAULT_PAGESPEED_ENDPOINT)?
            .set_default("audit.strategy", "mobile")?
            .set_default("audit.timeout_secs", 60)?
            .set_default("retry.max_attempts", 3)?
            .set_default("retry.initial_backoff_ms", 1000)?
            .set_default("retry.max_backoff_ms", 10_000)?
            .set_default("retry.backoff_multiplier", 2.0)?
            .set_default("retry.enable_jitter", false)
    }
}

impl From<&SanitizerSettings> for SanitizerConfig {
    fn from(settings: &SanitizerSettings) -> Self {
        Self {
            max_url_length: settings.max_url_length,
            allow_private_hosts: settings.allow_private_hosts,
        }
    }
}

impl From<&ProbeSettings> for ProbeConfig {
    fn from(settings: &ProbeSettings) -> Self {
        Self {
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

impl From<&AuditSettings> for PageSpeedConfig {
    fn from(settings: &AuditSettings) -> Self {
        Self {
            endpoint: settings.api_endpoint.clone(),
            api_key: settings.api_key.clone().filter(|key| !key.is_empty()),
            strategy: settings.strategy.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts,
            initial_backoff: Duration::from_millis(settings.initial_backoff_ms),
            max_backoff: Duration::from_millis(settings.max_backoff_ms),
            backoff_multiplier: settings.backoff_multiplier,
            enable_jitter: settings.enable_jitter,
            ..RetryPolicy::default()
        }
    }
}
