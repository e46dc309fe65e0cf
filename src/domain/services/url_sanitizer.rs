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

use std::net::{Ipv4Addr, Ipv6Addr};
use thiserror::Error;
use url::{Host, Url};

use crate::domain::models::audit_request::SafeUrl;

/// URL 最大长度
pub const MAX_URL_LENGTH: usize = 2048;

/// 验证错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// URL为空
    #[error("URL cannot be empty")]
    Empty,
    /// URL过长
    #[error("URL is longer than {max} characters")]
    TooLong { max: usize },
    /// URL无效
    #[error("Invalid URL: {0}")]
    Malformed(String),
    /// 不支持的协议
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    /// 缺少主机
    #[error("URL has no host")]
    MissingHost,
    /// 检测到SSRF风险
    #[error("Host is not allowed: {0}")]
    BlockedHost(String),
}

/// URL 清洗配置
#[derive(Debug, Clone)]
pub struct SanitizerConfig {
    /// 最大长度
    pub max_url_length: usize,
    /// 是否允许私有地址（仅用于本地开发和测试）
    pub allow_private_hosts: bool,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_url_length: MAX_URL_LENGTH,
            allow_private_hosts: false,
        }
    }
}

/// URL 清洗器
///
/// 将用户输入的字符串校验并规范化为安全的绝对地址。
/// 纯函数，不发起任何网络请求；主机检查基于字面值，不做 DNS 解析。
#[derive(Debug, Clone, Default)]
pub struct UrlSanitizer {
    config: SanitizerConfig,
}

impl UrlSanitizer {
    pub fn new(config: SanitizerConfig) -> Self {
        Self { config }
    }

    /// 清洗URL
    ///
    /// # 参数
    ///
    /// * `raw` - 用户输入的原始字符串
    ///
    /// # 返回值
    ///
    /// * `Ok(SafeUrl)` - 规范化后的绝对地址
    /// * `Err(ValidationError)` - 输入无效或存在SSRF风险
    pub fn sanitize(&self, raw: &str) -> Result<SafeUrl, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }
        if trimmed.chars().count() > self.config.max_url_length {
            return Err(ValidationError::TooLong {
                max: self.config.max_url_length,
            });
        }

        let candidate = with_default_scheme(trimmed)?;
        if candidate.chars().count() > self.config.max_url_length {
            return Err(ValidationError::TooLong {
                max: self.config.max_url_length,
            });
        }

        let parsed =
            Url::parse(&candidate).map_err(|e| ValidationError::Malformed(e.to_string()))?;

        // Check scheme
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ValidationError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let host = parsed.host().ok_or(ValidationError::MissingHost)?;
        if !self.config.allow_private_hosts && is_blocked_host(&host) {
            return Err(ValidationError::BlockedHost(host.to_string()));
        }

        Ok(SafeUrl::new(parsed))
    }
}

/// 为缺少协议的输入补全 `https://`
///
/// `host:port` 形式视为无协议；`http:`/`https:` 即使缺少 `//` 也交给解析器处理，
/// 其他 `scheme:` 前缀直接拒绝。
fn with_default_scheme(input: &str) -> Result<String, ValidationError> {
    let lower = input.to_ascii_lowercase();
    if lower.starts_with("http:") || lower.starts_with("https:") {
        return Ok(input.to_string());
    }

    if let Some((prefix, rest)) = lower.split_once(':') {
        let looks_like_scheme = !prefix.is_empty()
            && prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-')
            && prefix.starts_with(|c: char| c.is_ascii_alphabetic());
        let is_port = rest.starts_with(|c: char| c.is_ascii_digit());
        if looks_like_scheme && !is_port {
            return Err(ValidationError::UnsupportedScheme(prefix.to_string()));
        }
    }

    Ok(format!("https://{}", input))
}

/// 检查主机是否属于禁止访问的范围
fn is_blocked_host(host: &Host<&str>) -> bool {
    match host {
        Host::Domain(domain) => {
            let domain = domain.trim_end_matches('.');
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Host::Ipv4(ip) => is_blocked_ipv4(ip),
        Host::Ipv6(ip) => is_blocked_ipv6(ip),
    }
}

fn is_blocked_ipv4(ip: &Ipv4Addr) -> bool {
    // 127.0.0.0/8, 10/8, 172.16/12, 192.168/16, 0.0.0.0, 169.254/16 (metadata)
    ip.is_loopback() || ip.is_private() || ip.is_unspecified() || ip.is_link_local()
}

fn is_blocked_ipv6(ip: &Ipv6Addr) -> bool {
    if ip.is_loopback() || ip.is_unspecified() {
        return true;
    }
    // Unique Local Address (fc00::/7)
    if (ip.segments()[0] & 0xfe00) == 0xfc00 {
        return true;
    }
    // Link-local (fe80::/10)
    if (ip.segments()[0] & 0xffc0) == 0xfe80 {
        return true;
    }
    match ip.to_ipv4_mapped() {
        Some(v4) => is_blocked_ipv4(&v4),
        None => false,
    }
}
