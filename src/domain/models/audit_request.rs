// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::fmt;
use url::Url;

/// 经过清洗的安全URL
///
/// 只能由 `UrlSanitizer` 构造，保证协议为 http/https 且主机不在私有地址黑名单中。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeUrl(Url);

impl SafeUrl {
    pub(crate) fn new(url: Url) -> Self {
        Self(url)
    }

    /// 获取解析后的URL
    pub fn url(&self) -> &Url {
        &self.0
    }

    /// 获取URL字符串
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SafeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// 审计请求
///
/// 由主页解析器创建，下游所有阶段只读使用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRequest {
    /// 分析目标（主页地址，或探测后实际可达的候选地址）
    pub target_url: String,
    /// 用户提交的原始地址
    pub original_url: String,
    /// 原始地址是否为深层页面
    pub is_deep_page: bool,
}

impl AuditRequest {
    /// 以探测成功的候选地址作为新的分析目标
    pub fn with_target(&self, target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            original_url: self.original_url.clone(),
            is_deep_page: self.is_deep_page,
        }
    }
}
