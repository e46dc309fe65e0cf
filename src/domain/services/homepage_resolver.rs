// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{Origin, Url};

use crate::domain::models::audit_request::{AuditRequest, SafeUrl};
use crate::domain::services::url_sanitizer::ValidationError;

/// 将任意深度的地址归约为站点主页
///
/// 主页只保留协议、主机和非默认端口，丢弃路径、查询和片段。
pub fn resolve_homepage(url: &SafeUrl) -> Result<AuditRequest, ValidationError> {
    let homepage = homepage_of(url.url())?;
    let path = url.url().path();

    Ok(AuditRequest {
        target_url: homepage,
        original_url: url.as_str().to_string(),
        is_deep_page: !path.is_empty() && path != "/",
    })
}

/// 计算地址的主页（无结尾斜杠）
pub fn homepage_of(url: &Url) -> Result<String, ValidationError> {
    match url.origin() {
        Origin::Tuple(..) => Ok(url.origin().ascii_serialization()),
        Origin::Opaque(_) => Err(ValidationError::MissingHost),
    }
}
