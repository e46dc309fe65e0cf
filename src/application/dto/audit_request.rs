// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 审计请求数据传输对象
///
/// `leadId` 只用于日志关联，线索的持久化由外部系统负责
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequestDto {
    /// 待分析的网站地址
    #[validate(length(min = 1))]
    pub url: String,
    /// 关联的线索ID
    #[validate(length(max = 128))]
    pub lead_id: Option<String>,
}
