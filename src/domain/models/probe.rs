// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

use super::classified_error::ErrorCode;

/// 探测候选地址
///
/// 在主页地址的基础上变换 `www.` 前缀和 http/https 协议生成，生成后不可变。
pub type CandidateUrl = String;

/// 可达性探测结果
///
/// 每个审计请求只产生一次，生成后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    /// 是否存在可访问的地址
    pub reachable: bool,
    /// 第一个响应的候选地址
    pub responded_url: Option<CandidateUrl>,
    /// 失败分类，仅在不可达时存在
    pub failure_class: Option<ErrorCode>,
}

impl ProbeOutcome {
    /// 探测成功
    pub fn reachable(url: CandidateUrl) -> Self {
        Self {
            reachable: true,
            responded_url: Some(url),
            failure_class: None,
        }
    }

    /// 探测失败
    pub fn unreachable(failure_class: ErrorCode) -> Self {
        Self {
            reachable: false,
            responded_url: None,
            failure_class: Some(failure_class),
        }
    }
}
