// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 上游审计接口返回的原始数据
///
/// 只在审计客户端和结果归一化之间流转，不持久化也不对外暴露。
#[derive(Debug, Clone, PartialEq)]
pub struct RawAuditPayload(pub serde_json::Value);

/// 优化建议
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub title: String,
    pub description: String,
    /// 上游检查项得分 (0.0-1.0)
    pub score: f64,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

/// 诊断信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub title: String,
    pub description: String,
    /// 上游检查项得分 (0.0-1.0)
    pub score: f64,
}

/// 审计结果
///
/// 流水线对外的稳定输出契约。每个成功请求生成一个，不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    /// SEO 得分 (0-100)
    pub seo_score: u8,
    /// 性能得分 (0-100)
    pub performance_score: u8,
    /// 无障碍得分 (0-100)
    pub accessibility_score: u8,
    /// 最佳实践得分 (0-100)
    pub best_practices_score: u8,
    /// AI 可见度综合得分 (0-100)
    pub ai_visibility_score: u8,
    /// 未通过的检查项数量
    pub technical_issues: u32,
    /// 优化建议，最多 5 条
    pub opportunities: Vec<Opportunity>,
    /// 诊断信息，最多 5 条
    pub diagnostics: Vec<Diagnostic>,
    /// 实际探测和审计的地址
    pub analyzed_url: String,
    /// 用户提交的原始地址
    pub original_url: String,
    /// 原始地址是否为深层页面
    pub is_deep_page: bool,
    /// 归一化时间
    pub analysis_timestamp: DateTime<Utc>,
}
