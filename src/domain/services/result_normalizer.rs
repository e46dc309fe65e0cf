// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use serde_json::Value;

use crate::domain::models::audit_request::AuditRequest;
use crate::domain::models::audit_result::{AuditResult, Diagnostic, Opportunity, RawAuditPayload};

/// 检查项通过阈值
pub const CHECK_PASS_THRESHOLD: f64 = 0.9;

/// 每类建议的最大条数
pub const MAX_BUCKET_ENTRIES: usize = 5;

/// AI 可见度权重 (seo, performance, accessibility, best-practices)
pub const AI_VISIBILITY_WEIGHTS: (f64, f64, f64, f64) = (0.4, 0.3, 0.2, 0.1);

/// 将 0.0-1.0 的上游分数转换为 0-100 的整数
///
/// 四舍五入采用远离零方向（对非负数即 round-half-up），缺失视为 0
pub fn to_percent(fraction: Option<f64>) -> u8 {
    let fraction = fraction.filter(|f| f.is_finite()).unwrap_or(0.0);
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

/// 计算 AI 可见度综合得分
pub fn ai_visibility_score(seo: u8, performance: u8, accessibility: u8, best_practices: u8) -> u8 {
    let (w_seo, w_perf, w_a11y, w_bp) = AI_VISIBILITY_WEIGHTS;
    let blended = f64::from(seo) * w_seo
        + f64::from(performance) * w_perf
        + f64::from(accessibility) * w_a11y
        + f64::from(best_practices) * w_bp;
    blended.round().clamp(0.0, 100.0) as u8
}

fn category_fraction(lighthouse: &Value, category: &str) -> Option<f64> {
    lighthouse
        .get("categories")?
        .get(category)?
        .get("score")?
        .as_f64()
}

fn text_field(audit: &Value, field: &str) -> String {
    audit
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// 归一化审计报告
///
/// # 参数
///
/// * `payload` - 上游原始报告
/// * `request` - 审计请求，`target_url` 为实际探测和审计的地址
///
/// # 返回值
///
/// 稳定的审计结果，时间戳取归一化时刻
pub fn normalize(payload: &RawAuditPayload, request: &AuditRequest) -> AuditResult {
    let lighthouse = payload.0.get("lighthouseResult").unwrap_or(&Value::Null);

    let seo_score = to_percent(category_fraction(lighthouse, "seo"));
    let performance_score = to_percent(category_fraction(lighthouse, "performance"));
    let accessibility_score = to_percent(category_fraction(lighthouse, "accessibility"));
    let best_practices_score = to_percent(category_fraction(lighthouse, "best-practices"));

    let mut technical_issues = 0u32;
    let mut opportunities = Vec::new();
    let mut diagnostics = Vec::new();

    if let Some(audits) = lighthouse.get("audits").and_then(Value::as_object) {
        // serde_json 开启 preserve_order，遍历顺序与上游一致
        for audit in audits.values() {
            let score = match audit.get("score").and_then(Value::as_f64) {
                Some(score) if score < CHECK_PASS_THRESHOLD => score,
                _ => continue,
            };
            technical_issues += 1;

            let detail_type = audit
                .pointer("/details/type")
                .and_then(Value::as_str)
                .unwrap_or_default();

            match detail_type {
                "opportunity" if opportunities.len() < MAX_BUCKET_ENTRIES => {
                    opportunities.push(Opportunity {
                        title: text_field(audit, "title"),
                        description: text_field(audit, "description"),
                        score,
                        display_value: audit
                            .get("displayValue")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    });
                }
                "table" if diagnostics.len() < MAX_BUCKET_ENTRIES => {
                    diagnostics.push(Diagnostic {
                        title: text_field(audit, "title"),
                        description: text_field(audit, "description"),
                        score,
                    });
                }
                _ => {}
            }
        }
    }

    AuditResult {
        seo_score,
        performance_score,
        accessibility_score,
        best_practices_score,
        ai_visibility_score: ai_visibility_score(
            seo_score,
            performance_score,
            accessibility_score,
            best_practices_score,
        ),
        technical_issues,
        opportunities,
        diagnostics,
        analyzed_url: request.target_url.clone(),
        original_url: request.original_url.clone(),
        is_deep_page: request.is_deep_page,
        analysis_timestamp: Utc::now(),
    }
}
