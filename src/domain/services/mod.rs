// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 审计流水线的各个阶段，按调用顺序：
/// - URL清洗（url_sanitizer）：校验并规范化用户输入，拒绝SSRF风险地址
/// - 主页解析（homepage_resolver）：将深层地址归约为主页
/// - 可达性探测（reachability_prober）：在协议和子域名变体间寻找可用地址
/// - 结果归一化（result_normalizer）：将上游报告转换为稳定的评分模型
/// - 错误分类（error_classifier）：将底层失败映射为封闭的错误码
/// - 编排（audit_pipeline）：串联以上阶段
pub mod audit_pipeline;
pub mod error_classifier;
pub mod homepage_resolver;
pub mod reachability_prober;
pub mod result_normalizer;
pub mod url_sanitizer;
