// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 审计请求（audit_request）：清洗后的地址和主页解析结果
/// - 探测结果（probe）：候选地址和可达性结论
/// - 审计结果（audit_result）：对外的稳定输出契约
/// - 错误分类（classified_error）：封闭的错误码集合
pub mod audit_request;
pub mod audit_result;
pub mod classified_error;
pub mod probe;
