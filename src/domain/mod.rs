// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含审计流水线的核心逻辑，包括：
/// - 领域模型（models）：请求、探测结果、审计结果和错误分类等值对象
/// - 服务（services）：URL清洗、主页解析、可达性探测、结果归一化、错误分类和编排
///
/// 每个值对象都随请求创建、随请求丢弃，流水线不持有跨请求的可变状态。
pub mod models;
pub mod services;
