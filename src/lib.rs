// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含入站请求的数据传输对象和流水线组装
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含审计流水线的值对象和各个阶段
pub mod domain;

/// 引擎模块
///
/// 实现可达性探测和审计接口的网络传输
pub mod engines;

/// 基础设施模块
///
/// 提供指标导出等外部集成
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和错误渲染
pub mod presentation;

/// 工具模块
///
/// 提供重试策略、日志初始化等通用功能
pub mod utils;
