// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含入站请求的数据传输对象和流水线的组装逻辑
pub mod dto;
pub mod pipeline_factory;
