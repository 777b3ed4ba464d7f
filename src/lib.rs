// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含脚本提取、计数、排名和爬取编排
pub mod domain;

/// 引擎模块
///
/// 实现页面抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供搜索提供者和指标导出
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
