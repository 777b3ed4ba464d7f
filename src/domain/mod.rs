// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含脚本排名的核心逻辑，包括：
/// - 领域模型（models）：抓取结果、排名条目和爬取报告
/// - 搜索（search）：搜索提供者抽象接口
/// - 服务（services）：提取、归一化、计数、排名和爬取编排
///
/// 领域层不依赖任何具体的网络实现。
pub mod models;
pub mod search;
pub mod services;
