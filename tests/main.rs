// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 测试主模块
///
/// 集成测试在本地 axum 站点上运行完整的 搜索 → 抓取 → 排名 流程，
/// 单元测试覆盖公开的排名和归一化接口
mod integration;

// === Unit Tests ===
mod unit;
