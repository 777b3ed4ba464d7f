// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含与外部系统交互的技术实现：
/// - 指标（metrics）：爬取指标的注册和 Prometheus 导出
/// - 搜索（search）：搜索提供者的具体实现
///
/// 基础设施层依赖于领域层的抽象接口，领域层不依赖具体实现。
pub mod metrics;
pub mod search;
