// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 页面抓取引擎
///
/// `traits` 定义抓取接口和错误分类，`reqwest_engine` 是基于 HTTP 客户端的实现
pub mod reqwest_engine;
pub mod traits;
pub mod validators;
