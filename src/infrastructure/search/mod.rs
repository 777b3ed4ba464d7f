// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索服务模块
///
/// 提供搜索提供者的具体实现
pub mod google;
pub mod static_list;

pub use google::GoogleSearchProvider;
pub use static_list::StaticSearchProvider;
