// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::search::provider::SearchError;
use thiserror::Error;

/// 爬取错误类型
///
/// 只有搜索失败和配置错误会作为硬错误返回给调用方，
/// 单个页面的抓取或解析失败在任务内部被吸收。
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("搜索失败: {0}")]
    Search(#[from] SearchError),

    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("配置校验失败: {0}")]
    InvalidSettings(#[from] validator::ValidationErrors),
}

impl CrawlError {
    /// 是否为搜索阶段的失败
    pub fn is_search_failure(&self) -> bool {
        matches!(self, CrawlError::Search(_))
    }
}
