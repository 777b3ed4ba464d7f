// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SearchError {
    #[error("Search engine error: {0}")]
    EngineError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Blocked by search engine: {0}")]
    Blocked(String),
    #[error("Timeout")]
    Timeout,
}

/// 搜索提供者
///
/// 根据搜索词返回按排名顺序排列的结果页 URL
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a search query
    async fn search(&self, term: &str) -> Result<Vec<String>, SearchError>;

    /// Get the name of the search provider
    fn name(&self) -> &'static str;
}
