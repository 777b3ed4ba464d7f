// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::search::provider::{SearchError, SearchProvider};
use async_trait::async_trait;

/// 固定结果列表的搜索提供者
///
/// 不发起搜索，直接返回给定的 URL 列表
pub struct StaticSearchProvider {
    urls: Vec<String>,
}

impl StaticSearchProvider {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

#[async_trait]
impl SearchProvider for StaticSearchProvider {
    async fn search(&self, _term: &str) -> Result<Vec<String>, SearchError> {
        Ok(self.urls.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
