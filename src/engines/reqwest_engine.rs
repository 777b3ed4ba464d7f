// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::CrawlSettings;
use crate::domain::models::fetch_outcome::FetchOutcome;
use crate::engines::traits::{EngineError, PageFetcher};
use crate::engines::validators;
use crate::utils::retry_policy::RetryPolicy;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

/// 抓取引擎
///
/// 基于reqwest实现的HTTP页面抓取器，所有请求共享一个连接池
pub struct ReqwestEngine {
    client: reqwest::Client,
    retry_policy: RetryPolicy,
}

impl ReqwestEngine {
    /// 创建抓取引擎
    ///
    /// # 参数
    ///
    /// * `user_agent` - 请求使用的 User-Agent
    /// * `timeout` - 单个请求（含响应体）的超时时间
    /// * `retry_policy` - 暂时性失败的重试策略
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 抓取引擎
    /// * `Err(EngineError)` - HTTP 客户端创建失败
    pub fn new(
        user_agent: &str,
        timeout: Duration,
        retry_policy: RetryPolicy,
    ) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            retry_policy,
        })
    }

    /// 根据爬取配置创建抓取引擎
    pub fn from_settings(settings: &CrawlSettings) -> Result<Self, EngineError> {
        Self::new(
            &settings.user_agent,
            settings.per_request_timeout(),
            RetryPolicy::from_settings(settings),
        )
    }

    async fn fetch_once(&self, url: &Url) -> Result<String, EngineError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Status(status));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// 暂时性失败最多按重试策略重试，其余失败直接返回
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let url = match validators::validate_url(url) {
            Ok(url) => url,
            Err(e) => {
                warn!("Rejecting {}: {}", url, e);
                return FetchOutcome::Failure(e.kind());
            }
        };

        let mut attempt = 0;
        loop {
            let start = Instant::now();
            match self.fetch_once(&url).await {
                Ok(html) => {
                    debug!(
                        url = %url,
                        attempt,
                        bytes = html.len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Fetched page"
                    );
                    return FetchOutcome::Success(html);
                }
                Err(e) if e.is_retryable() && self.retry_policy.should_retry(attempt) => {
                    attempt += 1;
                    let backoff = self.retry_policy.calculate_backoff(attempt);
                    debug!(url = %url, attempt, ?backoff, "Retrying after transient failure: {}", e);
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => {
                    warn!(url = %url, attempt, "Fetch failed: {}", e);
                    return FetchOutcome::Failure(e.kind());
                }
            }
        }
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
