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
use crate::domain::models::crawl_report::{CrawlReport, CrawlStats};
use crate::domain::models::fetch_outcome::{FetchErrorKind, FetchOutcome};
use crate::domain::search::provider::SearchProvider;
use crate::domain::services::frequency_aggregator::FrequencyAggregator;
use crate::domain::services::name_normalizer::NameNormalizer;
use crate::domain::services::script_extractor::ScriptExtractor;
use crate::domain::services::top_k_ranker::TopKRanker;
use crate::engines::traits::PageFetcher;
use crate::infrastructure::metrics::{
    CRAWL_DURATION, PAGES_ABANDONED, PAGES_FAILED, PAGES_FETCHED, SCRIPTS_RECORDED,
};
use crate::utils::errors::CrawlError;
use chrono::Utc;
use metrics::{counter, histogram};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, Semaphore};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// 爬取选项
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// 同时进行的页面抓取上限
    pub max_concurrency: usize,
    /// 整个爬取过程的截止时间
    pub crawl_deadline: Duration,
    /// 输出的排名条目数
    pub top_k: usize,
    /// 仅统计以该后缀结尾的脚本名
    pub script_extension: Option<String>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            crawl_deadline: Duration::from_secs(60),
            top_k: 5,
            script_extension: None,
        }
    }
}

impl CrawlOptions {
    pub fn from_settings(settings: &CrawlSettings) -> Self {
        Self {
            max_concurrency: settings.max_concurrency,
            crawl_deadline: settings.crawl_deadline(),
            top_k: settings.top_k,
            script_extension: settings.script_extension.clone(),
        }
    }
}

/// 爬取阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Idle,
    Dispatching,
    Awaiting,
    Ranking,
    Done,
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CrawlPhase::Idle => "idle",
            CrawlPhase::Dispatching => "dispatching",
            CrawlPhase::Awaiting => "awaiting",
            CrawlPhase::Ranking => "ranking",
            CrawlPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// 单个页面任务的结果
enum PageResult {
    Fetched { references: u64 },
    Failed(FetchErrorKind),
    /// 页面在截止时间之后才取回，未记录
    Late,
}

/// 爬取编排器
///
/// 驱动 搜索 → 抓取 → 提取 → 统计 → 排名 的完整流程
pub struct CrawlOrchestrator {
    provider: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    options: CrawlOptions,
}

impl CrawlOrchestrator {
    /// 创建新的爬取编排器
    ///
    /// # 参数
    ///
    /// * `provider` - 搜索提供者
    /// * `fetcher` - 页面抓取器
    /// * `options` - 爬取选项
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        options: CrawlOptions,
    ) -> Self {
        Self {
            provider,
            fetcher,
            options,
        }
    }

    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// 搜索并爬取结果页
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlReport)` - 爬取报告，没有成功页面时排名为空
    /// * `Err(CrawlError::Search)` - 搜索失败，爬取中止
    pub async fn crawl(&self, term: &str) -> Result<CrawlReport, CrawlError> {
        info!("getting search results for: {} (provider: {})", term, self.provider.name());

        let urls = self.provider.search(term).await.map_err(|e| {
            error!("Search for '{}' failed: {}", term, e);
            CrawlError::Search(e)
        })?;

        Ok(self.crawl_urls(term, urls).await)
    }

    /// 爬取给定的结果页并返回排名
    ///
    /// 单个页面的失败不会中止爬取
    pub async fn crawl_urls(&self, term: &str, urls: Vec<String>) -> CrawlReport {
        let started_at = Utc::now();
        let start = Instant::now();
        debug!("Crawl phase: {}", CrawlPhase::Idle);

        let aggregator = Arc::new(FrequencyAggregator::new());
        let stats = self.dispatch(urls, &aggregator).await;

        debug!("Crawl phase: {}", CrawlPhase::Ranking);
        let entries = TopKRanker::rank(&aggregator.snapshot(), self.options.top_k);

        histogram!(CRAWL_DURATION).record(start.elapsed().as_secs_f64());
        info!(
            succeeded = stats.succeeded,
            failed = stats.failed,
            abandoned = stats.abandoned,
            references = stats.references,
            distinct = aggregator.distinct(),
            "Crawl finished in {:?}",
            start.elapsed()
        );
        debug!("Crawl phase: {}", CrawlPhase::Done);

        CrawlReport {
            term: term.to_string(),
            top_k: self.options.top_k,
            entries,
            stats,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// 派发页面任务并等待其完成或截止时间到达
    ///
    /// 返回时所有任务都已结束或被取消，之后不会再有写入
    pub(crate) async fn dispatch(
        &self,
        urls: Vec<String>,
        aggregator: &Arc<FrequencyAggregator>,
    ) -> CrawlStats {
        let deadline = Instant::now() + self.options.crawl_deadline;
        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrency.max(1)));
        // Set to true at the deadline; recording holds the read side
        let closed = Arc::new(RwLock::new(false));
        let mut stats = CrawlStats {
            dispatched: urls.len(),
            ..CrawlStats::default()
        };

        debug!("Crawl phase: {} ({} urls)", CrawlPhase::Dispatching, urls.len());
        let mut tasks = JoinSet::new();
        for url in urls {
            let fetcher = self.fetcher.clone();
            let aggregator = aggregator.clone();
            let semaphore = semaphore.clone();
            let extension = self.options.script_extension.clone();
            let closed = closed.clone();

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return PageResult::Failed(FetchErrorKind::Other),
                };

                debug!("getting source code from: {}", url);
                match fetcher.fetch(&url).await {
                    FetchOutcome::Success(html) => {
                        let closed = closed.read().await;
                        if *closed {
                            debug!("Discarding {} fetched after the deadline", url);
                            return PageResult::Late;
                        }
                        PageResult::Fetched {
                            references: record_page(&url, &html, &aggregator, extension.as_deref()),
                        }
                    }
                    FetchOutcome::Failure(kind) => {
                        warn!("Skipping {}: {}", url, kind);
                        PageResult::Failed(kind)
                    }
                }
            });
        }

        debug!("Crawl phase: {}", CrawlPhase::Awaiting);
        loop {
            match tokio::time::timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok(result))) => absorb(&mut stats, result),
                Ok(Some(Err(e))) => {
                    error!("Page task failed: {}", e);
                    stats.failed += 1;
                    counter!(PAGES_FAILED).increment(1);
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        "Crawl deadline of {:?} exceeded, abandoning {} pages",
                        self.options.crawl_deadline,
                        tasks.len()
                    );
                    stats.deadline_exceeded = true;
                    // Waits for pages already being recorded, later ones are discarded
                    *closed.write().await = true;
                    tasks.abort_all();
                    // Join barrier: drain until every task has finished or been cancelled
                    while let Some(joined) = tasks.join_next().await {
                        match joined {
                            Ok(result) => absorb(&mut stats, result),
                            Err(e) if e.is_cancelled() => {
                                stats.abandoned += 1;
                                counter!(PAGES_ABANDONED).increment(1);
                            }
                            Err(e) => {
                                error!("Page task failed: {}", e);
                                stats.failed += 1;
                                counter!(PAGES_FAILED).increment(1);
                            }
                        }
                    }
                    break;
                }
            }
        }

        stats
    }
}

fn absorb(stats: &mut CrawlStats, result: PageResult) {
    match result {
        PageResult::Fetched { references } => {
            stats.succeeded += 1;
            stats.references += references;
            counter!(PAGES_FETCHED).increment(1);
        }
        PageResult::Failed(_) => {
            stats.failed += 1;
            counter!(PAGES_FAILED).increment(1);
        }
        PageResult::Late => {
            stats.abandoned += 1;
            counter!(PAGES_ABANDONED).increment(1);
        }
    }
}

/// 提取并记录一个页面的全部脚本名
///
/// 同步执行，中间没有挂起点，因此一个页面要么全部记录，要么完全不记录
fn record_page(
    url: &str,
    html: &str,
    aggregator: &FrequencyAggregator,
    extension: Option<&str>,
) -> u64 {
    let page = ScriptExtractor::parse(html);
    let mut recorded = 0;

    for reference in page.script_sources() {
        let name = NameNormalizer::normalize(reference);
        if let Some(extension) = extension {
            if !NameNormalizer::has_extension(name, extension) {
                continue;
            }
        }
        debug!("found script {} on {}", name, url);
        aggregator.record(name);
        recorded += 1;
    }

    if recorded == 0 {
        debug!("No script references found on {}", url);
    }
    counter!(SCRIPTS_RECORDED).increment(recorded);
    recorded
}

#[cfg(test)]
#[path = "crawl_orchestrator_test.rs"]
mod tests;
