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

use super::helpers::start_test_site;
use scriptrank::config::settings::SearchSettings;
use scriptrank::domain::models::ranked_entry::RankedEntry;
use scriptrank::domain::search::provider::{SearchError, SearchProvider};
use scriptrank::domain::services::crawl_orchestrator::{CrawlOptions, CrawlOrchestrator};
use scriptrank::engines::reqwest_engine::ReqwestEngine;
use scriptrank::infrastructure::search::{GoogleSearchProvider, StaticSearchProvider};
use scriptrank::utils::errors::CrawlError;
use scriptrank::utils::retry_policy::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;

fn engine(timeout: Duration) -> Arc<ReqwestEngine> {
    let policy = RetryPolicy {
        initial_backoff: Duration::from_millis(10),
        ..RetryPolicy::default()
    };
    Arc::new(ReqwestEngine::new("scriptrank-test", timeout, policy).unwrap())
}

fn google(search_url: String) -> Arc<dyn SearchProvider> {
    Arc::new(
        GoogleSearchProvider::new(&SearchSettings {
            base_url: search_url,
            result_limit: 10,
            timeout_ms: 5_000,
        })
        .unwrap(),
    )
}

/// 完整流程测试
///
/// 搜索结果中的失败页面不会影响其余页面的统计
#[tokio::test]
async fn test_search_fetch_and_rank_end_to_end() {
    let site = start_test_site().await;
    let orchestrator = CrawlOrchestrator::new(
        google(site.search_url()),
        engine(Duration::from_secs(5)),
        CrawlOptions {
            top_k: 2,
            ..CrawlOptions::default()
        },
    );

    let report = orchestrator.crawl("javascript").await.unwrap();

    assert_eq!(
        report.entries,
        vec![RankedEntry::new("a.js", 2), RankedEntry::new("b.js", 1)]
    );
    assert_eq!(report.stats.dispatched, 3);
    assert_eq!(report.stats.succeeded, 2);
    assert_eq!(report.stats.failed, 1);
    assert!(!report.stats.deadline_exceeded);

    let text = report.to_string();
    assert!(text.starts_with("Top 2 scripts (name | count):\n"));
    assert!(text.contains("a.js | 2\n"));
}

/// 搜索被拦截时爬取中止
#[tokio::test]
async fn test_blocked_search_aborts_crawl() {
    let site = start_test_site().await;
    let orchestrator = CrawlOrchestrator::new(
        google(site.blocked_search_url()),
        engine(Duration::from_secs(5)),
        CrawlOptions::default(),
    );

    let result = orchestrator.crawl("javascript").await;
    match result {
        Err(CrawlError::Search(SearchError::Blocked(_))) => {}
        other => panic!("expected blocked search, got {:?}", other.map(|r| r.entries)),
    }
}

/// 截止时间到达后慢页面被放弃，已完成的页面仍参与排名
#[tokio::test]
async fn test_deadline_abandons_slow_pages() {
    let site = start_test_site().await;
    let urls = vec![site.page_url("/pages/a"), site.page_url("/pages/slow")];
    let orchestrator = CrawlOrchestrator::new(
        Arc::new(StaticSearchProvider::new(urls)),
        engine(Duration::from_secs(10)),
        CrawlOptions {
            crawl_deadline: Duration::from_millis(1_500),
            ..CrawlOptions::default()
        },
    );

    let report = orchestrator.crawl("slow").await.unwrap();

    assert!(report.stats.deadline_exceeded);
    assert_eq!(report.stats.succeeded, 1);
    assert_eq!(report.stats.abandoned, 1);
    assert_eq!(
        report.entries,
        vec![RankedEntry::new("a.js", 1), RankedEntry::new("b.js", 1)]
    );
}

/// 所有页面都不可用时返回空排名
#[tokio::test]
async fn test_unreachable_pages_yield_empty_report() {
    let site = start_test_site().await;
    let urls = vec![
        site.page_url("/pages/broken"),
        site.page_url("/pages/missing"),
        "not a url".to_string(),
        "ftp://example.com/file".to_string(),
    ];
    let orchestrator = CrawlOrchestrator::new(
        Arc::new(StaticSearchProvider::new(urls)),
        engine(Duration::from_secs(5)),
        CrawlOptions::default(),
    );

    let report = orchestrator.crawl("nothing").await.unwrap();

    assert!(report.entries.is_empty());
    assert_eq!(report.stats.failed, 4);
    assert_eq!(report.to_string(), "Top 5 scripts (name | count):\n");
}

/// 启用扩展名过滤并输出 JSON
#[tokio::test]
async fn test_json_report_with_extension_filter() {
    let site = start_test_site().await;
    let urls = vec![
        site.page_url("/pages/a"),
        site.page_url("/pages/b"),
        site.page_url("/pages/plain"),
    ];
    let orchestrator = CrawlOrchestrator::new(
        Arc::new(StaticSearchProvider::new(urls)),
        engine(Duration::from_secs(5)),
        CrawlOptions {
            top_k: 1,
            script_extension: Some(".js".to_string()),
            ..CrawlOptions::default()
        },
    );

    let report = orchestrator.crawl("json").await.unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["term"], "json");
    assert_eq!(json["entries"][0]["name"], "a.js");
    assert_eq!(json["entries"][0]["count"], 2);
    assert_eq!(json["stats"]["succeeded"], 3);
    assert_eq!(json["stats"]["references"], 3);
}
