// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SearchSettings;
use crate::domain::search::provider::{SearchError, SearchProvider};
use crate::utils::url_utils::{is_http_url, resolve_url, unwrap_redirect};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 结果容器选择器，按顺序尝试
///
/// 每个容器取第一个链接
static RESULT_CONTAINER_SELECTORS: Lazy<Vec<(&'static str, Selector)>> = Lazy::new(|| {
    [".srg .g", "div.g"]
        .into_iter()
        .map(|css| (css, Selector::parse(css).expect("static selector is valid")))
        .collect()
});

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector is valid"));

/// 兜底策略：包含标题的链接
static HEADING_ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]:has(h3)").expect("static selector is valid"));

/// Google 搜索提供者
///
/// 请求搜索结果页并从静态 HTML 中解析结果链接
pub struct GoogleSearchProvider {
    client: Client,
    base_url: Url,
    result_limit: usize,
}

impl GoogleSearchProvider {
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            SearchError::EngineError(format!("Invalid search url {}: {}", settings.base_url, e))
        })?;

        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(settings.timeout())
            .build()
            .map_err(|e| SearchError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            result_limit: settings.result_limit,
        })
    }

    /// 解析 Google HTML 结果
    ///
    /// 使用多种选择器策略来适应 Google 不断变化的 HTML 结构；
    /// 结果按页面顺序去重，并截断到配置的数量
    pub fn parse_results(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        let mut hrefs: Vec<&str> = Vec::new();
        let mut used_strategy = "none";

        for (css, selector) in RESULT_CONTAINER_SELECTORS.iter() {
            hrefs = document
                .select(selector)
                .filter_map(|container| container.select(&ANCHOR_SELECTOR).next())
                .filter_map(|anchor| anchor.value().attr("href"))
                .collect();
            if !hrefs.is_empty() {
                used_strategy = *css;
                break;
            }
        }

        if hrefs.is_empty() {
            hrefs = document
                .select(&HEADING_ANCHOR_SELECTOR)
                .filter_map(|anchor| anchor.value().attr("href"))
                .collect();
            used_strategy = "a:has(h3)";
        }

        debug!("使用策略 {} 找到 {} 个结果链接", used_strategy, hrefs.len());

        let mut seen = HashSet::new();
        hrefs
            .into_iter()
            .filter_map(|href| self.to_result_url(href))
            .filter(|url| seen.insert(url.clone()))
            .take(self.result_limit)
            .collect()
    }

    /// 将结果链接转换为可抓取的绝对地址
    ///
    /// 跳转链接会被展开；非 http(s) 链接和搜索站点自身的链接被丢弃
    fn to_result_url(&self, href: &str) -> Option<String> {
        let resolved = match resolve_url(&self.base_url, href) {
            Ok(url) => unwrap_redirect(url),
            Err(e) => {
                warn!("href-attribute of search result could not be resolved: {} ({})", href, e);
                return None;
            }
        };

        if !is_http_url(&resolved) || resolved.host_str() == self.base_url.host_str() {
            return None;
        }

        Some(resolved.to_string())
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    async fn search(&self, term: &str) -> Result<Vec<String>, SearchError> {
        let num = self.result_limit.to_string();

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("q", term), ("num", num.as_str())])
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| request_error(e, "HTTP request failed"))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(SearchError::Blocked(format!(
                "Google search returned status: {}",
                status
            )));
        }
        if !status.is_success() {
            return Err(SearchError::EngineError(format!(
                "Google search returned status: {}",
                status
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| request_error(e, "Failed to read response body"))?;

        let results = self.parse_results(&html);
        if results.is_empty() {
            warn!("Google search for '{}' yielded no result links", term);
        } else {
            info!("Google search for '{}' returned {} results", term, results.len());
        }

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

/// 超时单独归类，其余归为网络错误
fn request_error(error: reqwest::Error, context: &str) -> SearchError {
    if error.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::NetworkError(format!("{}: {}", context, error))
    }
}
