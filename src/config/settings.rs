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

use crate::utils::errors::CrawlError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

const DEFAULT_ENVIRONMENT: &str = "development";

/// 应用程序配置设置
///
/// 包含爬取、搜索、输出和指标等所有配置项
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    /// 爬取配置
    #[validate(nested)]
    pub crawl: CrawlSettings,
    /// 搜索配置
    #[validate(nested)]
    pub search: SearchSettings,
    /// 输出配置
    pub output: OutputSettings,
    /// 日志配置
    pub log: LogSettings,
    /// 指标配置
    #[serde(default)]
    pub metrics: MetricsSettings,
}

/// 爬取配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CrawlSettings {
    /// 同时进行的页面抓取上限
    #[validate(range(min = 1))]
    pub max_concurrency: usize,
    /// 单个请求超时时间（毫秒）
    #[validate(range(min = 1))]
    pub per_request_timeout_ms: u64,
    /// 整个爬取过程的截止时间（毫秒）
    #[validate(range(min = 1))]
    pub crawl_deadline_ms: u64,
    /// 输出的排名条目数
    pub top_k: usize,
    /// 暂时性失败的最大重试次数
    #[validate(range(max = 1))]
    pub max_retries: u32,
    /// 重试前的初始退避时间（毫秒）
    pub retry_backoff_ms: u64,
    /// 抓取页面使用的 User-Agent
    pub user_agent: String,
    /// 仅统计以该后缀结尾的脚本名（例如 ".js"），未设置时统计全部
    pub script_extension: Option<String>,
}

/// 搜索配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchSettings {
    /// 搜索页面地址
    #[validate(url)]
    pub base_url: String,
    /// 取用的搜索结果数量
    #[validate(range(min = 1))]
    pub result_limit: usize,
    /// 搜索请求超时时间（毫秒）
    #[validate(range(min = 1))]
    pub timeout_ms: u64,
}

/// 输出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// 输出格式
    pub format: OutputFormat,
}

/// 报告输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// 日志格式
    pub format: LogFormat,
}

/// 日志格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// 指标配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsSettings {
    /// Prometheus 导出地址，未设置时不启动导出器
    pub exporter_addr: Option<String>,
}

impl CrawlSettings {
    pub fn per_request_timeout(&self) -> Duration {
        Duration::from_millis(self.per_request_timeout_ms)
    }

    pub fn crawl_deadline(&self) -> Duration {
        Duration::from_millis(self.crawl_deadline_ms)
    }
}

impl SearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default.toml`、`config/{APP_ENVIRONMENT}.toml`
    /// 和 `SCRIPTRANK__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载并校验的配置
    /// * `Err(CrawlError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, CrawlError> {
        let env =
            std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());
        let mut builder = Self::builder_with_defaults()?;
        for file in Self::config_files(&env) {
            builder = builder.add_source(File::with_name(&file).required(false));
        }
        let config = builder
            .add_source(Environment::with_prefix("SCRIPTRANK").separator("__"))
            .build()?;

        Self::from_config(config)
    }

    /// 按加载顺序返回配置文件名
    ///
    /// 环境名为 `default` 时不重复加载 `config/default`
    pub(crate) fn config_files(env: &str) -> Vec<String> {
        let mut files = vec!["config/default".to_string()];
        if env != "default" {
            files.push(format!("config/{}", env));
        }
        files
    }

    /// 从已构建的配置中反序列化并校验
    pub fn from_config(config: Config) -> Result<Self, CrawlError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 带默认值的配置构建器
    pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            // Crawl defaults
            .set_default("crawl.max_concurrency", 8)?
            .set_default("crawl.per_request_timeout_ms", 10_000)?
            .set_default("crawl.crawl_deadline_ms", 60_000)?
            .set_default("crawl.top_k", 5)?
            .set_default("crawl.max_retries", 1)?
            .set_default("crawl.retry_backoff_ms", 250)?
            .set_default("crawl.user_agent", "Mozilla/5.0 (compatible; scriptrank/0.1)")?
            // Search defaults
            .set_default("search.base_url", "https://www.google.com/search")?
            .set_default("search.result_limit", 10)?
            .set_default("search.timeout_ms", 15_000)?
            // Output defaults
            .set_default("output.format", "text")?
            .set_default("log.format", "pretty")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
