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

use anyhow::Context;
use clap::Parser;
use scriptrank::config::settings::{OutputFormat, Settings};
use scriptrank::domain::models::crawl_report::CrawlReport;
use scriptrank::domain::search::provider::SearchProvider;
use scriptrank::domain::services::crawl_orchestrator::{CrawlOptions, CrawlOrchestrator};
use scriptrank::engines::reqwest_engine::ReqwestEngine;
use scriptrank::infrastructure::metrics;
use scriptrank::infrastructure::search::{GoogleSearchProvider, StaticSearchProvider};
use scriptrank::utils::telemetry;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{error, info};

/// 统计搜索结果页中最常引用的脚本文件
#[derive(Parser, Debug)]
#[command(name = "scriptrank", version, about)]
struct Cli {
    /// 直接爬取这些页面，跳过搜索
    #[arg(long = "url", value_name = "URL")]
    urls: Vec<String>,

    /// 搜索词，省略时从标准输入读取
    #[arg(value_name = "TERM")]
    term: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging
    telemetry::init_telemetry(&settings.log);
    info!("Configuration loaded");

    if let Some(addr) = &settings.metrics.exporter_addr {
        metrics::init_metrics(addr)?;
    }

    // 3. Resolve the search term
    let term = if cli.term.is_empty() {
        prompt_term()?
    } else {
        cli.term.join(" ")
    };

    // 4. Build the pipeline
    let provider: Arc<dyn SearchProvider> = if cli.urls.is_empty() {
        Arc::new(GoogleSearchProvider::new(&settings.search)?)
    } else {
        Arc::new(StaticSearchProvider::new(cli.urls))
    };
    let fetcher = Arc::new(ReqwestEngine::from_settings(&settings.crawl)?);
    let orchestrator = CrawlOrchestrator::new(
        provider,
        fetcher,
        CrawlOptions::from_settings(&settings.crawl),
    );

    info!(
        max_concurrency = orchestrator.options().max_concurrency,
        top_k = orchestrator.options().top_k,
        "Starting crawl for '{}'",
        term
    );

    // 5. Crawl and print
    let report = match orchestrator.crawl(&term).await {
        Ok(report) => report,
        Err(e) if e.is_search_failure() => {
            error!("No result pages could be obtained, nothing to rank");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };
    print_report(&report, settings.output.format)?;

    Ok(())
}

/// 从标准输入读取搜索词，直到得到非空的一行
fn prompt_term() -> anyhow::Result<String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "Enter search term : ")?;
        stdout.flush()?;

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read search term")?;
        if read == 0 {
            anyhow::bail!("No search term given");
        }

        let term = line.trim();
        if !term.is_empty() {
            return Ok(term.to_string());
        }
    }
}

fn print_report(report: &CrawlReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
