// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

pub const PAGES_FETCHED: &str = "pages_fetched_total";
pub const PAGES_FAILED: &str = "pages_failed_total";
pub const PAGES_ABANDONED: &str = "pages_abandoned_total";
pub const SCRIPTS_RECORDED: &str = "scripts_recorded_total";
pub const CRAWL_DURATION: &str = "crawl_duration_seconds";

/// 初始化指标系统
///
/// 在指定地址启动 Prometheus 导出器并注册爬取指标
pub fn init_metrics(addr: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = addr.parse()?;
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

/// 注册指标说明
pub fn describe_metrics() {
    describe_counter!(PAGES_FETCHED, "Total number of result pages fetched successfully");
    describe_counter!(PAGES_FAILED, "Total number of result pages that failed to fetch");
    describe_counter!(
        PAGES_ABANDONED,
        "Total number of result pages abandoned at the crawl deadline"
    );
    describe_counter!(SCRIPTS_RECORDED, "Total number of script references recorded");
    describe_histogram!(CRAWL_DURATION, "Duration of a whole crawl in seconds");
}
