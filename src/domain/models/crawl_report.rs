// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::ranked_entry::RankedEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// 单次爬取的统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// 派发的页面数
    pub dispatched: usize,
    /// 抓取成功的页面数
    pub succeeded: usize,
    /// 抓取失败的页面数
    pub failed: usize,
    /// 截止时间到达时被放弃的页面数
    pub abandoned: usize,
    /// 记录的脚本引用总数
    pub references: u64,
    /// 是否触发了截止时间
    pub deadline_exceeded: bool,
}

/// 爬取报告
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// 搜索词
    pub term: String,
    /// 请求的排名条目数
    pub top_k: usize,
    /// 排名结果
    pub entries: Vec<RankedEntry>,
    pub stats: CrawlStats,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Top {} scripts (name | count):", self.top_k)?;
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(entries: Vec<RankedEntry>) -> CrawlReport {
        CrawlReport {
            term: "rust".to_string(),
            top_k: 5,
            entries,
            stats: CrawlStats::default(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_text_rendering() {
        let rendered = report(vec![
            RankedEntry::new("jquery.min.js", 4),
            RankedEntry::new("app.js", 1),
        ])
        .to_string();

        assert_eq!(
            rendered,
            "Top 5 scripts (name | count):\njquery.min.js | 4\napp.js | 1\n"
        );
    }

    #[test]
    fn test_empty_report_still_renders_header() {
        assert_eq!(report(vec![]).to_string(), "Top 5 scripts (name | count):\n");
    }

    #[test]
    fn test_json_rendering() {
        let json = serde_json::to_value(report(vec![RankedEntry::new("a.js", 2)])).unwrap();
        assert_eq!(json["entries"][0]["name"], "a.js");
        assert_eq!(json["entries"][0]["count"], 2);
        assert_eq!(json["stats"]["deadline_exceeded"], false);
    }
}
