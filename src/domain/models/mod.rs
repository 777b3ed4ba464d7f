// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了单次爬取中流转的数据结构，包括：
/// - 抓取结果（fetch_outcome）：单个页面的抓取成功或失败
/// - 排名条目（ranked_entry）：脚本名及其出现次数
/// - 爬取报告（crawl_report）：最终排名和统计信息
pub mod crawl_report;
pub mod fetch_outcome;
pub mod ranked_entry;
