// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 爬取编排（crawl_orchestrator）：有界并发的抓取、截止时间和汇合
/// - 频次统计（frequency_aggregator）：并发安全的脚本名计数表
/// - 名称归一化（name_normalizer）：从脚本引用中取出文件名
/// - 脚本提取（script_extractor）：从 HTML 中按文档顺序提取脚本引用
/// - 排名（top_k_ranker）：按次数降序、名称升序取前 K 项
pub mod crawl_orchestrator;
pub mod frequency_aggregator;
pub mod name_normalizer;
pub mod script_extractor;
pub mod top_k_ranker;
