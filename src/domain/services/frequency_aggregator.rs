// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashMap;
use std::collections::HashMap;

/// 脚本名频次统计
///
/// 基于分片锁的 DashMap，同一键的自增在分片锁内完成，不会丢失更新。
/// 表只增不减，生命周期为一次爬取。
#[derive(Debug, Default)]
pub struct FrequencyAggregator {
    counts: DashMap<String, u64>,
}

impl FrequencyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次出现，不存在时以 1 创建
    pub fn record(&self, name: &str) {
        if let Some(mut count) = self.counts.get_mut(name) {
            *count += 1;
            return;
        }
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
    }

    /// 某个脚本名当前的计数
    pub fn count(&self, name: &str) -> u64 {
        self.counts.get(name).map(|count| *count).unwrap_or(0)
    }

    /// 当前表的副本
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// 记录总数
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|entry| *entry.value()).sum()
    }

    /// 不同脚本名的数量
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
