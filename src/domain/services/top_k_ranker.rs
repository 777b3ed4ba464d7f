// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::ranked_entry::RankedEntry;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Top-K 排名器
///
/// 按计数降序排列；计数相同时按脚本名字节序升序，保证多次运行结果一致
pub struct TopKRanker;

impl TopKRanker {
    /// 返回最多 `k` 个条目
    pub fn rank(table: &HashMap<String, u64>, k: usize) -> Vec<RankedEntry> {
        if k == 0 {
            return Vec::new();
        }

        let mut entries: Vec<RankedEntry> = table
            .iter()
            .map(|(name, count)| RankedEntry::new(name.clone(), *count))
            .collect();

        entries.sort_unstable_by(Self::compare);
        entries.truncate(k);
        entries
    }

    fn compare(a: &RankedEntry, b: &RankedEntry) -> Ordering {
        b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name))
    }
}
