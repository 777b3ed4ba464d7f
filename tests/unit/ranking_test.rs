// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scriptrank::domain::models::ranked_entry::RankedEntry;
use scriptrank::domain::services::frequency_aggregator::FrequencyAggregator;
use scriptrank::domain::services::name_normalizer::NameNormalizer;
use scriptrank::domain::services::script_extractor::ScriptExtractor;
use scriptrank::domain::services::top_k_ranker::TopKRanker;

/// 从页面提取、归一化并统计，和编排器中单页处理的顺序一致
fn count_pages(pages: &[&str]) -> FrequencyAggregator {
    let aggregator = FrequencyAggregator::new();
    for html in pages {
        let page = ScriptExtractor::parse(html);
        for reference in page.script_sources() {
            aggregator.record(NameNormalizer::normalize(reference));
        }
    }
    aggregator
}

#[test]
fn test_pages_to_ranking() {
    let aggregator = count_pages(&[
        r#"<script src="/j/a.js"></script><script src="/j/b.js"></script>"#,
        r#"<script src="/x/a.js"></script>"#,
    ]);

    let ranking = TopKRanker::rank(&aggregator.snapshot(), 2);
    assert_eq!(
        ranking,
        vec![RankedEntry::new("a.js", 2), RankedEntry::new("b.js", 1)]
    );
}

#[test]
fn test_ranking_never_exceeds_k_and_is_sorted() {
    let aggregator = count_pages(&[
        r#"<script src="1.js"></script><script src="2.js"></script><script src="3.js"></script>"#,
        r#"<script src="2.js"></script><script src="3.js"></script>"#,
        r#"<script src="3.js"></script><script src="4.js"></script>"#,
    ]);
    let table = aggregator.snapshot();

    for k in 0..6 {
        let ranking = TopKRanker::rank(&table, k);
        assert!(ranking.len() <= k);
        assert!(ranking.windows(2).all(|pair| pair[0].count >= pair[1].count));
    }
}

#[test]
fn test_tie_break_prefers_smaller_name() {
    let aggregator = count_pages(&[
        r#"<script src="/b/lib.js"></script><script src="/a/app.js"></script>"#,
        r#"<script src="lib.js"></script><script src="app.js"></script>"#,
        r#"<script src="//cdn/lib.js"></script><script src="//cdn/app.js"></script>"#,
    ]);

    let ranking = TopKRanker::rank(&aggregator.snapshot(), 1);
    assert_eq!(ranking, vec![RankedEntry::new("app.js", 3)]);
}

#[test]
fn test_normalize_is_pure() {
    let references = ["/a/b/c.js", "c.js", "", "/", "x/y.js?v=1"];
    for reference in references {
        assert_eq!(
            NameNormalizer::normalize(reference),
            NameNormalizer::normalize(reference)
        );
    }
}
