// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script[src]").expect("static selector is valid"));

/// 脚本引用提取器
///
/// 从静态 HTML 中提取 `<script>` 元素的 `src` 属性值
pub struct ScriptExtractor;

impl ScriptExtractor {
    /// 解析 HTML 文档
    ///
    /// 解析器容忍未闭合标签等畸形标记，不会失败
    pub fn parse(html: &str) -> ParsedPage {
        ParsedPage {
            document: Html::parse_document(html),
        }
    }
}

/// 已解析的页面
pub struct ParsedPage {
    document: Html,
}

impl ParsedPage {
    /// 按文档顺序惰性返回脚本引用，内联脚本被跳过
    pub fn script_sources(&self) -> impl Iterator<Item = &str> + '_ {
        self.document
            .select(&SCRIPT_SELECTOR)
            .filter_map(|element| element.value().attr("src"))
    }
}
