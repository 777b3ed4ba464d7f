// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 是否为 http/https 链接
pub fn is_http_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// 展开搜索结果页中的跳转链接
///
/// 形如 `/url?q=https://target/&sa=U` 的链接返回 `q` 参数中的目标地址，
/// 其余链接原样返回。
pub fn unwrap_redirect(url: Url) -> Url {
    if url.path() != "/url" {
        return url;
    }

    url.query_pairs()
        .find(|(key, _)| key == "q" || key == "url")
        .and_then(|(_, target)| Url::parse(&target).ok())
        .unwrap_or(url)
}
