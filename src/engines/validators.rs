// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::EngineError;
use url::Url;

/// 校验待抓取的 URL
///
/// 只接受带主机名的 http/https 地址
pub fn validate_url(url_str: &str) -> Result<Url, EngineError> {
    let url = Url::parse(url_str.trim())
        .map_err(|e| EngineError::InvalidUrl(format!("{}: {}", url_str, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(EngineError::InvalidUrl(format!(
            "unsupported scheme '{}' in {}",
            url.scheme(),
            url_str
        )));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(EngineError::InvalidUrl(format!("missing host in {}", url_str)));
    }

    Ok(url)
}
