// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::fmt;

/// 页面抓取失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// URL 格式错误或协议不受支持
    InvalidUrl,
    /// 请求超时
    Timeout,
    /// 连接建立失败或连接被重置
    Connect,
    /// 非 2xx 状态码
    Status(u16),
    /// 响应体读取或解码失败
    Body,
    /// 其他错误
    Other,
}

impl FetchErrorKind {
    /// 是否为暂时性失败（可重试）
    pub fn is_transient(&self) -> bool {
        match self {
            FetchErrorKind::Timeout | FetchErrorKind::Connect => true,
            FetchErrorKind::Status(code) => (500..600).contains(code),
            _ => false,
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::InvalidUrl => write!(f, "invalid url"),
            FetchErrorKind::Timeout => write!(f, "timeout"),
            FetchErrorKind::Connect => write!(f, "connection error"),
            FetchErrorKind::Status(code) => write!(f, "http status {}", code),
            FetchErrorKind::Body => write!(f, "unreadable body"),
            FetchErrorKind::Other => write!(f, "other error"),
        }
    }
}

/// 单个页面的抓取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 页面 HTML
    Success(String),
    /// 抓取失败
    Failure(FetchErrorKind),
}
