// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::fetch_outcome::{FetchErrorKind, FetchOutcome};
use async_trait::async_trait;
use std::error::Error as _;
use std::io;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// URL 无效
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// 非成功状态码
    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),
}

impl EngineError {
    /// 归类为抓取失败原因
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            EngineError::RequestFailed(e) => {
                if e.is_timeout() {
                    FetchErrorKind::Timeout
                } else if e.is_builder() {
                    FetchErrorKind::InvalidUrl
                } else if let Some(status) = e.status() {
                    FetchErrorKind::Status(status.as_u16())
                } else if e.is_connect() || e.is_request() {
                    FetchErrorKind::Connect
                } else if (e.is_body() || e.is_decode()) && is_interrupted_transfer(e) {
                    FetchErrorKind::Connect
                } else if e.is_body() || e.is_decode() {
                    FetchErrorKind::Body
                } else {
                    FetchErrorKind::Other
                }
            }
            EngineError::InvalidUrl(_) => FetchErrorKind::InvalidUrl,
            EngineError::Status(status) => FetchErrorKind::Status(status.as_u16()),
        }
    }

    /// 判断错误是否可重试
    ///
    /// 超时、连接失败（包括读取响应体时连接中断）和 5xx 可重试；URL 错误和 4xx 不重试
    pub fn is_retryable(&self) -> bool {
        self.kind().is_transient()
    }
}

/// 响应体读取是否因连接被重置或提前关闭而中断
///
/// 沿错误链查找底层的 I/O 错误
fn is_interrupted_transfer(error: &reqwest::Error) -> bool {
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io_error) = cause.downcast_ref::<io::Error>() {
            return matches!(
                io_error.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            );
        }
        source = cause.source();
    }
    false
}

/// 页面抓取器特质
///
/// 实现方不得让错误越过该边界，所有失败都以 `FetchOutcome::Failure` 返回
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 抓取页面 HTML
    async fn fetch(&self, url: &str) -> FetchOutcome;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
