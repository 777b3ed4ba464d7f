// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

/// 本地测试站点
///
/// 同时提供搜索结果页和被爬取的页面。结果链接使用 `localhost`，
/// 搜索地址使用 `127.0.0.1`，这样结果不会被当作搜索站点自身的链接过滤掉
pub struct TestSite {
    pub addr: SocketAddr,
}

impl TestSite {
    pub fn search_url(&self) -> String {
        format!("http://{}/search", self.addr)
    }

    pub fn blocked_search_url(&self) -> String {
        format!("http://{}/blocked", self.addr)
    }

    pub fn page_url(&self, path: &str) -> String {
        format!("http://localhost:{}{}", self.addr.port(), path)
    }
}

fn page(scripts: &[&str]) -> Html<String> {
    let tags: String = scripts
        .iter()
        .map(|src| format!(r#"<script type="text/javascript" src="{}"></script>"#, src))
        .collect();
    Html(format!(
        "<!DOCTYPE html><html><head><title>t</title>{}</head><body><p>content</p></body></html>",
        tags
    ))
}

/// 启动测试站点
///
/// 页面：
/// * `/pages/a` - `a.js`, `b.js`
/// * `/pages/b` - `a.js`
/// * `/pages/broken` - 500
/// * `/pages/slow` - 5 秒后返回 `slow.js`
/// * `/pages/plain` - 没有脚本
pub async fn start_test_site() -> TestSite {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let port = addr.port();

    let app = Router::new()
        .route(
            "/search",
            get(move |Query(params): Query<HashMap<String, String>>| async move {
                let term = params.get("q").cloned().unwrap_or_default();
                let results: String = ["a", "b", "broken"]
                    .iter()
                    .map(|name| {
                        format!(
                            r#"<div class="g"><a href="http://localhost:{}/pages/{}"><h3>{} {}</h3></a></div>"#,
                            port, name, term, name
                        )
                    })
                    .collect();
                Html(format!("<html><body><div id=\"search\">{}</div></body></html>", results))
            }),
        )
        .route(
            "/blocked",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, "unusual traffic").into_response() }),
        )
        .route("/pages/a", get(|| async { page(&["/js/a.js", "/static/b.js"]) }))
        .route("/pages/b", get(|| async { page(&["https://cdn.example.com/x/a.js"]) }))
        .route(
            "/pages/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
        )
        .route(
            "/pages/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                page(&["/slow.js"])
            }),
        )
        .route("/pages/plain", get(|| async { page(&[]) }));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestSite { addr }
}
