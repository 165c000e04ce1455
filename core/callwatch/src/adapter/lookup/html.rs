//! 検索ソース共通の HTML 取得・抽出ヘルパ

use anyhow::{anyhow, bail, Context, Result};
use common::ports::outbound::{HttpClient, HttpRequest};
use scraper::{ElementRef, Html, Selector};

/// GET してボディを文字列で返す。非 2xx は Err。
pub fn fetch_page(http: &dyn HttpClient, url: &str) -> Result<String> {
    let response = http
        .send(&HttpRequest::get(url))
        .with_context(|| format!("GET {}", url))?;
    if !response.is_success() {
        bail!("GET {} returned {}", url, response.status);
    }
    Ok(response.text())
}

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector '{}': {:?}", css, e))
}

/// 要素内のテキストをすべて連結する
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// セレクタに最初に一致した要素のテキスト。無ければ None。
pub fn first_text(document: &Html, css: &str) -> Result<Option<String>> {
    let sel = selector(css)?;
    Ok(document.select(&sel).next().map(|e| element_text(&e)))
}

/// `<title>` のテキスト（前後の空白は除く）。無ければ None。
pub fn title_text(document: &Html) -> Result<Option<String>> {
    Ok(first_text(document, "title")?.map(|t| t.trim().to_string()))
}
