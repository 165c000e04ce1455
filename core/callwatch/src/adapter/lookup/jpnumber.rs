//! 電話番号検索（jpnumber.com）
//!
//! 1. 検索ページで件数表示（`span.number-text15`）が 1 以上のときだけ結果リンクを辿る
//! 2. 詳細ページの `<title>` 中の「{名前}」を取る

use super::html::{fetch_page, first_text, selector, title_text};
use crate::domain::{CallerMatch, PhoneNumber};
use crate::ports::outbound::CallerLookup;
use anyhow::Context;
use common::ports::outbound::HttpClient;
use regex::Regex;
use scraper::Html;
use std::sync::Arc;
use url::Url;

pub const JPNUMBER_LABEL: &str = "電話番号検索 `jpnumber.com`";
const BASE_URL: &str = "https://www.jpnumber.com/";

fn bracket_pattern() -> anyhow::Result<Regex> {
    Ok(Regex::new(r"「(.+)」")?)
}

/// 件数表示の数字部分。数字が無ければ None。
fn parse_count(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// 検索ページから詳細ページの URL を取り出す。件数 0・表示なし・リンクなしは None。
pub fn extract_detail_url(html: &str) -> anyhow::Result<Option<Url>> {
    let document = Html::parse_document(html);
    let count = first_text(&document, "span.number-text15")?
        .as_deref()
        .and_then(parse_count)
        .unwrap_or(0);
    if count == 0 {
        return Ok(None);
    }
    let link = selector(".title-text12 > .result")?;
    let Some(href) = document
        .select(&link)
        .next()
        .and_then(|e| e.value().attr("href"))
    else {
        return Ok(None);
    };
    let base = Url::parse(BASE_URL)?;
    let url = base
        .join(href.trim())
        .with_context(|| format!("invalid result link '{}'", href))?;
    Ok(Some(url))
}

/// 詳細ページの title から「」内の名前を取り出す（title のどこにあってもよい）
pub fn extract_name(html: &str) -> anyhow::Result<Option<String>> {
    let document = Html::parse_document(html);
    let Some(title) = title_text(&document)? else {
        return Ok(None);
    };
    Ok(bracket_pattern()?
        .captures(&title)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string()))
}

pub struct JpNumberLookup {
    http: Arc<dyn HttpClient>,
}

impl JpNumberLookup {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }
}

impl CallerLookup for JpNumberLookup {
    fn label(&self) -> &str {
        JPNUMBER_LABEL
    }

    fn lookup(&self, number: &PhoneNumber) -> anyhow::Result<Option<CallerMatch>> {
        let search_url = format!("{}searchnumber.do?number={}", BASE_URL, number);
        let search_html = fetch_page(self.http.as_ref(), &search_url)?;
        let Some(detail_url) = extract_detail_url(&search_html)? else {
            return Ok(None);
        };
        let detail_html = fetch_page(self.http.as_ref(), detail_url.as_str())?;
        Ok(extract_name(&detail_html)?.map(CallerMatch::named))
    }
}
