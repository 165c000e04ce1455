//! Google Custom Search による最終手段の検索
//!
//! 名前は特定できないため、ヒット件数を名前代わりにし、上位のページを参考として通知に添える。

use crate::adapter::config::WebSearchSettings;
use crate::domain::{CallerMatch, PhoneNumber, SearchReference};
use crate::ports::outbound::CallerLookup;
use anyhow::{bail, Context};
use common::ports::outbound::{HttpClient, HttpRequest};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

pub const WEB_SEARCH_LABEL: &str = "Google検索";
const ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
/// 通知に添える上位件数
const MAX_REFERENCES: usize = 3;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    search_information: Option<SearchInformation>,
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchInformation {
    #[serde(default)]
    formatted_total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
    link: String,
}

/// API 応答から一致を作る。ヒットが無ければ None。
pub fn parse_results(body: &str) -> anyhow::Result<Option<CallerMatch>> {
    let response: SearchResponse =
        serde_json::from_str(body).context("custom search response")?;
    if response.items.is_empty() {
        return Ok(None);
    }
    let count = response
        .search_information
        .and_then(|i| i.formatted_total_results)
        .unwrap_or_else(|| response.items.len().to_string());
    let references = response
        .items
        .into_iter()
        .take(MAX_REFERENCES)
        .map(|item| SearchReference {
            title: item.title,
            url: item.link,
        })
        .collect();
    Ok(Some(CallerMatch {
        name: format!("検索結果 約{}件", count),
        references,
    }))
}

pub struct WebSearchLookup {
    http: Arc<dyn HttpClient>,
    settings: WebSearchSettings,
}

impl WebSearchLookup {
    pub fn new(http: Arc<dyn HttpClient>, settings: WebSearchSettings) -> Self {
        Self { http, settings }
    }

    /// 番号を完全一致（ダブルクォート）で検索する URL
    pub fn query_url(&self, number: &PhoneNumber) -> anyhow::Result<Url> {
        let query = format!("\"{}\"", number);
        Ok(Url::parse_with_params(
            ENDPOINT,
            &[
                ("key", self.settings.key.as_str()),
                ("cx", self.settings.cx.as_str()),
                ("lr", "lang_ja"),
                ("q", query.as_str()),
            ],
        )?)
    }
}

impl CallerLookup for WebSearchLookup {
    fn label(&self) -> &str {
        WEB_SEARCH_LABEL
    }

    fn lookup(&self, number: &PhoneNumber) -> anyhow::Result<Option<CallerMatch>> {
        let url = self.query_url(number)?;
        let response = self
            .http
            .send(&HttpRequest::get(url.as_str()))
            .context("custom search request")?;
        if !response.is_success() {
            bail!("custom search returned {}", response.status);
        }
        parse_results(&response.text())
    }
}
