//! 電話番号検索＠迷惑電話チェック（meiwakucheck.com）
//!
//! 最初のテーブルの先頭行・最初のセルを名前とする。`名前[注記]` の注記は落とし、
//! 「？」は未登録の意味なので見つからない扱い。

use super::html::{element_text, fetch_page, selector};
use crate::domain::{CallerMatch, PhoneNumber};
use crate::ports::outbound::CallerLookup;
use common::ports::outbound::HttpClient;
use regex::Regex;
use scraper::Html;
use std::sync::Arc;

pub const MEIWAKUCHECK_LABEL: &str =
    "電話番号検索＠迷惑電話チェック `https://meiwakucheck.com/`";
const BASE_URL: &str = "https://meiwakucheck.com/search?tel_no=";
const UNREGISTERED: &str = "？";

fn annotation_pattern() -> anyhow::Result<Regex> {
    Ok(Regex::new(r"^(.+)\[.*$")?)
}

/// 検索結果ページから名前を取り出す
pub fn extract_name(html: &str) -> anyhow::Result<Option<String>> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;
    let Some(cell) = document
        .select(&table_sel)
        .next()
        .and_then(|table| table.select(&row_sel).next())
        .and_then(|row| row.select(&cell_sel).next())
    else {
        return Ok(None);
    };
    let text = element_text(&cell);
    let text = text.trim();
    let name = annotation_pattern()?
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
        .trim();
    if name.is_empty() || name == UNREGISTERED {
        return Ok(None);
    }
    Ok(Some(name.to_string()))
}

pub struct MeiwakuCheckLookup {
    http: Arc<dyn HttpClient>,
}

impl MeiwakuCheckLookup {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }
}

impl CallerLookup for MeiwakuCheckLookup {
    fn label(&self) -> &str {
        MEIWAKUCHECK_LABEL
    }

    fn lookup(&self, number: &PhoneNumber) -> anyhow::Result<Option<CallerMatch>> {
        let html = fetch_page(self.http.as_ref(), &format!("{}{}", BASE_URL, number))?;
        Ok(extract_name(&html)?.map(CallerMatch::named))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::mocks::RoutedHttp;
    use common::ports::outbound::HttpResponse;

    fn page(first_cell: &str) -> String {
        format!(
            "<html><body><table><tr><td>{}</td><td>山梨県</td></tr>\
             <tr><td>別の行</td></tr></table></body></html>",
            first_cell
        )
    }

    #[test]
    fn test_extract_plain_name() {
        assert_eq!(
            extract_name(&page(" 甲府市役所 ")).unwrap().as_deref(),
            Some("甲府市役所")
        );
    }

    #[test]
    fn test_extract_strips_annotation() {
        assert_eq!(
            extract_name(&page("山梨中央銀行[代表]")).unwrap().as_deref(),
            Some("山梨中央銀行")
        );
    }

    #[test]
    fn test_extract_unregistered_and_empty() {
        assert_eq!(extract_name(&page("？")).unwrap(), None);
        assert_eq!(extract_name(&page("？[未登録]")).unwrap(), None);
        assert_eq!(extract_name(&page("   ")).unwrap(), None);
        assert_eq!(extract_name("<html><body>該当なし</body></html>").unwrap(), None);
    }

    #[test]
    fn test_extract_only_first_row() {
        let html = "<table><tr><th>見出し</th></tr><tr><td>二行目</td></tr></table>";
        assert_eq!(extract_name(html).unwrap(), None);
    }

    #[test]
    fn test_lookup_uses_query_url() {
        let http = Arc::new(RoutedHttp::new().route(
            "https://meiwakucheck.com/search?tel_no=0551234567",
            HttpResponse::new(200, page("株式会社テスト[営業]")),
        ));
        let hit = MeiwakuCheckLookup::new(http)
            .lookup(&PhoneNumber::new("0551234567"))
            .unwrap();
        assert_eq!(hit, Some(CallerMatch::named("株式会社テスト")));
    }
}
