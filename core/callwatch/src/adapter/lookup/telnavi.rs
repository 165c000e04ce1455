//! 電話帳ナビ（telnavi.jp）
//!
//! 番号ページの `<title>` が「電話番号{数字}は{名前}」に完全一致したときだけ名前を取る。

use super::html::{fetch_page, title_text};
use crate::domain::{CallerMatch, PhoneNumber};
use crate::ports::outbound::CallerLookup;
use common::ports::outbound::HttpClient;
use regex::Regex;
use scraper::Html;
use std::sync::Arc;

pub const TELNAVI_LABEL: &str = "電話帳ナビ `telnavi.jp`";
const BASE_URL: &str = "https://www.telnavi.jp/phone/";

fn title_pattern() -> anyhow::Result<Regex> {
    Ok(Regex::new(r"^電話番号[0-9]+は(.+)$")?)
}

/// ページ HTML から名前を取り出す
pub fn extract_name(html: &str) -> anyhow::Result<Option<String>> {
    let document = Html::parse_document(html);
    let Some(title) = title_text(&document)? else {
        return Ok(None);
    };
    Ok(title_pattern()?
        .captures(&title)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string()))
}

pub struct TelNaviLookup {
    http: Arc<dyn HttpClient>,
}

impl TelNaviLookup {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }
}

impl CallerLookup for TelNaviLookup {
    fn label(&self) -> &str {
        TELNAVI_LABEL
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

    fn page(title: &str) -> String {
        format!("<html><head><title>{}</title></head><body></body></html>", title)
    }

    #[test]
    fn test_extract_full_match() {
        let name = extract_name(&page("電話番号0551234567は山梨中央銀行")).unwrap();
        assert_eq!(name.as_deref(), Some("山梨中央銀行"));
    }

    #[test]
    fn test_extract_rejects_other_titles() {
        assert_eq!(extract_name(&page("電話帳ナビ - 迷惑電話")).unwrap(), None);
        assert_eq!(extract_name(&page("番号0551234567は山梨")).unwrap(), None);
        assert_eq!(extract_name(&page("電話番号は山梨")).unwrap(), None);
        assert_eq!(extract_name(&page("電話番号0551234567は")).unwrap(), None);
        assert_eq!(extract_name("<html><body>no title</body></html>").unwrap(), None);
    }

    #[test]
    fn test_lookup_fetches_number_page() {
        let http = Arc::new(RoutedHttp::new().route(
            "https://www.telnavi.jp/phone/0551234567",
            HttpResponse::new(200, page("電話番号0551234567は甲府市役所")),
        ));
        let hit = TelNaviLookup::new(http.clone())
            .lookup(&PhoneNumber::new("0551234567"))
            .unwrap();
        assert_eq!(hit, Some(CallerMatch::named("甲府市役所")));
        assert_eq!(http.requested(), vec!["https://www.telnavi.jp/phone/0551234567"]);
    }

    #[test]
    fn test_lookup_http_error_is_err() {
        let http = Arc::new(RoutedHttp::new().route(
            "https://www.telnavi.jp/phone/0551234567",
            HttpResponse::new(503, "busy"),
        ));
        assert!(TelNaviLookup::new(http)
            .lookup(&PhoneNumber::new("0551234567"))
            .is_err());
    }
}
