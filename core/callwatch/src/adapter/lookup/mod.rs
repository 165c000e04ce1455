//! 発信者検索ソース（CallerLookup の実装群）
//!
//! 優先順位は `default_lookups` の並びで決まる。外部サイトのソースは HTML 構造に強く依存するため、
//! 抽出ロジックは `extract_*` 関数として切り出し、取得とは別にテストする。

pub mod builtin;
pub mod html;
pub mod jpnumber;
pub mod meiwakucheck;
pub mod telnavi;
pub mod web_search;

pub use builtin::{AnonymousLookup, ExtensionLookup};
pub use jpnumber::JpNumberLookup;
pub use meiwakucheck::MeiwakuCheckLookup;
pub use telnavi::TelNaviLookup;
pub use web_search::WebSearchLookup;

use crate::adapter::config::WebSearchSettings;
use crate::adapter::directory::TsvDirectory;
use crate::ports::outbound::CallerLookup;
use common::ports::outbound::HttpClient;
use std::sync::Arc;

/// 既定の検索順: 内線 → 非通知 → 電話帳 → telnavi → jpnumber → meiwakucheck（→ Web 検索）
pub fn default_lookups(
    http: Arc<dyn HttpClient>,
    directory: Arc<TsvDirectory>,
    web_search: Option<WebSearchSettings>,
) -> Vec<Arc<dyn CallerLookup>> {
    let mut lookups: Vec<Arc<dyn CallerLookup>> = vec![
        Arc::new(ExtensionLookup),
        Arc::new(AnonymousLookup),
        directory,
        Arc::new(TelNaviLookup::new(Arc::clone(&http))),
        Arc::new(JpNumberLookup::new(Arc::clone(&http))),
        Arc::new(MeiwakuCheckLookup::new(Arc::clone(&http))),
    ];
    if let Some(settings) = web_search {
        lookups.push(Arc::new(WebSearchLookup::new(http, settings)));
    }
    lookups
}
