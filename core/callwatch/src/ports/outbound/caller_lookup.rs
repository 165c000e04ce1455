//! 発信者検索の Outbound ポート
//!
//! 電話帳・内線判定・番号検索サイトはすべてこの trait を実装し、
//! パイプラインが優先順に呼び出す。

use crate::domain::{CallerMatch, PhoneNumber};

/// 番号から名前を引く検索ソース
///
/// - `Ok(Some(_))`: 見つかった
/// - `Ok(None)`: 見つからなかった
/// - `Err(_)`: 通信失敗・ページ構造の不一致など。パイプラインは警告を出して「見つからない」として扱う
pub trait CallerLookup: Send + Sync {
    /// 通知に表示するソース名
    fn label(&self) -> &str;

    fn lookup(&self, number: &PhoneNumber) -> anyhow::Result<Option<CallerMatch>>;
}
