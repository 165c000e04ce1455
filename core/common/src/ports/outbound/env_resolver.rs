//! 環境変数解決 Outbound ポート
//!
//! 設定の読み込みはこの trait 経由でのみ環境変数にアクセスする。

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用の `MapEnvResolver`。
pub trait EnvResolver: Send + Sync {
    /// 設定されていれば空文字でもそのまま返す。未設定なら None。
    fn raw_var(&self, key: &str) -> Option<String>;

    /// 変数の値を返す。未設定または空文字なら None。
    fn var(&self, key: &str) -> Option<String> {
        self.raw_var(key).filter(|s| !s.is_empty())
    }
}
