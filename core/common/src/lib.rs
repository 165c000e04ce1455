//! callwatch 共通ライブラリ
//!
//! エラー型と、外界（FS・環境変数・HTTP・ログ）の Outbound ポートおよび標準アダプタを提供します。

/// エラーハンドリング
pub mod error;

/// Ports & Adapters のポート定義
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// ドメイン型（Newtype）
pub mod domain;
