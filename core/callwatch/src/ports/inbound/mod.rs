//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::domain::RunMode;
use crate::usecase::RunSummary;
use common::error::Error;

/// 1 回分のバッチ処理を実行する Inbound ポート
///
/// main はこの trait を実装した型（CallwatchUseCase）の run を呼び出す。
pub trait RunCallwatch: Send + Sync {
    fn run(&self, mode: RunMode) -> Result<RunSummary, Error>;
}
