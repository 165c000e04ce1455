//! 通話履歴取得の Outbound ポート

use crate::domain::CallRecord;
use common::error::Error;

/// ルーターから現在の通話履歴を取得する
///
/// - 戻り値: フィードの順序のままの履歴（番号は正規化済み）
/// - Err は致命的（再認証 1 回で通らない・ボディが解析できない・result が SUCCESS でない）
pub trait HistorySource: Send + Sync {
    fn fetch(&self) -> Result<Vec<CallRecord>, Error>;
}
