//! 通知送信の Outbound ポート

use crate::domain::ChannelKind;
use common::error::Error;

/// 通知を 1 件送る
///
/// 非 2xx 応答も Err で返す。呼び出し側は記録して次の履歴へ進む（再送はしない）。
pub trait Notifier: Send + Sync {
    fn send(&self, channel: ChannelKind, content: &str) -> Result<(), Error>;
}
