//! 通知済み台帳の Outbound ポート

use crate::domain::{CallRecord, Fingerprint};
use common::error::Error;

/// 通知済みイベントの指紋を保持する台帳
///
/// 一度記録した指紋は消さない（二度と通知しない）。
pub trait DedupLedger: Send + Sync {
    fn contains(&self, fingerprint: &Fingerprint) -> bool;

    /// 指紋を追加して永続化する
    fn insert(&self, fingerprint: Fingerprint) -> Result<(), Error>;

    /// 記録済みの指紋の数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 検索や通知より前に呼ぶ
    fn is_checked(&self, record: &CallRecord) -> bool {
        self.contains(&Fingerprint::of(record))
    }

    /// 通知の送信に成功してから呼ぶ
    fn mark_checked(&self, record: &CallRecord) -> Result<(), Error> {
        self.insert(Fingerprint::of(record))
    }
}
