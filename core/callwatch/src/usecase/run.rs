//! 1 回分のバッチ処理（取得 → 既読判定 → 特定 → 通知 → 台帳更新）

use crate::domain::{CallRecord, Fingerprint, Notification, RunMode};
use crate::ports::inbound::RunCallwatch;
use crate::ports::outbound::{DedupLedger, HistorySource, Notifier};
use crate::usecase::identify::IdentificationPipeline;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::collections::HashSet;
use std::sync::Arc;

/// 実行結果の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 取得した履歴の件数
    pub fetched: usize,
    /// 台帳にあって飛ばした件数
    pub skipped: usize,
    /// 送信（dry-run では表示）した件数
    pub notified: usize,
    /// 送信に失敗した件数（次回に再送対象）
    pub failed: usize,
    /// --seed で通知せず台帳に入れた件数
    pub seeded: usize,
}

// --- usecase が定義を所有し、wiring は組み立てるだけ

pub struct CallwatchDeps {
    pub history: Arc<dyn HistorySource>,
    pub ledger: Arc<dyn DedupLedger>,
    pub pipeline: IdentificationPipeline,
    pub notifier: Arc<dyn Notifier>,
    pub log: Arc<dyn Log>,
}

pub struct CallwatchUseCase {
    deps: CallwatchDeps,
}

enum Outcome {
    Skipped,
    Seeded,
    Notified,
    Failed,
}

impl CallwatchUseCase {
    pub fn new(deps: CallwatchDeps) -> Self {
        Self { deps }
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.log.log(&record.layer("usecase"));
    }

    /// `handled` はこの実行で既に扱った指紋。台帳を更新しない --dry-run でも
    /// 同じイベントの重複を 1 件として扱うために使う。
    fn process(
        &self,
        record: &CallRecord,
        mode: RunMode,
        handled: &mut HashSet<Fingerprint>,
    ) -> Result<Outcome, Error> {
        if self.deps.ledger.is_checked(record) || !handled.insert(Fingerprint::of(record)) {
            return Ok(Outcome::Skipped);
        }
        if mode == RunMode::Seed {
            self.deps.ledger.mark_checked(record)?;
            return Ok(Outcome::Seeded);
        }

        let identification = self.deps.pipeline.identify(&record.number);
        let notification = Notification::compose(record, &identification);
        match self
            .deps
            .notifier
            .send(notification.channel, &notification.content)
        {
            Ok(()) => {
                if mode == RunMode::Notify {
                    self.deps.ledger.mark_checked(record)?;
                }
                Ok(Outcome::Notified)
            }
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Error, "notification failed")
                        .kind("notify")
                        .field("channel", notification.channel.as_str())
                        .field("fingerprint", Fingerprint::of(record).as_str())
                        .field("error", e.to_string()),
                );
                Ok(Outcome::Failed)
            }
        }
    }
}

impl RunCallwatch for CallwatchUseCase {
    fn run(&self, mode: RunMode) -> Result<RunSummary, Error> {
        let records = self.deps.history.fetch()?;
        let mut summary = RunSummary {
            fetched: records.len(),
            ..RunSummary::default()
        };
        let mut handled = HashSet::new();
        for record in &records {
            match self.process(record, mode, &mut handled)? {
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Seeded => summary.seeded += 1,
                Outcome::Notified => summary.notified += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }
        self.log(
            LogRecord::new(LogLevel::Info, "run summary")
                .kind("lifecycle")
                .field("mode", mode.as_str())
                .field("fetched", summary.fetched)
                .field("skipped", summary.skipped)
                .field("notified", summary.notified)
                .field("failed", summary.failed)
                .field("seeded", summary.seeded),
        );
        Ok(summary)
    }
}
