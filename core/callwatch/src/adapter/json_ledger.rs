//! 通知済み台帳（check.json）
//!
//! 指紋文字列の JSON 配列として保存する。追加のたびに全体を書き直す（一時ファイル + rename）。

use crate::domain::Fingerprint;
use crate::ports::outbound::DedupLedger;
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct LedgerState {
    /// 書き出し順（読み込み順 + 追加順）
    order: Vec<String>,
    index: HashSet<String>,
}

impl LedgerState {
    fn from_list(list: Vec<String>) -> Self {
        let mut state = Self::default();
        for fp in list {
            state.push(fp);
        }
        state
    }

    /// 新規なら true
    fn push(&mut self, fp: String) -> bool {
        if self.index.insert(fp.clone()) {
            self.order.push(fp);
            true
        } else {
            false
        }
    }
}

/// JSON ファイルに永続化する DedupLedger 実装
pub struct JsonFileLedger {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    log: Arc<dyn Log>,
    state: Mutex<LedgerState>,
}

impl JsonFileLedger {
    /// 台帳を読み込む。ファイルが無ければ空、文字列配列でなければ Error::Parse。
    pub fn load(
        fs: Arc<dyn FileSystem>,
        path: impl AsRef<Path>,
        log: Arc<dyn Log>,
    ) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let state = if fs.exists(&path) {
            let contents = fs.read_to_string(&path)?;
            let list: Vec<String> = serde_json::from_str(&contents).map_err(|e| {
                Error::parse(format!(
                    "ledger '{}' is not a JSON string array: {}",
                    path.display(),
                    e
                ))
            })?;
            LedgerState::from_list(list)
        } else {
            LedgerState::default()
        };
        let _ = log.log(
            &LogRecord::new(LogLevel::Info, "ledger loaded")
                .layer("adapter")
                .kind("ledger")
                .field("path", path.display().to_string())
                .field("entries", state.order.len()),
        );
        Ok(Self {
            fs,
            path,
            log,
            state: Mutex::new(state),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, LedgerState>, Error> {
        self.state
            .lock()
            .map_err(|_| Error::system("ledger lock poisoned"))
    }

    fn persist(&self, order: &[String]) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        let json = serde_json::to_string(order)?;
        self.fs.write_atomic(&self.path, &json)
    }
}

impl DedupLedger for JsonFileLedger {
    fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.state
            .lock()
            .map(|s| s.index.contains(fingerprint.as_str()))
            .unwrap_or(false)
    }

    fn insert(&self, fingerprint: Fingerprint) -> Result<(), Error> {
        let mut state = self.lock()?;
        if state.index.contains(fingerprint.as_str()) {
            return Ok(());
        }
        let mut order = state.order.clone();
        order.push(fingerprint.to_string());
        self.persist(&order)?;
        state.push(fingerprint.to_string());
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "ledger written")
                .layer("adapter")
                .kind("ledger")
                .field("fingerprint", fingerprint.as_str())
                .field("entries", state.order.len()),
        );
        Ok(())
    }

    fn len(&self) -> usize {
        self.state.lock().map(|s| s.order.len()).unwrap_or(0)
    }
}
