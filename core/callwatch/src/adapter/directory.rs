//! 電話帳（phones.tsv）
//!
//! 1 列目が名前、2 列目が番号のタブ区切り。起動時に一度だけ読み込み、以後は参照のみ。

use crate::domain::{CallerMatch, PhoneNumber};
use crate::ports::outbound::CallerLookup;
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::collections::HashMap;
use std::path::Path;

pub const DIRECTORY_LABEL: &str = "電話帳";

/// 正規化済み番号 → 名前
#[derive(Debug, Clone, Default)]
pub struct TsvDirectory {
    entries: HashMap<String, String>,
}

impl TsvDirectory {
    /// ファイルから読み込む。無ければ空の電話帳（warn を出す）。
    pub fn load(
        fs: &dyn FileSystem,
        path: &Path,
        area_code: &str,
        log: &dyn Log,
    ) -> Result<Self, Error> {
        if !fs.exists(path) {
            let _ = log.log(
                &LogRecord::new(LogLevel::Warn, "directory file not found, using empty directory")
                    .layer("adapter")
                    .kind("directory")
                    .field("path", path.display().to_string()),
            );
            return Ok(Self::default());
        }
        let contents = fs.read_to_string(path)?;
        let directory = Self::parse(&contents, area_code);
        let _ = log.log(
            &LogRecord::new(LogLevel::Info, "directory loaded")
                .layer("adapter")
                .kind("directory")
                .field("entries", directory.len()),
        );
        Ok(directory)
    }

    /// TSV 本文を解析する。空行・2 列未満の行は読み飛ばし、重複は後勝ち。
    pub fn parse(contents: &str, area_code: &str) -> Self {
        let entries = contents
            .lines()
            .filter_map(|line| {
                let line = line.trim_end_matches('\r');
                let mut columns = line.split('\t');
                let name = columns.next()?.trim();
                let number = columns.next()?.trim();
                if name.is_empty() || number.is_empty() {
                    return None;
                }
                Some((
                    PhoneNumber::normalized(number, area_code).to_string(),
                    name.to_string(),
                ))
            })
            .collect();
        Self { entries }
    }

    /// (名前, 正規化済み番号) の組から作る
    pub fn from_entries<N, P>(entries: impl IntoIterator<Item = (N, P)>) -> Self
    where
        N: Into<String>,
        P: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, number)| (number.into(), name.into()))
                .collect(),
        }
    }

    pub fn get(&self, number: &PhoneNumber) -> Option<&str> {
        self.entries.get(number.as_str()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CallerLookup for TsvDirectory {
    fn label(&self) -> &str {
        DIRECTORY_LABEL
    }

    fn lookup(&self, number: &PhoneNumber) -> anyhow::Result<Option<CallerMatch>> {
        Ok(self.get(number).map(CallerMatch::named))
    }
}
