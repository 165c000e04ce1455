//! ドメイン型（Newtype）
//!
//! PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

use std::path::{Path, PathBuf};

/// データディレクトリ（phones.tsv / check.json / ログの置き場所）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir(PathBuf);

impl DataDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// 電話帳ファイル
    pub fn phones_file(&self) -> PathBuf {
        self.0.join("phones.tsv")
    }

    /// 通知済み指紋の台帳
    pub fn ledger_file(&self) -> PathBuf {
        self.0.join("check.json")
    }

    /// 構造化ログの既定の出力先
    pub fn log_file(&self) -> PathBuf {
        self.0.join("callwatch.log.jsonl")
    }
}

impl std::ops::Deref for DataDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DataDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<PathBuf> for DataDir {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}
