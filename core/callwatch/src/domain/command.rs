//! CLI から組み立てるコマンド

/// 1 回の実行でやること
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// 新しい履歴を通知し、送信できたものを台帳に記録する
    Notify,
    /// 通知内容を stdout に出すだけ（送信も台帳の更新もしない）
    DryRun,
    /// 通知せずに現在の履歴をすべて台帳に記録する（初回導入時の既存履歴を流さないため）
    Seed,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notify => "notify",
            Self::DryRun => "dry-run",
            Self::Seed => "seed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallwatchCommand {
    Help,
    Run { mode: RunMode },
}
