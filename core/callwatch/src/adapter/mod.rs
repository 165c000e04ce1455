//! アダプター（callwatch の Outbound ポートの実装と設定の読み込み）

pub mod config;
pub mod directory;
pub mod discord;
pub mod json_ledger;
pub mod lookup;
pub mod router_history;

pub use config::{Settings, SettingsOverrides};
pub use directory::TsvDirectory;
pub use discord::{ConsoleNotifier, DiscordBotNotifier};
pub use json_ledger::JsonFileLedger;
pub use router_history::RouterHistorySource;
