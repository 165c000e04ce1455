//! Outbound ポート: アプリが外界を使うための trait

pub mod caller_lookup;
pub mod dedup_ledger;
pub mod history_source;
pub mod notifier;

pub use caller_lookup::CallerLookup;
pub use dedup_ledger::DedupLedger;
pub use history_source::HistorySource;
pub use notifier::Notifier;
