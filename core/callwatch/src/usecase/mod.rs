//! ユースケース層（ポート経由でのみ外界に触れる）

pub mod identify;
pub mod run;

pub use identify::IdentificationPipeline;
pub use run::{CallwatchDeps, CallwatchUseCase, RunSummary};
