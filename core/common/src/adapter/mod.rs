//! アダプター（common の Outbound ポートの標準実装）
//!
//! usecase はポートの trait 経由でのみファイル・環境変数・HTTP・ログに触れる。
//! 実装は標準実装（Std* / Reqwest*）やテスト用のモックを注入する。

pub mod file_json_log;
pub mod human_log;
pub mod reqwest_http;
pub mod std_env_resolver;
pub mod std_fs;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use human_log::{CompositeLog, HumanLog};
pub use reqwest_http::{ReqwestHttpClient, BROWSER_USER_AGENT, DEFAULT_TIMEOUT};
pub use std_env_resolver::{MapEnvResolver, StdEnvResolver};
pub use std_fs::StdFileSystem;

pub use crate::ports::outbound::{FileSystem, HttpClient, Log};
