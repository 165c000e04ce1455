//! callwatch 固有のドメイン型（型と不変条件）

pub mod call_record;
pub mod command;
pub mod fingerprint;
pub mod identification;
pub mod notification;
pub mod phone_number;

pub use call_record::{CallRecord, Direction};
pub use command::{CallwatchCommand, RunMode};
pub use fingerprint::Fingerprint;
pub use identification::{CallerMatch, Identification, SearchReference};
pub use notification::{ChannelKind, Notification};
pub use phone_number::PhoneNumber;
