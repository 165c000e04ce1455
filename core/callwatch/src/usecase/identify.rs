//! 発信者特定パイプライン
//!
//! 検索ソースを優先順に試し、最初に空でない名前を返したソースで確定する。
//! ソースの失敗は warn を出して「見つからない」として扱い、次のソースへ進む。

use crate::domain::{Identification, PhoneNumber};
use crate::ports::outbound::CallerLookup;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct IdentificationPipeline {
    lookups: Vec<Arc<dyn CallerLookup>>,
    log: Arc<dyn Log>,
}

impl IdentificationPipeline {
    pub fn new(lookups: Vec<Arc<dyn CallerLookup>>, log: Arc<dyn Log>) -> Self {
        Self { lookups, log }
    }

    fn record(&self, level: LogLevel, message: &str, source: &str, number: &PhoneNumber) -> LogRecord {
        LogRecord::new(level, message)
            .layer("usecase")
            .kind("lookup")
            .field("source", source)
            .field("number", number.as_str())
    }

    pub fn identify(&self, number: &PhoneNumber) -> Identification {
        for lookup in &self.lookups {
            let label = lookup.label();
            match lookup.lookup(number) {
                Ok(Some(found)) if !found.name.trim().is_empty() => {
                    let _ = self.log.log(
                        &self
                            .record(LogLevel::Info, "caller identified", label, number)
                            .field("name", found.name.as_str()),
                    );
                    return Identification::resolved(label, found);
                }
                Ok(_) => {
                    let _ = self
                        .log
                        .log(&self.record(LogLevel::Debug, "lookup miss", label, number));
                }
                Err(e) => {
                    let _ = self.log.log(
                        &self
                            .record(LogLevel::Warn, "lookup failed", label, number)
                            .field("error", format!("{:#}", e)),
                    );
                }
            }
        }
        Identification::unknown()
    }
}
