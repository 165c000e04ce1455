//! 人間向けログ（LogRecord → stderr に要点のみ出力）
//!
//! fields の全量は出さず、値が長いものは切り詰める（巨大化防止）。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};

const FIELD_SUMMARY_MAX: usize = 200;

fn field_summary(value: &serde_json::Value) -> String {
    let s = match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if s.chars().count() <= FIELD_SUMMARY_MAX {
        return s;
    }
    let truncated = s.chars().take(FIELD_SUMMARY_MAX).collect::<String>();
    format!("{}... (len={})", truncated, s.len())
}

/// 1 行に整形する（`[level] message key=value ...`）
pub fn format_line(record: &LogRecord) -> String {
    let mut line = format!("[{}] {}", record.level.as_str(), record.message);
    if let Some(fields) = &record.fields {
        for (key, value) in fields {
            line.push_str(&format!(" {}={}", key, field_summary(value)));
        }
    }
    line
}

/// stderr に出力する Log 実装
///
/// verbose でなければ warn / error のみ出す。
pub struct HumanLog {
    verbose: bool,
}

impl HumanLog {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn should_emit(&self, level: LogLevel) -> bool {
        self.verbose || matches!(level, LogLevel::Warn | LogLevel::Error)
    }
}

impl Log for HumanLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if self.should_emit(record.level) {
            eprintln!("{}", format_line(record));
        }
        Ok(())
    }
}

/// 登録された Log に順に書き出すコンポジット
///
/// 1 つが失敗しても残りには書き出し、最初のエラーを返す。
pub struct CompositeLog {
    logs: Vec<std::sync::Arc<dyn Log>>,
}

impl CompositeLog {
    pub fn new(logs: Vec<std::sync::Arc<dyn Log>>) -> Self {
        Self { logs }
    }
}

impl Log for CompositeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for l in &self.logs {
            if let Err(e) = l.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct CollectLog(Mutex<Vec<String>>);

    impl Log for CollectLog {
        fn log(&self, record: &LogRecord) -> Result<(), Error> {
            self.0.lock().unwrap().push(record.message.clone());
            Ok(())
        }
    }

    struct FailingLog;

    impl Log for FailingLog {
        fn log(&self, _record: &LogRecord) -> Result<(), Error> {
            Err(Error::io_msg("disk full"))
        }
    }

    #[test]
    fn test_format_line_with_fields() {
        let rec = LogRecord::new(LogLevel::Warn, "lookup failed")
            .field("source", "telnavi")
            .field("status", 503);
        assert_eq!(format_line(&rec), "[warn] lookup failed source=telnavi status=503");
    }

    #[test]
    fn test_format_line_truncates_long_field() {
        let rec = LogRecord::new(LogLevel::Error, "parse").field("body", "x".repeat(500));
        let line = format_line(&rec);
        assert!(line.contains("(len=500)"));
        assert!(line.len() < 300);
    }

    #[test]
    fn test_human_log_level_filter() {
        assert!(!HumanLog::new(false).should_emit(LogLevel::Info));
        assert!(HumanLog::new(false).should_emit(LogLevel::Warn));
        assert!(HumanLog::new(true).should_emit(LogLevel::Debug));
    }

    #[test]
    fn test_composite_writes_all_and_reports_first_error() {
        let collect = Arc::new(CollectLog(Mutex::new(Vec::new())));
        let composite = CompositeLog::new(vec![
            Arc::new(FailingLog),
            collect.clone() as Arc<dyn Log>,
        ]);
        let result = composite.log(&LogRecord::new(LogLevel::Info, "hello"));
        assert!(result.is_err());
        assert_eq!(collect.0.lock().unwrap().as_slice(), ["hello".to_string()]);
    }
}
