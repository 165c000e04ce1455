//! 外部に問い合わせない検索ソース（内線・非通知）

use crate::domain::{CallerMatch, PhoneNumber};
use crate::ports::outbound::CallerLookup;

pub const EXTENSION_LABEL: &str = "内線";
pub const ANONYMOUS_LABEL: &str = "非通知着信";

/// ルーターが非通知着信に付ける番号表記
const ANONYMOUS_NUMBERS: &[&str] = &["anonymous", "Anonymous", "非通知"];

/// `@` を含む番号は内線として即座に確定する
#[derive(Debug, Clone, Default)]
pub struct ExtensionLookup;

impl CallerLookup for ExtensionLookup {
    fn label(&self) -> &str {
        EXTENSION_LABEL
    }

    fn lookup(&self, number: &PhoneNumber) -> anyhow::Result<Option<CallerMatch>> {
        Ok(number
            .is_extension()
            .then(|| CallerMatch::named(EXTENSION_LABEL)))
    }
}

/// 非通知着信
#[derive(Debug, Clone, Default)]
pub struct AnonymousLookup;

impl CallerLookup for AnonymousLookup {
    fn label(&self) -> &str {
        ANONYMOUS_LABEL
    }

    fn lookup(&self, number: &PhoneNumber) -> anyhow::Result<Option<CallerMatch>> {
        Ok(ANONYMOUS_NUMBERS
            .contains(&number.as_str())
            .then(|| CallerMatch::named(ANONYMOUS_LABEL)))
    }
}
