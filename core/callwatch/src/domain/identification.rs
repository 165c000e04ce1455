//! 発信者特定の結果

/// 名前が分からなかったときの表示
pub const UNKNOWN_CALLER: &str = "不明";

/// ソースが無いときの表示
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Web 検索でヒットしたページ（名前の代わりに通知へ添える）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReference {
    pub title: String,
    pub url: String,
}

/// 1 つの検索ソースが返した一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerMatch {
    pub name: String,
    pub references: Vec<SearchReference>,
}

impl CallerMatch {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            references: Vec::new(),
        }
    }
}

/// パイプライン全体の結果。`name` が None なら不明な発信者。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identification {
    pub name: Option<String>,
    pub source: Option<String>,
    pub references: Vec<SearchReference>,
}

impl Identification {
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn resolved(source: impl Into<String>, found: CallerMatch) -> Self {
        Self {
            name: Some(found.name),
            source: Some(source.into()),
            references: found.references,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.name.is_none()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_CALLER)
    }

    pub fn display_source(&self) -> &str {
        self.source.as_deref().unwrap_or(UNKNOWN_SOURCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_rendering() {
        let id = Identification::unknown();
        assert!(id.is_unknown());
        assert_eq!(id.display_name(), "不明");
        assert_eq!(id.display_source(), "unknown");
    }

    #[test]
    fn test_resolved_carries_source() {
        let id = Identification::resolved("電話帳", CallerMatch::named("山田太郎"));
        assert!(!id.is_unknown());
        assert_eq!(id.display_name(), "山田太郎");
        assert_eq!(id.display_source(), "電話帳");
        assert!(id.references.is_empty());
    }
}
