//! 電話番号のドメイン型
//!
//! ルーターは市内通話の番号を市外局番なし（7 桁）で返すため、取得直後に正規化する。
//! 検索・指紋・表示はすべて正規化後の番号で行う。

/// 既定の市外局番
pub const DEFAULT_AREA_CODE: &str = "055";

/// 内線番号の目印（例: `10@192.168.0.1`）
const EXTENSION_MARKER: char = '@';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// 正規化せずにそのまま包む
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// 数字のみ 7 桁なら市外局番を前置する。それ以外はそのまま。
    pub fn normalized(raw: &str, area_code: &str) -> Self {
        if raw.len() == 7 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Self(format!("{}{}", area_code, raw))
        } else {
            Self(raw.to_string())
        }
    }

    /// 内線（`@` を含む）か
    pub fn is_extension(&self) -> bool {
        self.0.contains(EXTENSION_MARKER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for PhoneNumber {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
