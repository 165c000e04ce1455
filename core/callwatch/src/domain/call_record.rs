//! 通話履歴 1 件のドメイン型

use super::PhoneNumber;

/// 発着信の向き。ルーターの `DIR` の値をそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// 着信
    Incoming,
    /// 発信
    Outgoing,
    /// 上記以外（ルーターが返した文字列を保持）
    Other(String),
}

impl Direction {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "着信" => Self::Incoming,
            "発信" => Self::Outgoing,
            other => Self::Other(other.to_string()),
        }
    }

    /// ルーター上の表記。指紋の計算と通知本文に使う。
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Incoming => "着信",
            Self::Outgoing => "発信",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// 通話履歴 1 件（取得後は不変）
///
/// `end_time` / `duration` はルーターが返さないことがあり、その場合は None。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub direction: Direction,
    /// 正規化済みの番号
    pub number: PhoneNumber,
    pub status: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_roundtrip_keeps_wire_text() {
        for s in ["着信", "発信", "不在着信"] {
            assert_eq!(Direction::from_wire(s).as_wire(), s);
        }
        assert_eq!(Direction::from_wire("着信"), Direction::Incoming);
        assert_eq!(Direction::from_wire("発信"), Direction::Outgoing);
        assert_eq!(
            Direction::from_wire("incoming"),
            Direction::Other("incoming".to_string())
        );
    }
}
