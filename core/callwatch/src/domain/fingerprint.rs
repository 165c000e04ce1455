//! 通話イベントの指紋（重複通知防止用）
//!
//! (開始時刻, 番号, 状態, 向き) の 4 項目だけから決まる。終了時刻や通話時間が
//! 後から埋まっても同じイベントとして扱う。

use super::CallRecord;
use sha2::{Digest, Sha256};

/// SHA-256 の 16 進小文字表記
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// 台帳から読み込んだ文字列をそのまま包む
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn of(record: &CallRecord) -> Self {
        let key = format!(
            "{}_{}_{}_{}",
            record.start_time,
            record.number,
            record.status,
            record.direction.as_wire()
        );
        Self(hex::encode(Sha256::digest(key.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, PhoneNumber};

    fn record() -> CallRecord {
        CallRecord {
            direction: Direction::Incoming,
            number: PhoneNumber::new("0551234567"),
            status: "通話".to_string(),
            start_time: "2024/01/02 10:11:12".to_string(),
            end_time: None,
            duration: None,
        }
    }

    #[test]
    fn test_ignores_end_time_and_duration() {
        let a = record();
        let mut b = record();
        b.end_time = Some("2024/01/02 10:15:00".to_string());
        b.duration = Some("00:03:48".to_string());
        assert_eq!(Fingerprint::of(&a), Fingerprint::of(&b));
    }

    #[test]
    fn test_each_key_field_changes_fingerprint() {
        let base = Fingerprint::of(&record());

        let mut r = record();
        r.start_time = "2024/01/02 10:11:13".to_string();
        assert_ne!(Fingerprint::of(&r), base);

        let mut r = record();
        r.number = PhoneNumber::new("0551234568");
        assert_ne!(Fingerprint::of(&r), base);

        let mut r = record();
        r.status = "不在".to_string();
        assert_ne!(Fingerprint::of(&r), base);

        let mut r = record();
        r.direction = Direction::Outgoing;
        assert_ne!(Fingerprint::of(&r), base);
    }

    #[test]
    fn test_is_sha256_hex() {
        let fp = Fingerprint::of(&record());
        assert_eq!(fp.as_str().len(), 64);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_digest_of_known_record() {
        // sha256("2024/01/02 10:11:12_0551234567_通話_着信")
        assert_eq!(
            Fingerprint::of(&record()).as_str(),
            "955d46f13cda829c91bd76bf4e4e9a65c444b1902ccbe27997d6b0d7e83fa313"
        );
    }
}
