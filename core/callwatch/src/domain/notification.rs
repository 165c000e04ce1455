//! 通知本文の組み立てと送信先の振り分け

use super::{CallRecord, Direction, Identification};

/// チャット側の 1 メッセージ上限（2000）に余裕を持たせた値
pub const MESSAGE_MAX_CHARS: usize = 1950;

/// 値が無い項目の表示
const NULL_TOKEN: &str = "null";

/// 送信先チャンネルの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// 着信専用
    Incoming,
    /// それ以外すべて
    General,
}

impl ChannelKind {
    pub fn for_direction(direction: &Direction) -> Self {
        match direction {
            Direction::Incoming => Self::Incoming,
            _ => Self::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::General => "general",
        }
    }
}

/// 送信する通知 1 件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub channel: ChannelKind,
    pub content: String,
}

impl Notification {
    /// 本文を組み立て、上限で切り詰め、送信先を決める
    pub fn compose(record: &CallRecord, identification: &Identification) -> Self {
        let content = truncate_chars(&render_message(record, identification), MESSAGE_MAX_CHARS);
        Self {
            channel: ChannelKind::for_direction(&record.direction),
            content,
        }
    }
}

/// 通知本文を組み立てる（切り詰め前）
pub fn render_message(record: &CallRecord, identification: &Identification) -> String {
    let mut lines = vec![
        format!(
            ":telephone:__**[{} ({})] {} {}**__",
            record.direction,
            record.status,
            record.number,
            identification.display_name()
        ),
        format!("**STARTTIME**: {}", record.start_time),
        format!(
            "**ENDTIME**: {}",
            record.end_time.as_deref().unwrap_or(NULL_TOKEN)
        ),
        format!(
            "**CONNTIME**: {}",
            record.duration.as_deref().unwrap_or(NULL_TOKEN)
        ),
        String::new(),
    ];
    if !identification.references.is_empty() {
        for (i, r) in identification.references.iter().enumerate() {
            lines.push(format!("#{} **{}** {}", i + 1, r.title, r.url));
        }
        lines.push(String::new());
    }
    lines.push(format!("**SOURCE**: {}", identification.display_source()));
    lines.join("\n").trim().to_string()
}

/// 文字数（Unicode scalar 単位）で切り詰める
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CallerMatch, PhoneNumber, SearchReference};

    fn record(direction: Direction) -> CallRecord {
        CallRecord {
            direction,
            number: PhoneNumber::new("0551234567"),
            status: "通話".to_string(),
            start_time: "2024/01/02 10:11:12".to_string(),
            end_time: Some("2024/01/02 10:12:00".to_string()),
            duration: Some("00:00:48".to_string()),
        }
    }

    #[test]
    fn test_render_resolved() {
        let id = Identification::resolved("電話帳", CallerMatch::named("山田商店"));
        let msg = render_message(&record(Direction::Incoming), &id);
        assert_eq!(
            msg,
            [
                ":telephone:__**[着信 (通話)] 0551234567 山田商店**__",
                "**STARTTIME**: 2024/01/02 10:11:12",
                "**ENDTIME**: 2024/01/02 10:12:00",
                "**CONNTIME**: 00:00:48",
                "",
                "**SOURCE**: 電話帳",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_render_missing_fields_as_null_and_unknown() {
        let mut r = record(Direction::Outgoing);
        r.end_time = None;
        r.duration = None;
        let msg = render_message(&r, &Identification::unknown());
        assert!(msg.starts_with(":telephone:__**[発信 (通話)] 0551234567 不明**__"));
        assert!(msg.contains("**ENDTIME**: null\n"));
        assert!(msg.contains("**CONNTIME**: null\n"));
        assert!(msg.ends_with("**SOURCE**: unknown"));
    }

    #[test]
    fn test_render_with_references() {
        let id = Identification::resolved(
            "Google検索",
            CallerMatch {
                name: "検索結果 約 12 件".to_string(),
                references: vec![
                    SearchReference {
                        title: "A社".to_string(),
                        url: "https://a.example".to_string(),
                    },
                    SearchReference {
                        title: "B社".to_string(),
                        url: "https://b.example".to_string(),
                    },
                ],
            },
        );
        let msg = render_message(&record(Direction::Incoming), &id);
        assert!(msg.contains("\n#1 **A社** https://a.example\n#2 **B社** https://b.example\n\n**SOURCE**: Google検索"));
    }

    #[test]
    fn test_truncate_to_exact_length() {
        let long = "あ".repeat(3000);
        let t = truncate_chars(&long, MESSAGE_MAX_CHARS);
        assert_eq!(t.chars().count(), 1950);
        assert_eq!(truncate_chars("short", MESSAGE_MAX_CHARS), "short");
        assert_eq!(truncate_chars(&"x".repeat(1950), 1950).len(), 1950);
    }

    #[test]
    fn test_compose_truncates_long_message() {
        let id = Identification::resolved("電話帳", CallerMatch::named("名".repeat(2500)));
        let n = Notification::compose(&record(Direction::Incoming), &id);
        assert_eq!(n.content.chars().count(), MESSAGE_MAX_CHARS);
    }

    #[test]
    fn test_channel_routing() {
        assert_eq!(ChannelKind::for_direction(&Direction::Incoming), ChannelKind::Incoming);
        assert_eq!(ChannelKind::for_direction(&Direction::Outgoing), ChannelKind::General);
        assert_eq!(
            ChannelKind::for_direction(&Direction::Other("不在着信".to_string())),
            ChannelKind::General
        );
        let n = Notification::compose(&record(Direction::Outgoing), &Identification::unknown());
        assert_eq!(n.channel, ChannelKind::General);
    }
}
