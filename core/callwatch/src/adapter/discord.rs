//! 通知の送信先（Discord Bot API と標準出力）

use crate::adapter::config::DiscordSettings;
use crate::domain::ChannelKind;
use crate::ports::outbound::Notifier;
use common::error::Error;
use common::ports::outbound::{HttpClient, HttpRequest, Log, LogLevel, LogRecord};
use std::io::Write;
use std::sync::{Arc, Mutex};

const API_BASE: &str = "https://discord.com/api";

fn bot_user_agent() -> String {
    format!("DiscordBot (callwatch, {})", env!("CARGO_PKG_VERSION"))
}

/// Bot トークンでチャンネルにメッセージを投稿する Notifier
pub struct DiscordBotNotifier {
    http: Arc<dyn HttpClient>,
    settings: DiscordSettings,
    log: Arc<dyn Log>,
}

impl DiscordBotNotifier {
    pub fn new(http: Arc<dyn HttpClient>, settings: DiscordSettings, log: Arc<dyn Log>) -> Self {
        Self {
            http,
            settings,
            log,
        }
    }

    fn channel_id(&self, channel: ChannelKind) -> &str {
        match channel {
            ChannelKind::Incoming => &self.settings.incoming_channel,
            ChannelKind::General => &self.settings.general_channel,
        }
    }

    pub fn request(&self, channel: ChannelKind, content: &str) -> HttpRequest {
        let url = format!("{}/channels/{}/messages", API_BASE, self.channel_id(channel));
        HttpRequest::post_json(url, &serde_json::json!({ "content": content }))
            .header("Authorization", format!("Bot {}", self.settings.bot_token))
            .header("User-Agent", bot_user_agent())
    }
}

impl Notifier for DiscordBotNotifier {
    fn send(&self, channel: ChannelKind, content: &str) -> Result<(), Error> {
        let response = self.http.send(&self.request(channel, content))?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "notification posted")
                .layer("adapter")
                .kind("notify")
                .field("channel", channel.as_str())
                .field("status", response.status),
        );
        if !response.is_success() {
            return Err(Error::http(format!(
                "discord returned {} for {} channel: {}",
                response.status,
                channel.as_str(),
                response.text()
            )));
        }
        Ok(())
    }
}

/// メッセージを Writer に書き出す Notifier
///
/// - `stdout()`: 書き出すだけ（--dry-run / --seed）。送信先チャンネル名を見出しに付ける
/// - `echoing(inner)`: 本文を書き出してから inner に送る（通常モード）。
///   書き出しの失敗は warn を出すだけで、結果は inner の送信結果で決まる
pub struct ConsoleNotifier {
    out: Mutex<Box<dyn Write + Send>>,
    inner: Option<Arc<dyn Notifier>>,
    log: Arc<dyn Log>,
}

impl ConsoleNotifier {
    pub fn stdout(log: Arc<dyn Log>) -> Self {
        Self::with_writer(Box::new(std::io::stdout()), None, log)
    }

    pub fn echoing(inner: Arc<dyn Notifier>, log: Arc<dyn Log>) -> Self {
        Self::with_writer(Box::new(std::io::stdout()), Some(inner), log)
    }

    pub fn with_writer(
        out: Box<dyn Write + Send>,
        inner: Option<Arc<dyn Notifier>>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            out: Mutex::new(out),
            inner,
            log,
        }
    }

    fn write(&self, channel: ChannelKind, content: &str) -> Result<(), Error> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| Error::system("console writer lock poisoned"))?;
        if self.inner.is_none() {
            writeln!(out, "--- {} ---", channel.as_str())?;
        }
        writeln!(out, "{}", content)?;
        out.flush()?;
        Ok(())
    }
}

impl Notifier for ConsoleNotifier {
    fn send(&self, channel: ChannelKind, content: &str) -> Result<(), Error> {
        let Some(inner) = &self.inner else {
            return self.write(channel, content);
        };
        if let Err(e) = self.write(channel, content) {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Warn, "failed to echo notification to stdout")
                    .layer("adapter")
                    .kind("notify")
                    .field("channel", channel.as_str())
                    .field("error", e.to_string()),
            );
        }
        inner.send(channel, content)
    }
}
