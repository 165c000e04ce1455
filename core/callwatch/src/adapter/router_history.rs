//! ルーターのダッシュボードから通話履歴を取得するアダプタ
//!
//! 応答は `{"result": "SUCCESS", "success": {"HISTORY": [...]}}` 形式の JSON。
//! 401 のときだけ同じ資格情報で 1 回だけ取り直す。

use crate::adapter::config::RouterSettings;
use crate::domain::{CallRecord, Direction, PhoneNumber};
use crate::ports::outbound::HistorySource;
use common::error::Error;
use common::ports::outbound::{HttpClient, HttpRequest, HttpResponse, Log, LogLevel, LogRecord};
use serde::Deserialize;
use std::sync::Arc;

const SUCCESS: &str = "SUCCESS";
const UNAUTHORIZED: u16 = 401;

#[derive(Debug, Deserialize)]
struct RawHistoryResponse {
    result: String,
    #[serde(default)]
    success: Option<RawHistoryBody>,
}

#[derive(Debug, Deserialize)]
struct RawHistoryBody {
    #[serde(rename = "HISTORY")]
    history: Vec<RawCall>,
}

#[derive(Debug, Deserialize)]
struct RawCall {
    #[serde(rename = "DIR", deserialize_with = "scalar_string")]
    dir: String,
    #[serde(rename = "NUMBER", deserialize_with = "scalar_string")]
    number: String,
    #[serde(rename = "STATUS", deserialize_with = "scalar_string")]
    status: String,
    #[serde(rename = "STARTTIME", deserialize_with = "scalar_string")]
    start_time: String,
    #[serde(rename = "ENDTIME", default, deserialize_with = "optional_scalar_string")]
    end_time: Option<String>,
    #[serde(rename = "CONNTIME", default, deserialize_with = "optional_scalar_string")]
    conn_time: Option<String>,
}

impl RawCall {
    fn into_record(self, area_code: &str) -> CallRecord {
        CallRecord {
            direction: Direction::from_wire(&self.dir),
            number: PhoneNumber::normalized(&self.number, area_code),
            status: self.status,
            start_time: self.start_time,
            end_time: self.end_time,
            duration: self.conn_time,
        }
    }
}

/// 文字列・数値のどちらで来ても文字列として受け取る
fn scalar_to_string(value: serde_json::Value) -> Result<String, String> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("expected string or number, got {}", other)),
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    scalar_to_string(value).map_err(serde::de::Error::custom)
}

fn optional_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        value => scalar_to_string(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// 応答ボディを履歴に変換する
///
/// 構造が違えば Error::Parse（生ボディ付き）、result が SUCCESS でなければ Error::NotSuccess。
pub fn parse_history(body: &str, area_code: &str) -> Result<Vec<CallRecord>, Error> {
    let raw: RawHistoryResponse = serde_json::from_str(body)
        .map_err(|e| Error::parse(format!("history response: {}\n{}", e, body)))?;
    if raw.result != SUCCESS {
        return Err(Error::not_success(raw.result));
    }
    let history = raw
        .success
        .ok_or_else(|| Error::parse(format!("history response has no 'success' object\n{}", body)))?
        .history;
    Ok(history
        .into_iter()
        .map(|c| c.into_record(area_code))
        .collect())
}

/// Basic 認証付き GET で履歴を取るアダプタ
pub struct RouterHistorySource {
    http: Arc<dyn HttpClient>,
    settings: RouterSettings,
    area_code: String,
    log: Arc<dyn Log>,
}

impl RouterHistorySource {
    pub fn new(
        http: Arc<dyn HttpClient>,
        settings: RouterSettings,
        area_code: impl Into<String>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            http,
            settings,
            area_code: area_code.into(),
            log,
        }
    }

    fn request(&self) -> HttpRequest {
        HttpRequest::get(&self.settings.history_url)
            .basic_auth(&self.settings.user, &self.settings.password)
    }

    /// 401 なら 1 回だけ取り直す。2 回目も 401 なら Error::Unauthorized。
    fn get_with_reauth(&self) -> Result<(HttpResponse, u32), Error> {
        let request = self.request();
        let mut response = self.http.send(&request)?;
        let mut attempts = 1;
        if response.status == UNAUTHORIZED {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Warn, "router returned 401, retrying once")
                    .layer("adapter")
                    .kind("history"),
            );
            response = self.http.send(&request)?;
            attempts += 1;
        }
        if response.status == UNAUTHORIZED {
            return Err(Error::unauthorized(format!(
                "{} rejected credentials after {} attempts",
                self.settings.history_url, attempts
            )));
        }
        Ok((response, attempts))
    }
}

impl HistorySource for RouterHistorySource {
    fn fetch(&self) -> Result<Vec<CallRecord>, Error> {
        let (response, attempts) = self.get_with_reauth()?;
        let body = response.text();
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "history fetched")
                .layer("adapter")
                .kind("history")
                .field("status", response.status)
                .field("attempts", attempts)
                .field("bytes", response.body.len()),
        );
        if !response.is_success() {
            return Err(Error::http(format!(
                "{} returned {}\n{}",
                self.settings.history_url, response.status, body
            )));
        }
        parse_history(&body, &self.area_code).map_err(|e| {
            if let Error::Parse(_) = e {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Error, "history response could not be parsed")
                        .layer("adapter")
                        .kind("history")
                        .field("body", body.as_str()),
                );
            }
            e
        })
    }
}
