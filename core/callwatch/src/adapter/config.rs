//! 環境変数から実行設定を読み込む（adapter 層）

use crate::domain::phone_number::DEFAULT_AREA_CODE;
use common::domain::DataDir;
use common::error::Error;
use common::ports::outbound::EnvResolver;
use std::path::PathBuf;

pub const DEFAULT_HISTORY_URL: &str = "http://192.168.0.1/dashboard/hist_cal_data.txt";
pub const DEFAULT_DATA_DIR: &str = "/data";

/// ルーターの接続情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterSettings {
    pub history_url: String,
    pub user: String,
    pub password: String,
}

/// Discord Bot の接続情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordSettings {
    pub bot_token: String,
    /// 発信など着信以外を流すチャンネル
    pub general_channel: String,
    /// 着信だけを流すチャンネル
    pub incoming_channel: String,
}

/// Google Custom Search の接続情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSearchSettings {
    pub key: String,
    pub cx: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub router: RouterSettings,
    /// 送信しないモード（--dry-run / --seed）では None
    pub discord: Option<DiscordSettings>,
    pub data_dir: DataDir,
    pub area_code: String,
    pub log_file: PathBuf,
    /// 明示的に有効化したときだけ Some
    pub web_search: Option<WebSearchSettings>,
}

/// CLI 側から上書きする値
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub data_dir: Option<PathBuf>,
    /// Discord の設定を必須にするか（通常の通知モードのみ true）
    pub require_discord: bool,
}

fn required(env: &dyn EnvResolver, key: &str) -> Result<String, Error> {
    env.var(key)
        .ok_or_else(|| Error::config(format!("{} is not set", key)))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Settings {
    pub fn from_env(env: &dyn EnvResolver, overrides: SettingsOverrides) -> Result<Self, Error> {
        let router = RouterSettings {
            history_url: env
                .var("ROUTER_HISTORY_URL")
                .unwrap_or_else(|| DEFAULT_HISTORY_URL.to_string()),
            user: required(env, "ROUTER_USER")?,
            // 空文字も有効なパスワード
            password: env
                .raw_var("ROUTER_PASSWORD")
                .ok_or_else(|| Error::config("ROUTER_PASSWORD is not set"))?,
        };

        let discord = if overrides.require_discord {
            Some(DiscordSettings {
                bot_token: required(env, "DISCORD_BOT_TOKEN")?,
                general_channel: required(env, "DISCORD_CHANNEL_ID")?,
                incoming_channel: required(env, "DISCORD_CHANNEL_ID_ONLY_INCOMING")?,
            })
        } else {
            None
        };

        let data_dir = DataDir::new(
            overrides
                .data_dir
                .or_else(|| env.var("CALLWATCH_DATA_DIR").map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        );

        let area_code = env
            .var("CALLWATCH_AREA_CODE")
            .unwrap_or_else(|| DEFAULT_AREA_CODE.to_string());
        if !area_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::config(format!(
                "CALLWATCH_AREA_CODE must be digits only, got '{}'",
                area_code
            )));
        }

        let log_file = env
            .var("CALLWATCH_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.log_file());

        let web_search = match env.var("CALLWATCH_WEB_SEARCH") {
            Some(v) if is_truthy(&v) => Some(WebSearchSettings {
                key: required(env, "GOOGLE_SEARCH_KEY")?,
                cx: required(env, "GOOGLE_SEARCH_CX")?,
            }),
            _ => None,
        };

        Ok(Self {
            router,
            discord,
            data_dir,
            area_code,
            log_file,
            web_search,
        })
    }
}
