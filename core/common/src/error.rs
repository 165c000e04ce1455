//! エラーハンドリング
//!
//! 終了コードは sysexits に揃える（64 usage / 65 dataerr / 74 ioerr / 77 noperm / 78 config）。
//! ルーターが SUCCESS 以外を返した場合だけは「やることがない」扱いで 1 を返す。

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数不正
    #[error("{0}")]
    InvalidArgument(String),
    /// 必須設定の欠落・不正
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Io(String),
    #[error("JSON error: {0}")]
    Json(String),
    /// 通信失敗または非 2xx 応答
    #[error("HTTP error: {0}")]
    Http(String),
    /// 再認証を 1 回試しても 401 のまま
    #[error("Authentication failed: {0}")]
    Unauthorized(String),
    /// 応答ボディが期待する構造でない
    #[error("Unexpected response: {0}")]
    Parse(String),
    /// アプリケーションレベルの result が SUCCESS でない
    #[error("Router reported result '{0}'")]
    NotSuccess(String),
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn not_success(result: impl Into<String>) -> Self {
        Self::NotSuccess(result.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Json(_) | Self::Parse(_) => 65,
            Self::System(_) => 70,
            Self::Io(_) | Self::Http(_) => 74,
            Self::Unauthorized(_) => 77,
            Self::Config(_) => 78,
            Self::NotSuccess(_) => 1,
        }
    }

    /// 使い方の表示が必要なエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// stderr に何も出さずに終了すべきエラーか（SUCCESS 以外は静かに終わる）
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::NotSuccess(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::invalid_argument("x").exit_code(), 64);
        assert_eq!(Error::parse("x").exit_code(), 65);
        assert_eq!(Error::io_msg("x").exit_code(), 74);
        assert_eq!(Error::http("x").exit_code(), 74);
        assert_eq!(Error::unauthorized("x").exit_code(), 77);
        assert_eq!(Error::config("x").exit_code(), 78);
        assert_eq!(Error::not_success("FAILURE").exit_code(), 1);
    }

    #[test]
    fn test_usage_and_silent() {
        assert!(Error::invalid_argument("bad flag").is_usage());
        assert!(!Error::config("x").is_usage());
        assert!(Error::not_success("FAILURE").is_silent());
        assert!(!Error::parse("x").is_silent());
    }

    #[test]
    fn test_display() {
        let err = Error::not_success("ERROR");
        assert_eq!(err.to_string(), "Router reported result 'ERROR'");
        let err = Error::config("ROUTER_USER is not set");
        assert!(err.to_string().contains("ROUTER_USER"));
    }
}
