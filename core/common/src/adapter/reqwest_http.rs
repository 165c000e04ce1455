//! reqwest (blocking) による HttpClient 実装

use crate::error::Error;
use crate::ports::outbound::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use std::time::Duration;

/// 既定のタイムアウト
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 番号検索サイトはブラウザ以外を弾くことがあるため UA を偽装する
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/109.0";

/// reqwest::blocking::Client を共有して使う HttpClient 実装
pub struct ReqwestHttpClient {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpClient {
    /// タイムアウトと User-Agent を指定してクライアントを作る
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::system(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some((user, password)) = &request.basic_auth {
            builder = builder.basic_auth(user, Some(password));
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .map_err(|e| Error::http(format!("{} {}: {}", method_name(request.method), request.url, e)))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response
            .bytes()
            .map_err(|e| Error::http(format!("Failed to read response from {}: {}", request.url, e)))?;

        Ok(HttpResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

fn method_name(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        assert!(ReqwestHttpClient::new(DEFAULT_TIMEOUT, BROWSER_USER_AGENT).is_ok());
    }

    #[test]
    fn test_connection_error_is_http_error() {
        // .invalid は名前解決できないことが保証されたドメイン
        let client = ReqwestHttpClient::new(Duration::from_millis(500), BROWSER_USER_AGENT).unwrap();
        let err = client
            .send(&HttpRequest::get("http://router.invalid/hist_cal_data.txt"))
            .unwrap_err();
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("GET http://router.invalid"));
    }
}
