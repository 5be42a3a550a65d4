// src/http.rs
use rand::seq::IndexedRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use thiserror::Error;

/* ================= User-Agent rotation ================= */

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3",
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:54.0) Gecko/20100101 Firefox/54.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_13_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/70.0.3538.77 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/74.0.3729.169 Safari/537.36",
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/74.0.3729.169 Safari/537.36",
];

pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/* ================= errors ================= */

/// Why a fetcher came back without contests.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API reported failure: {0}")]
    Api(String),
    #[error("page layout changed: {0}")]
    Markup(&'static str),
}

/* ================= client ================= */

pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9,zh-CN;q=0.8"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    Client::builder()
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .timeout(timeout)
        .default_headers(headers)
        .build()
}

/// Sends the request with a fresh User-Agent and returns the body of a 2xx response.
pub async fn send_text(req: RequestBuilder) -> Result<String, FetchError> {
    let resp = req.header(USER_AGENT, random_user_agent()).send().await?;
    let status = resp.status();
    tracing::debug!(url = %resp.url(), %status, "response received");
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    Ok(resp.text().await?)
}

pub async fn get_html(client: &Client, url: &str) -> Result<String, FetchError> {
    send_text(
        client
            .get(url)
            .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    )
    .await
}

/* ================= text helpers ================= */

pub fn norm_text(s: &str) -> String {
    s.replace('\u{00A0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
