// src/codeforces.rs
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;

use crate::http::{send_text, FetchError};

const API_URL: &str = "https://codeforces.com/api/contest.list";
const CONTEST_BASE: &str = "https://codeforces.com/contests/";
const PHASE_UPCOMING: &str = "BEFORE";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String, // CF / IOI / ICPC
    pub phase: String,
    #[serde(default)]
    pub start_time_seconds: Option<i64>,
    #[serde(default)]
    pub duration_seconds: i64,
}

impl Contest {
    pub fn url(&self) -> String {
        format!("{CONTEST_BASE}{}", self.id)
    }

    pub fn start(&self) -> i64 {
        self.start_time_seconds.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    result: Vec<Contest>,
}

pub async fn collect(client: &Client) -> Result<Vec<Contest>, FetchError> {
    let body = send_text(client.get(API_URL).header(ACCEPT, "application/json")).await?;
    parse(&body, chrono::Utc::now().timestamp())
}

/// Upcoming contests (phase `BEFORE`, start after `now`) sorted by start time.
pub fn parse(body: &str, now: i64) -> Result<Vec<Contest>, FetchError> {
    let env: Envelope = serde_json::from_str(body)?;
    if env.status != "OK" {
        return Err(FetchError::Api(
            env.comment.unwrap_or_else(|| format!("status {}", env.status)),
        ));
    }

    let mut upcoming: Vec<Contest> = env
        .result
        .into_iter()
        .filter(|c| c.phase == PHASE_UPCOMING)
        .filter(|c| c.start_time_seconds.is_some_and(|t| t > now))
        .collect();
    upcoming.sort_by_key(Contest::start);
    Ok(upcoming)
}
