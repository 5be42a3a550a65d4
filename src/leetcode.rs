// src/leetcode.rs
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::http::{send_text, FetchError};

const GRAPHQL_URL: &str = "https://leetcode.com/graphql";
const CONTEST_BASE: &str = "https://leetcode.com/contest/";

const ALL_CONTESTS_QUERY: &str = r#"
query {
    allContests {
        title
        startTime
        duration
        titleSlug
    }
}
"#;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub title: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub start_time: i64, // epoch seconds
    #[serde(default, deserialize_with = "zero_if_null")]
    pub duration: i64, // seconds
    pub title_slug: String,
}

/// Missing or null numbers read as 0, so one odd entry is filtered out instead of failing the batch.
fn zero_if_null<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(d)?.unwrap_or_default())
}

impl Contest {
    pub fn url(&self) -> String {
        format!("{CONTEST_BASE}{}", self.title_slug)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Data>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Data {
    #[serde(default)]
    all_contests: Vec<Contest>,
}

pub async fn collect(client: &Client) -> Result<Vec<Contest>, FetchError> {
    let req = client
        .post(GRAPHQL_URL)
        .json(&json!({ "query": ALL_CONTESTS_QUERY }));
    let body = send_text(req).await?;
    parse(&body, chrono::Utc::now().timestamp())
}

/// Keeps contests starting strictly after `now` (epoch seconds).
pub fn parse(body: &str, now: i64) -> Result<Vec<Contest>, FetchError> {
    let env: Envelope = serde_json::from_str(body)?;
    let contests = env
        .data
        .map(|d| d.all_contests)
        .unwrap_or_default()
        .into_iter()
        .filter(|c| c.start_time > now)
        .collect();
    Ok(contests)
}
