// src/nowcoder.rs
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

use crate::http::{get_html, FetchError};

const INDEX_URL: &str = "https://ac.nowcoder.com/acm/contest/vip-index";
const SITE_BASE: &str = "https://ac.nowcoder.com";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

static SEL_CURRENT: Lazy<Selector> = Lazy::new(|| selector("div.platform-mod.js-current"));
static SEL_ITEM: Lazy<Selector> = Lazy::new(|| selector("div.platform-item.js-item"));
static SEL_LINK: Lazy<Selector> = Lazy::new(|| selector("div.platform-item-main h4 a"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

#[derive(Debug, Clone)]
pub struct Contest {
    pub name: String,
    pub participants: Option<u64>,
    pub start_time: Option<String>, // YYYY-MM-DD HH:MM
    pub end_time: Option<String>,
    pub link: Option<String>,
}

/// Payload of the `data-json` attribute on each contest card.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardData {
    #[serde(default)]
    contest_name: Option<String>,
    #[serde(default)]
    sign_up_count: Option<u64>,
    #[serde(default)]
    contest_start_time: Option<i64>, // epoch millis
    #[serde(default)]
    contest_end_time: Option<i64>,
}

pub async fn collect(client: &Client) -> Result<Vec<Contest>, FetchError> {
    let html = get_html(client, INDEX_URL).await?;
    parse(&html)
}

pub fn parse(html: &str) -> Result<Vec<Contest>, FetchError> {
    let doc = Html::parse_document(html);
    let current = doc
        .select(&SEL_CURRENT)
        .next()
        .ok_or(FetchError::Markup("div.platform-mod.js-current not found"))?;

    let base = Url::parse(SITE_BASE).ok();
    let mut out = Vec::new();
    for item in current.select(&SEL_ITEM) {
        let Some(raw) = item.value().attr("data-json") else { continue };
        let data: CardData = match serde_json::from_str(&unescape_quotes(raw)) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "skipping nowcoder card with unreadable data-json");
                continue;
            }
        };
        let Some(name) = data.contest_name.filter(|n| !n.trim().is_empty()) else { continue };

        let link = item
            .select(&SEL_LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .zip(base.as_ref())
            .and_then(|(href, base)| base.join(href.trim()).ok())
            .map(|u| u.to_string());

        out.push(Contest {
            name: name.trim().to_string(),
            participants: data.sign_up_count,
            start_time: data.contest_start_time.and_then(format_millis),
            end_time: data.contest_end_time.and_then(format_millis),
            link,
        });
    }
    Ok(out)
}

/// The attribute is sometimes double-escaped, leaving literal `&quot;` after decoding.
fn unescape_quotes(raw: &str) -> String {
    raw.replace("&quot;", "\"")
}

fn format_millis(ms: i64) -> Option<String> {
    if ms <= 0 {
        return None;
    }
    let dt = DateTime::from_timestamp_millis(ms)?;
    Some(dt.with_timezone(&Local).format(TIME_FORMAT).to_string())
}
