// src/page.rs
use anyhow::{Context, Result};
use askama::Template;
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

use crate::contest::{Board, Platform};
use crate::{atcoder, codeforces, leetcode, nowcoder};

pub const PAGE_TITLE: &str = "OIpage-即将到来的比赛";
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const MISSING: &str = "N/A";

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage<'a> {
    title: &'a str,
    last_update: &'a str,
    current_time: String,
    leetcode: Vec<LeetcodeRow>,
    codeforces: Vec<CodeforcesRow>,
    atcoder: Vec<AtcoderRow>,
    nowcoder: Vec<NowcoderRow>,
}

struct LeetcodeRow {
    name: String,
    link: String,
    start: String,
    hours: String,
}

struct CodeforcesRow {
    name: String,
    link: String,
    kind: String,
    start: String,
    hours: String,
}

struct AtcoderRow {
    name: String,
    link: String,
    start: String,
}

struct NowcoderRow {
    name: String,
    link: String,
    start: String,
    end: String,
    participants: String,
}

impl From<&leetcode::Contest> for LeetcodeRow {
    fn from(c: &leetcode::Contest) -> Self {
        Self {
            name: c.title.clone(),
            link: c.url(),
            start: format_epoch(c.start_time),
            hours: hours(c.duration),
        }
    }
}

impl From<&codeforces::Contest> for CodeforcesRow {
    fn from(c: &codeforces::Contest) -> Self {
        Self {
            name: c.name.clone(),
            link: c.url(),
            kind: c.kind.clone(),
            start: format_epoch(c.start()),
            hours: hours(c.duration_seconds),
        }
    }
}

impl From<&atcoder::Contest> for AtcoderRow {
    fn from(c: &atcoder::Contest) -> Self {
        Self {
            name: c.name.clone(),
            link: c.link.clone().unwrap_or_else(|| Platform::AtCoder.home_url().into()),
            start: c.start_time.clone(),
        }
    }
}

impl From<&nowcoder::Contest> for NowcoderRow {
    fn from(c: &nowcoder::Contest) -> Self {
        Self {
            name: c.name.clone(),
            link: c.link.clone().unwrap_or_else(|| Platform::Nowcoder.home_url().into()),
            start: c.start_time.clone().unwrap_or_else(|| MISSING.into()),
            end: c.end_time.clone().unwrap_or_else(|| MISSING.into()),
            participants: c
                .participants
                .map(|n| n.to_string())
                .unwrap_or_else(|| MISSING.into()),
        }
    }
}

/// Seconds to hours, rounded to two decimals, always with at least one decimal digit.
pub fn hours(seconds: i64) -> String {
    let h = (seconds as f64 / 3600.0 * 100.0).round() / 100.0;
    if h.fract() == 0.0 {
        format!("{h:.1}")
    } else {
        format!("{h}")
    }
}

fn format_epoch(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.with_timezone(&Local).format(STAMP_FORMAT).to_string())
        .unwrap_or_else(|| MISSING.into())
}

pub fn render(board: &Board, last_update: &str, now: DateTime<Local>) -> Result<String> {
    let page = IndexPage {
        title: PAGE_TITLE,
        last_update,
        current_time: now.format(STAMP_FORMAT).to_string(),
        leetcode: board.leetcode.iter().map(Into::into).collect(),
        codeforces: board.codeforces.iter().map(Into::into).collect(),
        atcoder: board.atcoder.iter().map(Into::into).collect(),
        nowcoder: board.nowcoder.iter().map(Into::into).collect(),
    };
    page.render().context("rendering contest page")
}

/// Renders the board to `path`, overwriting it. An empty board leaves the file alone.
/// Returns whether the file was written.
pub fn publish(board: &Board, last_update: &str, path: &Path) -> Result<bool> {
    if board.is_empty() {
        return Ok(false);
    }
    let html = render(board, last_update, Local::now())?;
    fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
    Ok(true)
}
