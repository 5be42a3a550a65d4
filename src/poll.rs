// src/poll.rs
use chrono::Local;
use reqwest::Client;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::contest::{Board, Platform};
use crate::http::FetchError;
use crate::page::{self, STAMP_FORMAT};
use crate::{atcoder, codeforces, leetcode, nowcoder};

/// Carried from one tick to the next.
#[derive(Clone, Debug)]
pub struct PollState {
    pub last_update: String,
}

impl PollState {
    pub fn starting_now() -> Self {
        Self { last_update: Local::now().format(STAMP_FORMAT).to_string() }
    }
}

#[derive(Clone)]
pub struct Poller {
    client: Client,
    output: PathBuf,
    interval: Duration,
}

impl Poller {
    pub fn new(client: Client, output: PathBuf, interval: Duration) -> Self {
        Self { client, output, interval }
    }

    /// Polls forever; the process is stopped externally.
    pub async fn run(&self, mut state: PollState) {
        tracing::info!(
            output = %self.output.display(),
            interval_secs = self.interval.as_secs(),
            "polling started"
        );
        loop {
            let worker = self.clone();
            let prev = state.clone();
            state = guarded(state, async move { worker.tick(prev).await }).await;
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One render cycle: fetch every platform in turn, then publish if anything came back.
    pub async fn tick(&self, state: PollState) -> PollState {
        let board = self.fetch_all().await;
        for p in Platform::ALL {
            tracing::info!(platform = %p, count = board.count(p), "upcoming contests");
        }
        apply(state, &board, &self.output)
    }

    async fn fetch_all(&self) -> Board {
        let c = &self.client;
        Board {
            leetcode: settle(Platform::LeetCode, leetcode::collect(c).await),
            codeforces: settle(Platform::Codeforces, codeforces::collect(c).await),
            atcoder: settle(Platform::AtCoder, atcoder::collect(c).await),
            nowcoder: settle(Platform::Nowcoder, nowcoder::collect(c).await),
        }
    }
}

/// Degrades a failed fetch to an empty list, logging why.
pub fn settle<T>(platform: Platform, result: Result<Vec<T>, FetchError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(%platform, error = %e, "fetch skipped");
        Vec::new()
    })
}

/// Runs one tick on its own task. A panicking tick only loses this cycle:
/// the error is logged and `state` is handed back unchanged.
pub async fn guarded<F>(state: PollState, tick: F) -> PollState
where
    F: Future<Output = PollState> + Send + 'static,
{
    match tokio::spawn(tick).await {
        Ok(next) => next,
        Err(e) => {
            tracing::error!(error = %e, "tick aborted");
            state
        }
    }
}

/// Writes the page for `board`, stamped with the previous update time, and returns the
/// next state. `last_update` only moves forward when the file was actually written.
pub fn apply(state: PollState, board: &Board, output: &Path) -> PollState {
    let stamp = Local::now().format(STAMP_FORMAT).to_string();
    match page::publish(board, &state.last_update, output) {
        Ok(true) => {
            tracing::info!(path = %output.display(), %board, "page updated");
            PollState { last_update: stamp }
        }
        Ok(false) => {
            tracing::warn!("no contests from any platform, keeping {}", output.display());
            state
        }
        Err(e) => {
            tracing::error!(error = ?e, "page not written");
            state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn board_with_one() -> Board {
        Board {
            codeforces: vec![codeforces::Contest {
                id: 1,
                name: "Educational Round 183".into(),
                kind: "ICPC".into(),
                phase: "BEFORE".into(),
                start_time_seconds: Some(1_761_500_000),
                duration_seconds: 7200,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn settle_degrades_errors_to_empty() {
        let failed: Result<Vec<u8>, FetchError> = Err(FetchError::Markup("gone"));
        assert!(settle(Platform::AtCoder, failed).is_empty());
        assert_eq!(settle(Platform::AtCoder, Ok(vec![1u8, 2])), vec![1, 2]);
    }

    #[test]
    fn settle_degrades_parse_failures() {
        let bad = "not json at all";
        assert!(settle(Platform::LeetCode, leetcode::parse(bad, 0)).is_empty());
        assert!(settle(Platform::Codeforces, codeforces::parse(bad, 0)).is_empty());
        assert!(settle(Platform::AtCoder, atcoder::parse(bad)).is_empty());
        assert!(settle(Platform::Nowcoder, nowcoder::parse(bad)).is_empty());
    }

    #[test]
    fn empty_board_keeps_state_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("index.html");
        fs::write(&out, "old").unwrap();

        let before = PollState { last_update: "2026-10-19 07:00:00".into() };
        let after = apply(before, &Board::default(), &out);
        assert_eq!(after.last_update, "2026-10-19 07:00:00");
        assert_eq!(fs::read_to_string(&out).unwrap(), "old");
    }

    #[test]
    fn successful_write_advances_last_update() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("index.html");

        let before = PollState { last_update: "2000-01-01 00:00:00".into() };
        let after = apply(before, &board_with_one(), &out);
        assert_ne!(after.last_update, "2000-01-01 00:00:00");

        let html = fs::read_to_string(&out).unwrap();
        assert!(html.contains("上次更新时间: 2000-01-01 00:00:00"));
        assert!(html.contains("Educational Round 183"));
    }

    #[test]
    fn next_page_shows_previous_write_time() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("index.html");

        let first = apply(PollState { last_update: "2000-01-01 00:00:00".into() }, &board_with_one(), &out);
        let second = apply(first.clone(), &board_with_one(), &out);

        let html = fs::read_to_string(&out).unwrap();
        assert!(html.contains(&format!("上次更新时间: {}", first.last_update)));
        assert!(!html.contains("2000-01-01 00:00:00"));
        assert!(second.last_update >= first.last_update);
    }

    fn exploding_tick() -> PollState {
        panic!("tick blew up")
    }

    #[tokio::test]
    async fn panicking_tick_keeps_previous_state() {
        let before = PollState { last_update: "2026-10-19 07:00:00".into() };
        let after = guarded(before, async { exploding_tick() }).await;
        assert_eq!(after.last_update, "2026-10-19 07:00:00");
    }

    #[tokio::test]
    async fn finished_tick_hands_back_its_state() {
        let before = PollState { last_update: "2026-10-19 07:00:00".into() };
        let next = PollState { last_update: "2026-10-19 07:01:00".into() };
        let after = guarded(before, async move { next }).await;
        assert_eq!(after.last_update, "2026-10-19 07:01:00");
    }

    #[test]
    fn failed_write_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("no-such-dir").join("index.html");

        let before = PollState { last_update: "2026-10-19 07:00:00".into() };
        let after = apply(before, &board_with_one(), &out);
        assert_eq!(after.last_update, "2026-10-19 07:00:00");
        assert!(!out.exists());
    }
}
