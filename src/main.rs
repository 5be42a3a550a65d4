// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Builder;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::{self, time::OffsetTime},
};

mod atcoder;
mod codeforces;
mod contest;
mod http;
mod leetcode;
mod nowcoder;
mod page;
mod poll;

use poll::{PollState, Poller};

/// Polls LeetCode, Codeforces, AtCoder and Nowcoder for upcoming contests
/// and keeps a static HTML page of them up to date.
#[derive(Debug, Parser)]
#[command(name = "contest_board")]
struct Cli {
    /// Seconds to sleep between render cycles
    #[arg(long, default_value_t = 60)]
    interval: u64,

    /// Page to (over)write
    #[arg(long, default_value = "index.html")]
    output: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    // must run before the runtime starts; the local offset is unavailable once threads exist
    let timer = OffsetTime::local_rfc_3339().context("couldn't determine local UTC offset")?;
    let format = fmt::format()
        .with_level(true)
        .with_target(true)
        .with_ansi(false)
        .with_timer(timer);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(format)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let client = http::build_client(Duration::from_secs(cli.timeout))
        .context("building HTTP client")?;
    let poller = Poller::new(client, cli.output, Duration::from_secs(cli.interval));

    let runtime = Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(async {
        let state = PollState::starting_now();
        if cli.once {
            let state = poller.tick(state).await;
            tracing::info!(last_update = %state.last_update, "single cycle done");
        } else {
            poller.run(state).await;
        }
    });
    Ok(())
}
