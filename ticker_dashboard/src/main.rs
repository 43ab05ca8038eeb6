//! Ticker Dashboard — a terminal front-end for the simulated price feed. It restores
//! the session saved in a local JSON store, logs in, applies subscription changes
//! from the command line, then renders a price card per tracked symbol on every tick
//! until Ctrl+C (or `--duration-secs`) and finishes with a chart report.
//!
//! Usage example (CLI):
//! ```bash
//! ticker_dashboard --email trader@example.com --tickers goog,nvda --duration-secs 10
//! ```
//!
//! The ticker file passed with `--path` holds one symbol per line.
//! See `ticker_common::tickers` for the supported symbols.
#![warn(missing_docs)]
mod args;
mod render;

use crate::args::Args;
use crate::render::{print_chart_report, run_render_loop};
use clap::Parser;
use log::{error, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};
use ticker_common::FeedError;
use ticker_common::Result;
use ticker_common::Ticker;
use ticker_common::tickers::TickerParser;
use ticker_feed::{Dashboard, JsonFileStore, PriceFeed};

fn main() -> Result<(), FeedError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down dashboard...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| FeedError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    let store = JsonFileStore::open(normalize_path(&args.store));
    let interval = Duration::from_millis(args.interval_ms.max(1));
    let mut dashboard = Dashboard::with_feed(store, PriceFeed::new(), interval);

    if args.logout {
        dashboard.logout()?;
        info!("Session cleared.");
        return Ok(());
    }

    if let Some(email) = &args.email {
        dashboard.login(email);
    }
    let Some(user) = dashboard.user_email().map(str::to_string) else {
        error!("Not logged in. Pass --email with a valid address to access the dashboard.");
        return Ok(());
    };
    info!("Stock Broker Dashboard for {}", user);

    let mut tickers = args.tickers.clone();
    if let Some(raw_path) = &args.path {
        tickers.extend(read_tickers_file(&normalize_path(raw_path))?);
    }
    for ticker in tickers {
        if !dashboard.subscribe_ticker(ticker)? {
            warn!("Already subscribed to {}", ticker);
        }
    }
    for ticker in &args.unsubscribe {
        dashboard.unsubscribe(*ticker)?;
    }

    let subscribed = dashboard.subscribed()?;
    if subscribed.is_empty() {
        warn!("No stocks subscribed. Supported: {}", supported_symbols());
    } else {
        info!("Tracking: {:?}", subscribed);
    }

    let deadline = (args.duration_secs > 0)
        .then(|| Instant::now() + Duration::from_secs(args.duration_secs));
    if let Some(events) = dashboard.activate()? {
        run_render_loop(&events, &shutdown, deadline);
    }
    dashboard.deactivate();

    print_chart_report(&dashboard, args.range)?;
    Ok(())
}

fn read_tickers_file(path: &PathBuf) -> Result<Vec<Ticker>> {
    if !is_file_exist(path) {
        return Err(FeedError::Format(format!(
            "Tickers file not found: {}",
            path.display()
        )));
    }
    let file = File::open(path)?;
    let tickers = Ticker::parse_from_file(BufReader::new(file))?;
    info!("Tickers from {}: {:?}", path.display(), tickers);
    Ok(tickers)
}

fn supported_symbols() -> String {
    use strum::IntoEnumIterator;

    Ticker::iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &PathBuf) -> bool {
    path.exists() && path.is_file()
}
