//! Command-line arguments for the Ticker Dashboard.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use ticker_common::Ticker;
use ticker_common::defaults::{DEFAULT_STORE_FILE, TICK_INTERVAL_MS};
use ticker_feed::TimeRange;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Email to log in with. Without it the email saved in the session store is used.
    #[clap(long)]
    pub email: Option<String>,

    /// Tickers to subscribe to, comma separated or repeated.
    #[clap(long, value_enum, value_delimiter = ',')]
    pub tickers: Vec<Ticker>,

    /// Tickers to unsubscribe from, comma separated or repeated.
    #[clap(long, value_enum, value_delimiter = ',')]
    pub unsubscribe: Vec<Ticker>,

    /// Path to a text file with tickers to subscribe to, one per line.
    #[clap(long)]
    pub path: Option<String>,

    /// JSON file the session (email and subscriptions) is kept in.
    #[clap(long, default_value = DEFAULT_STORE_FILE)]
    pub store: String,

    /// Milliseconds between two price ticks.
    #[clap(long, default_value_t = TICK_INTERVAL_MS)]
    pub interval_ms: u64,

    /// Seconds to run before printing the chart report; 0 runs until Ctrl+C.
    #[clap(long, default_value_t = 0)]
    pub duration_secs: u64,

    /// Chart window used by the final report.
    #[clap(long, value_enum, default_value_t = TimeRange::Day)]
    pub range: TimeRange,

    /// Clear the saved session and exit.
    #[clap(long)]
    pub logout: bool,
}
