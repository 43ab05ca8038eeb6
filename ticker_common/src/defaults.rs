//! Shared constants: tick timing, buffer sizes and persisted storage keys.

/// Interval between two simulated ticks, in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 1000;
/// Maximum number of points kept in a symbol's price history.
pub const HISTORY_CAPACITY: usize = 100;
/// Number of trailing prices handed to the sparkline.
pub const SPARKLINE_POINTS: usize = 20;

/// Storage key holding the logged-in email.
pub const USER_EMAIL_KEY: &str = "userEmail";
/// Storage key holding the JSON array of subscribed tickers.
pub const SUBSCRIBED_STOCKS_KEY: &str = "subscribedStocks";
/// File name used by the dashboard when no store path is given.
pub const DEFAULT_STORE_FILE: &str = "ticker_dashboard.json";
