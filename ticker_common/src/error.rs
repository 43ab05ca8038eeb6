//! Error types shared between the feed library and the dashboard.
//!
//! The `FeedError` enum unifies the few failure cases the workspace has: file I/O
//! for the session store and ticker files, JSON encoding, channel communication and
//! poisoned locks around the shared feed.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the feed and the dashboard.
#[derive(Error, Debug)]
pub enum FeedError {
    /// I/O error originating from the standard library (store file, ticker file).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error while parsing the ticker file into `Ticker` values.
    #[error("Parse tickers file error: {0}")]
    ParseTickersFile(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Channel send failed (e.g., the tick driver already stopped).
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// A poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for FeedError {
    fn from(err: PoisonError<T>) -> Self {
        FeedError::MutexLock(err.to_string())
    }
}
