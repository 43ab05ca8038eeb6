//!
//! Common types and utilities shared by the price feed and the dashboard.
//!
//! This crate aggregates:
//! - `error` — unified error type `FeedError` used across the workspace.
//! - `result` — handy `Result<T, FeedError>` alias.
//! - `tickers` — the supported ticker allow-list and parsing helpers.
//! - `price` — the `PricePoint` history entry.
//! - `defaults` — timing constants, buffer sizes and storage keys.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod tickers;
pub mod price;
pub mod defaults;

pub use error::FeedError;
pub use result::Result;
pub use price::PricePoint;
pub use tickers::Ticker;
