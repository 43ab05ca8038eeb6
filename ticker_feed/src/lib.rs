//! Simulated stock price feed behind the ticker dashboard.
//!
//! The crate is organised around a single user session:
//! - `model` — `PriceFeed`, per-symbol `PriceState` and the snapshots renderers consume.
//! - `driver` — `TickDriver`, the recurring job that advances the feed once per interval.
//! - `store` — best-effort key-value stores the session is persisted in.
//! - `session` — `Dashboard`, tying login, subscriptions, store and driver together.
//! - `chart` — time-range filtering and labels for the price history chart.
pub mod chart;
pub mod driver;
pub mod model;
pub mod session;
pub mod store;

pub use chart::TimeRange;
pub use driver::{FeedEvent, TickDriver};
pub use model::feed::PriceFeed;
pub use model::price_state::PriceState;
pub use model::snapshot::{PortfolioSummary, PriceSnapshot};
pub use session::Dashboard;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
