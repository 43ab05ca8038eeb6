//! Domain models of the price feed simulator.
//!
//! - `price_state` — per-symbol `PriceState` and the random-walk helpers.
//! - `feed` — `PriceFeed`, the subscription set plus its price states.
//! - `snapshot` — read-only views handed to renderers.

pub mod feed;
pub mod price_state;
pub mod snapshot;
