//! Single entry of a symbol's price history.
use serde::{Deserialize, Serialize};

/// Price observed at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// UTC timestamp in milliseconds since Unix epoch.
    pub time: i64,
    /// Observed price, always positive.
    pub price: f64,
}

impl PricePoint {
    /// Creates a new point.
    pub fn new(time: i64, price: f64) -> Self {
        Self { time, price }
    }
}
