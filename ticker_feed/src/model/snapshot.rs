//! Read-only views of the feed handed to renderers.

use serde::{Deserialize, Serialize};
use ticker_common::Ticker;
use ticker_common::defaults::SPARKLINE_POINTS;

use crate::model::price_state::PriceState;

/// Point-in-time copy of a symbol's price state for a stock card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub ticker: Ticker,
    pub price: f64,
    pub previous_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub high: f64,
    pub low: f64,
    /// Trailing prices for the sparkline, oldest first.
    pub sparkline: Vec<f64>,
    /// Number of points currently held in the full history.
    pub updates: usize,
}

impl PriceSnapshot {
    /// Whether the last tick moved the price up (or left it unchanged).
    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }
}

impl From<&PriceState> for PriceSnapshot {
    fn from(state: &PriceState) -> Self {
        Self {
            ticker: state.ticker(),
            price: state.price(),
            previous_price: state.previous_price(),
            change: state.change(),
            change_percent: state.change_percent(),
            high: state.high(),
            low: state.low(),
            sparkline: state.tail_prices(SPARKLINE_POINTS),
            updates: state.history().len(),
        }
    }
}

/// Aggregate over every tracked symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of current prices.
    pub value: f64,
    /// Sum of the last per-symbol changes.
    pub change: f64,
    /// `change / value * 100`, or zero for an empty portfolio.
    pub change_percent: f64,
    pub tracked: usize,
}

impl PortfolioSummary {
    /// Folds snapshots into a summary.
    pub fn from_snapshots(snapshots: &[PriceSnapshot]) -> Self {
        let value: f64 = snapshots.iter().map(|s| s.price).sum();
        let change: f64 = snapshots.iter().map(|s| s.change).sum();
        let change_percent = if value > 0.0 {
            change / value * 100.0
        } else {
            0.0
        };

        Self {
            value,
            change,
            change_percent,
            tracked: snapshots.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_truncates_sparkline() {
        let mut state = PriceState::seeded(Ticker::GOOG, 140.0, 0);
        for i in 1..30 {
            state.apply(140.0 + i as f64, i);
        }

        let snapshot = PriceSnapshot::from(&state);
        assert_eq!(snapshot.updates, 30);
        assert_eq!(snapshot.sparkline.len(), SPARKLINE_POINTS);
        assert_eq!(snapshot.sparkline.last(), Some(&169.0));
        assert_eq!(snapshot.sparkline.first(), Some(&150.0));
        assert!(snapshot.is_positive());
    }

    #[test]
    fn test_portfolio_summary() {
        let mut goog = PriceState::seeded(Ticker::GOOG, 100.0, 0);
        goog.apply(110.0, 1);
        let mut tsla = PriceState::seeded(Ticker::TSLA, 100.0, 0);
        tsla.apply(90.0, 1);
        let mut amzn = PriceState::seeded(Ticker::AMZN, 100.0, 0);
        amzn.apply(120.0, 1);

        let snapshots: Vec<PriceSnapshot> =
            [&goog, &tsla, &amzn].into_iter().map(PriceSnapshot::from).collect();
        let summary = PortfolioSummary::from_snapshots(&snapshots);

        assert!((summary.value - 320.0).abs() < 1e-9);
        assert!((summary.change - 20.0).abs() < 1e-9);
        assert!((summary.change_percent - 6.25).abs() < 1e-9);
        assert_eq!(summary.tracked, 3);
    }

    #[test]
    fn test_empty_portfolio() {
        assert_eq!(PortfolioSummary::from_snapshots(&[]), PortfolioSummary::default());
    }
}
