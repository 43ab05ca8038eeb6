//! Per-symbol price state and the random-walk helpers that drive it.
//!
//! A `PriceState` is seeded once when its symbol is subscribed and then advanced once
//! per tick. It keeps the current and previous price, the derived change metrics, the
//! running high/low since subscription and a bounded, time-ascending history.

use std::collections::VecDeque;

use rand::Rng;
use ticker_common::defaults::HISTORY_CAPACITY;
use ticker_common::{PricePoint, Ticker};

/// Lowest price the random walk may produce.
pub const MIN_PRICE: f64 = 0.01;
/// Half-width of the uniform offset applied to a ticker's base price at seeding.
pub const SEED_SPREAD: f64 = 10.0;
/// Half-width of the uniform step applied on every tick.
pub const MAX_STEP: f64 = 2.5;

/// Initial price for a fresh subscription: the ticker's base price moved by a
/// uniform offset in `[-SEED_SPREAD, +SEED_SPREAD]`.
pub fn seed_price<R: Rng + ?Sized>(ticker: Ticker, rng: &mut R) -> f64 {
    ticker.base_price() + rng.random_range(-SEED_SPREAD..=SEED_SPREAD)
}

/// Next price of the random walk, with the step drawn uniformly from
/// `[-MAX_STEP, +MAX_STEP]`.
pub fn advance_price<R: Rng + ?Sized>(previous: f64, rng: &mut R) -> f64 {
    let step: f64 = rng.random_range(-MAX_STEP..=MAX_STEP);
    step_price(previous, step)
}

/// Applies `step` to `previous`, never going below [`MIN_PRICE`].
pub fn step_price(previous: f64, step: f64) -> f64 {
    (previous + step).max(MIN_PRICE)
}

/// Mutable price record of one subscribed symbol.
#[derive(Debug, Clone)]
pub struct PriceState {
    ticker: Ticker,
    price: f64,
    previous_price: f64,
    change: f64,
    change_percent: f64,
    high: f64,
    low: f64,
    history: VecDeque<PricePoint>,
}

impl PriceState {
    /// Creates the state of a fresh subscription with a single history point.
    pub fn seeded(ticker: Ticker, price: f64, now: i64) -> Self {
        let mut history = VecDeque::with_capacity(HISTORY_CAPACITY);
        history.push_back(PricePoint::new(now, price));

        Self {
            ticker,
            price,
            previous_price: price,
            change: 0.0,
            change_percent: 0.0,
            high: price,
            low: price,
            history,
        }
    }

    /// Records `new_price` observed at `now`.
    ///
    /// Change metrics are computed against the price being replaced. The history
    /// drops its oldest point once it would grow past `HISTORY_CAPACITY`.
    pub fn apply(&mut self, new_price: f64, now: i64) {
        let change = new_price - self.price;

        self.change_percent = change / self.price * 100.0;
        self.change = change;
        self.previous_price = self.price;
        self.price = new_price;
        self.high = self.high.max(new_price);
        self.low = self.low.min(new_price);

        self.history.push_back(PricePoint::new(now, new_price));
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
    }

    pub fn ticker(&self) -> Ticker {
        self.ticker
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn previous_price(&self) -> f64 {
        self.previous_price
    }

    pub fn change(&self) -> f64 {
        self.change
    }

    pub fn change_percent(&self) -> f64 {
        self.change_percent
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    /// Oldest-first price history.
    pub fn history(&self) -> &VecDeque<PricePoint> {
        &self.history
    }

    /// Last `len` prices of the history, oldest first.
    pub fn tail_prices(&self, len: usize) -> Vec<f64> {
        let skip = self.history.len().saturating_sub(len);
        self.history.iter().skip(skip).map(|p| p.price).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_seed_price_within_spread() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let price = seed_price(Ticker::GOOG, &mut rng);
            assert!((130.0..=150.0).contains(&price), "seed {price} out of range");
        }
    }

    #[test]
    fn test_advance_price_bounded_step() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut price = 100.0;
        for _ in 0..1_000 {
            let next = advance_price(price, &mut rng);
            assert!((next - price).abs() <= MAX_STEP + 1e-9);
            price = next;
        }
    }

    #[test]
    fn test_advance_price_never_below_floor() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut price = MIN_PRICE;
        for _ in 0..10_000 {
            price = advance_price(price, &mut rng);
            assert!(price >= MIN_PRICE);
        }
    }

    #[test]
    fn test_step_price_clamps() {
        assert_eq!(step_price(0.01, -2.5), MIN_PRICE);
        assert_eq!(step_price(1.0, -2.5), MIN_PRICE);
        assert_eq!(step_price(10.0, 2.5), 12.5);
        assert_eq!(step_price(10.0, -2.5), 7.5);
    }

    #[test]
    fn test_seeded_state() {
        let state = PriceState::seeded(Ticker::TSLA, 251.0, 1_000);
        assert_eq!(state.ticker(), Ticker::TSLA);
        assert_eq!(state.price(), 251.0);
        assert_eq!(state.previous_price(), 251.0);
        assert_eq!(state.change(), 0.0);
        assert_eq!(state.change_percent(), 0.0);
        assert_eq!(state.high(), 251.0);
        assert_eq!(state.low(), 251.0);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_apply_updates_metrics() {
        let mut state = PriceState::seeded(Ticker::AMZN, 200.0, 0);
        state.apply(202.0, 1_000);

        assert_eq!(state.previous_price(), 200.0);
        assert_eq!(state.price(), 202.0);
        assert!((state.change() - 2.0).abs() < 1e-9);
        assert!((state.change_percent() - 1.0).abs() < 1e-9);
        assert_eq!(state.high(), 202.0);
        assert_eq!(state.low(), 200.0);

        state.apply(199.0, 2_000);
        assert!((state.change() + 3.0).abs() < 1e-9);
        assert_eq!(state.high(), 202.0);
        assert_eq!(state.low(), 199.0);
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut state = PriceState::seeded(Ticker::META, 480.0, 0);
        for i in 1..150 {
            state.apply(480.0 + i as f64, i);
        }

        let history = state.history();
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.front().map(|p| p.time), Some(50));
        assert_eq!(history.back().map(|p| p.time), Some(149));
    }

    #[test]
    fn test_tail_prices() {
        let mut state = PriceState::seeded(Ticker::NVDA, 1.0, 0);
        state.apply(2.0, 1);
        state.apply(3.0, 2);

        assert_eq!(state.tail_prices(2), vec![2.0, 3.0]);
        assert_eq!(state.tail_prices(20), vec![1.0, 2.0, 3.0]);
    }
}
