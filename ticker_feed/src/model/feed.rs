//! The price feed simulator: a subscription set and one `PriceState` per symbol.
//!
//! Subscribing seeds a fresh state around the ticker's base price; every call to
//! [`PriceFeed::tick`] advances all subscribed symbols by one random-walk step.
//! Unknown symbols and duplicate subscriptions are ignored without complaint.

use std::collections::HashMap;

use chrono::Utc;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ticker_common::Ticker;

use crate::model::price_state::{PriceState, advance_price, seed_price};
use crate::model::snapshot::{PortfolioSummary, PriceSnapshot};

/// Current wall-clock time in UTC milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Simulated feed for the subscribed symbols.
pub struct PriceFeed {
    /// Subscription order, used for display only.
    subscribed: Vec<Ticker>,
    states: HashMap<Ticker, PriceState>,
    rng: StdRng,
}

impl Default for PriceFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceFeed {
    /// Feed drawing its randomness from an OS-seeded generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Feed with a reproducible random sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            subscribed: Vec::new(),
            states: HashMap::new(),
            rng,
        }
    }

    /// Starts tracking `ticker`. Returns `false` if it was already tracked.
    pub fn subscribe(&mut self, ticker: Ticker) -> bool {
        self.subscribe_at(ticker, now_millis())
    }

    /// Like [`Self::subscribe`], seeding the history at `now`.
    pub fn subscribe_at(&mut self, ticker: Ticker, now: i64) -> bool {
        if self.states.contains_key(&ticker) {
            return false;
        }

        let price = seed_price(ticker, &mut self.rng);
        self.states.insert(ticker, PriceState::seeded(ticker, price, now));
        self.subscribed.push(ticker);
        debug!("Subscribed {} at {:.2}", ticker, price);
        true
    }

    /// Subscribes to free-form `symbol` if it names a supported ticker.
    pub fn subscribe_symbol(&mut self, symbol: &str) -> bool {
        match Ticker::from_symbol(symbol) {
            Some(ticker) => self.subscribe(ticker),
            None => {
                debug!("Ignoring unsupported symbol {:?}", symbol);
                false
            }
        }
    }

    /// Stops tracking `ticker` and drops its state. Returns `false` if it was not tracked.
    pub fn unsubscribe(&mut self, ticker: Ticker) -> bool {
        if self.states.remove(&ticker).is_none() {
            return false;
        }
        self.subscribed.retain(|t| *t != ticker);
        debug!("Unsubscribed {}", ticker);
        true
    }

    /// Drops every subscription.
    pub fn clear(&mut self) {
        self.subscribed.clear();
        self.states.clear();
    }

    /// Advances every subscribed symbol by one step, stamped with the current time.
    pub fn tick(&mut self) {
        self.tick_at(now_millis());
    }

    /// Advances every subscribed symbol by one step, stamped with `now`.
    pub fn tick_at(&mut self, now: i64) {
        for ticker in &self.subscribed {
            if let Some(state) = self.states.get_mut(ticker) {
                let next = advance_price(state.price(), &mut self.rng);
                state.apply(next, now);
            }
        }
    }

    pub fn is_subscribed(&self, ticker: Ticker) -> bool {
        self.states.contains_key(&ticker)
    }

    /// Tracked symbols in subscription order.
    pub fn subscribed(&self) -> &[Ticker] {
        &self.subscribed
    }

    pub fn state(&self, ticker: Ticker) -> Option<&PriceState> {
        self.states.get(&ticker)
    }

    /// Snapshots of every tracked symbol, in subscription order.
    pub fn snapshots(&self) -> Vec<PriceSnapshot> {
        self.subscribed
            .iter()
            .filter_map(|t| self.states.get(t))
            .map(PriceSnapshot::from)
            .collect()
    }

    pub fn portfolio(&self) -> PortfolioSummary {
        PortfolioSummary::from_snapshots(&self.snapshots())
    }
}
