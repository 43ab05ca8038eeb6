//! Dashboard session: login gate, persisted subscriptions and the running feed.
//!
//! A `Dashboard` owns everything one user session needs: the key-value store the
//! session is persisted in, the shared [`PriceFeed`] and, while active, the
//! [`TickDriver`] advancing it. Every mutation of the email or of the subscription set
//! is written back to the store immediately; on open, whatever the store holds is read
//! back and malformed values are treated as absent.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::Receiver;
use log::{info, warn};
use ticker_common::defaults::{SUBSCRIBED_STOCKS_KEY, TICK_INTERVAL_MS, USER_EMAIL_KEY};
use ticker_common::{PricePoint, Result, Ticker};

use crate::chart::{TimeRange, filter_history};
use crate::driver::{FeedEvent, SharedFeed, TickDriver};
use crate::model::feed::{PriceFeed, now_millis};
use crate::model::snapshot::{PortfolioSummary, PriceSnapshot};
use crate::store::KeyValueStore;

/// Accepts anything non-blank that contains an `@`.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.contains('@')
}

/// One user's dashboard session.
pub struct Dashboard<S: KeyValueStore> {
    store: S,
    user_email: Option<String>,
    feed: SharedFeed,
    interval: Duration,
    driver: Option<TickDriver>,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Restores the session persisted in `store` with a randomly seeded feed ticking
    /// at the default interval.
    pub fn open(store: S) -> Self {
        Self::with_feed(store, PriceFeed::new(), Duration::from_millis(TICK_INTERVAL_MS))
    }

    /// Restores the session persisted in `store` on top of `feed`.
    pub fn with_feed(store: S, mut feed: PriceFeed, interval: Duration) -> Self {
        let user_email = store
            .get(USER_EMAIL_KEY)
            .filter(|email| is_valid_email(email));

        for ticker in load_subscriptions(&store) {
            feed.subscribe(ticker);
        }
        info!(
            "Session restored: user={:?}, tickers={:?}",
            user_email,
            feed.subscribed()
        );

        Self {
            store,
            user_email,
            feed: Arc::new(Mutex::new(feed)),
            interval,
            driver: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user_email.is_some()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    /// Logs in as `email`. Input that does not look like an email is ignored and
    /// `false` is returned.
    pub fn login(&mut self, email: &str) -> bool {
        if !is_valid_email(email) {
            warn!("Rejected login with invalid email {:?}", email);
            return false;
        }
        let email = email.trim();
        self.store.set(USER_EMAIL_KEY, email);
        self.user_email = Some(email.to_string());
        info!("Logged in as {}", email);
        true
    }

    /// Ends the session: stops ticking, forgets every subscription and clears
    /// the persisted state.
    pub fn logout(&mut self) -> Result<()> {
        self.deactivate();
        self.feed.lock()?.clear();
        self.store.remove(USER_EMAIL_KEY);
        self.store.remove(SUBSCRIBED_STOCKS_KEY);
        if let Some(email) = self.user_email.take() {
            info!("Logged out {}", email);
        }
        Ok(())
    }

    /// Subscribes to free-form `symbol`. Unsupported or already tracked symbols
    /// leave the session untouched and return `false`.
    pub fn subscribe(&mut self, symbol: &str) -> Result<bool> {
        match Ticker::from_symbol(symbol) {
            Some(ticker) => self.subscribe_ticker(ticker),
            None => Ok(false),
        }
    }

    pub fn subscribe_ticker(&mut self, ticker: Ticker) -> Result<bool> {
        let subscribed = {
            let mut feed = self.feed.lock()?;
            if !feed.subscribe(ticker) {
                return Ok(false);
            }
            feed.subscribed().to_vec()
        };
        self.save_subscriptions(&subscribed)?;
        Ok(true)
    }

    pub fn unsubscribe(&mut self, ticker: Ticker) -> Result<bool> {
        let subscribed = {
            let mut feed = self.feed.lock()?;
            if !feed.unsubscribe(ticker) {
                return Ok(false);
            }
            feed.subscribed().to_vec()
        };
        self.save_subscriptions(&subscribed)?;
        Ok(true)
    }

    /// Starts the tick driver and returns a listener for its events.
    ///
    /// Returns `None` while logged out. Calling it on an active session keeps the
    /// running driver and only adds a listener.
    pub fn activate(&mut self) -> Result<Option<Receiver<FeedEvent>>> {
        if !self.is_logged_in() {
            return Ok(None);
        }
        let driver = self
            .driver
            .get_or_insert_with(|| TickDriver::start(Arc::clone(&self.feed), self.interval));
        Ok(Some(driver.listen()?))
    }

    /// Stops the tick driver, if running.
    pub fn deactivate(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.stop();
        }
    }

    pub fn is_active(&self) -> bool {
        self.driver.is_some()
    }

    /// Tracked symbols in subscription order.
    pub fn subscribed(&self) -> Result<Vec<Ticker>> {
        Ok(self.feed.lock()?.subscribed().to_vec())
    }

    pub fn snapshots(&self) -> Result<Vec<PriceSnapshot>> {
        Ok(self.feed.lock()?.snapshots())
    }

    pub fn portfolio(&self) -> Result<PortfolioSummary> {
        Ok(self.feed.lock()?.portfolio())
    }

    /// Chart points of `ticker` within `range`, as of now.
    pub fn chart(&self, ticker: Ticker, range: TimeRange) -> Result<Vec<PricePoint>> {
        self.chart_at(ticker, range, now_millis())
    }

    /// Chart points of `ticker` within `range`, as of `now`. Empty if not tracked.
    pub fn chart_at(&self, ticker: Ticker, range: TimeRange, now: i64) -> Result<Vec<PricePoint>> {
        let feed = self.feed.lock()?;
        Ok(feed
            .state(ticker)
            .map(|state| filter_history(state.history(), range, now))
            .unwrap_or_default())
    }

    fn save_subscriptions(&mut self, tickers: &[Ticker]) -> Result<()> {
        let json = serde_json::to_string(tickers)?;
        self.store.set(SUBSCRIBED_STOCKS_KEY, &json);
        Ok(())
    }
}

/// Reads the persisted subscription list. Unknown symbols are skipped and a
/// malformed value counts as no subscriptions.
fn load_subscriptions<S: KeyValueStore>(store: &S) -> Vec<Ticker> {
    let Some(raw) = store.get(SUBSCRIBED_STOCKS_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(symbols) => symbols
            .iter()
            .filter_map(|symbol| Ticker::from_symbol(symbol))
            .collect(),
        Err(e) => {
            warn!("Ignoring malformed {} value: {}", SUBSCRIBED_STOCKS_KEY, e);
            Vec::new()
        }
    }
}
