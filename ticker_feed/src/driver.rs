//! Recurring tick job and snapshot broadcasting.
//!
//! The `TickDriver` runs a background thread that advances a shared [`PriceFeed`] once
//! per interval and broadcasts the resulting snapshots to registered listeners using
//! `crossbeam_channel`. Listeners register through [`TickDriver::listen`].
//!
//! Event model:
//! - `FeedEvent::Tick(snapshots)` — every tracked symbol after one tick.
//! - `FeedEvent::Shutdown` — the driver stopped; no further ticks follow.
//!
//! Design notes:
//! - The feed lock is held for the whole tick, so a tick is applied to all symbols
//!   or to none, and subscription changes never interleave with it.
//! - The driver is owned by its session. Stopping or dropping it joins the thread,
//!   so no tick can land after the owner is gone.
//! - Broadcast is best-effort: a listener whose receiver was dropped is removed.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, bounded, select, unbounded};
use log::{debug, error, info};
use ticker_common::{FeedError, Result};

use crate::model::feed::PriceFeed;
use crate::model::snapshot::PriceSnapshot;

/// Feed shared between a session and its driver thread.
pub type SharedFeed = Arc<Mutex<PriceFeed>>;

/// Message sent by the driver to its listeners.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Snapshots of all tracked symbols, in subscription order, after one tick.
    Tick(Vec<PriceSnapshot>),
    /// The driver stopped.
    Shutdown,
}

/// Handle to the background tick thread.
pub struct TickDriver {
    stop_tx: Sender<()>,
    subscribe_tx: Sender<Sender<FeedEvent>>,
    handle: Option<JoinHandle<()>>,
}

impl TickDriver {
    /// Starts ticking `feed` every `interval`.
    pub fn start(feed: SharedFeed, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let (subscribe_tx, subscribe_rx) = unbounded::<Sender<FeedEvent>>();

        let handle = thread::spawn(move || run(feed, interval, stop_rx, subscribe_rx));
        info!("Tick driver started (interval {:?})", interval);

        Self {
            stop_tx,
            subscribe_tx,
            handle: Some(handle),
        }
    }

    /// Registers a new listener. Events start with the next tick.
    pub fn listen(&self) -> Result<Receiver<FeedEvent>> {
        let (event_tx, event_rx) = unbounded::<FeedEvent>();
        self.subscribe_tx
            .send(event_tx)
            .map_err(|e| FeedError::ChannelSend(e.to_string()))?;
        Ok(event_rx)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the thread and waits for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.stop_tx.try_send(());
            if handle.join().is_err() {
                error!("Tick driver thread panicked");
            }
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(
    feed: SharedFeed,
    interval: Duration,
    stop_rx: Receiver<()>,
    subscribe_rx: Receiver<Sender<FeedEvent>>,
) {
    let ticker = crossbeam_channel::tick(interval);
    let mut listeners: Vec<Sender<FeedEvent>> = Vec::new();

    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(ticker) -> _ => {
                while let Ok(listener) = subscribe_rx.try_recv() {
                    listeners.push(listener);
                    debug!("Tick driver: new listener. Total listeners: {}", listeners.len());
                }

                let snapshots = match feed.lock() {
                    Ok(mut feed) => {
                        feed.tick();
                        feed.snapshots()
                    }
                    Err(e) => {
                        error!("Price feed lock poisoned, stopping ticks: {}", e);
                        break;
                    }
                };

                let event = FeedEvent::Tick(snapshots);
                listeners.retain(|listener| listener.send(event.clone()).is_ok());
            }
        }
    }

    while let Ok(listener) = subscribe_rx.try_recv() {
        listeners.push(listener);
    }
    for listener in &listeners {
        let _ = listener.send(FeedEvent::Shutdown);
    }
    info!("Tick driver stopped");
}
