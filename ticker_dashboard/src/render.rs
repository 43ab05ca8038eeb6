//! Terminal renderer for feed events.
//!
//! Each tick is logged as a portfolio line followed by one card line per tracked
//! symbol, with a block-character sparkline of the recent prices. On exit the
//! renderer prints the chart report for the selected time range.
use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use ticker_common::Result;
use ticker_feed::chart::format_price;
use ticker_feed::{Dashboard, FeedEvent, KeyValueStore, PortfolioSummary, PriceSnapshot, TimeRange};

/// How long a single wait for the next event may block before the shutdown flag
/// and the deadline are checked again.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Renders events from `events` until Ctrl+C, the `deadline`, or a driver shutdown.
pub fn run_render_loop(events: &Receiver<FeedEvent>, shutdown: &AtomicBool, deadline: Option<Instant>) {
    info!("Dashboard is running. Press Ctrl+C to exit.");

    while !shutdown.load(Ordering::Relaxed) {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }
        match events.recv_timeout(POLL_INTERVAL) {
            Ok(FeedEvent::Tick(snapshots)) => render_tick(&snapshots),
            Ok(FeedEvent::Shutdown) => {
                info!("Price feed stopped");
                break;
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                warn!("Price feed disconnected");
                break;
            }
        }
    }
    info!("Render loop stopping...");
}

fn render_tick(snapshots: &[PriceSnapshot]) {
    if snapshots.is_empty() {
        debug!("No stocks subscribed");
        return;
    }
    info!("{}", portfolio_line(&PortfolioSummary::from_snapshots(snapshots)));
    for snapshot in snapshots {
        info!("{}", card_line(snapshot));
    }
}

/// Logs the chart series of every tracked symbol restricted to `range`.
pub fn print_chart_report<S: KeyValueStore>(dashboard: &Dashboard<S>, range: TimeRange) -> Result<()> {
    for ticker in dashboard.subscribed()? {
        let points = dashboard.chart(ticker, range)?;
        info!("{} price history ({}): showing {} data points", ticker, range, points.len());

        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            info!(
                "  {} {} -> {} {}",
                range.format_time(first.time),
                format_price(first.price),
                range.format_time(last.time),
                format_price(last.price)
            );
        }
    }
    Ok(())
}

pub fn portfolio_line(summary: &PortfolioSummary) -> String {
    let noun = if summary.tracked == 1 { "stock" } else { "stocks" };
    format!(
        "PORTFOLIO {} {:+.2} ({:.2}%) - {} {} tracked",
        format_price(summary.value),
        summary.change,
        summary.change_percent,
        summary.tracked,
        noun
    )
}

pub fn card_line(snapshot: &PriceSnapshot) -> String {
    let trend = if snapshot.is_positive() { '▲' } else { '▼' };
    format!(
        "{:<5} {:>10} {} {:+.2} ({:.2}%) H={} L={} {} [{} updates]",
        snapshot.ticker.to_string(),
        format_price(snapshot.price),
        trend,
        snapshot.change,
        snapshot.change_percent,
        format_price(snapshot.high),
        format_price(snapshot.low),
        sparkline(&snapshot.sparkline),
        snapshot.updates
    )
}

/// Scales `values` between their minimum and maximum onto eight block heights.
pub fn sparkline(values: &[f64]) -> String {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    values
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                SPARK_LEVELS[SPARK_LEVELS.len() / 2]
            } else {
                SPARK_LEVELS[(((v - min) / span) * top).round() as usize]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticker_common::Ticker;

    fn snapshot(change: f64) -> PriceSnapshot {
        PriceSnapshot {
            ticker: Ticker::GOOG,
            price: 141.5,
            previous_price: 141.5 - change,
            change,
            change_percent: change / (141.5 - change) * 100.0,
            high: 145.0,
            low: 138.25,
            sparkline: vec![140.0, 141.5],
            updates: 2,
        }
    }

    #[test]
    fn test_sparkline_scales_to_levels() {
        assert_eq!(sparkline(&[1.0, 2.0, 3.0]), "▁▅█");
        assert_eq!(sparkline(&[5.0, 5.0]), "▅▅");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn test_card_line() {
        let line = card_line(&snapshot(1.5));
        assert!(line.starts_with("GOOG "));
        assert!(line.contains("$141.50 ▲ +1.50"));
        assert!(line.contains("H=$145.00 L=$138.25"));
        assert!(line.ends_with("[2 updates]"));

        assert!(card_line(&snapshot(-0.5)).contains("▼ -0.50"));
    }

    #[test]
    fn test_portfolio_line() {
        let summary = PortfolioSummary::from_snapshots(&[snapshot(1.5)]);
        assert_eq!(
            portfolio_line(&summary),
            "PORTFOLIO $141.50 +1.50 (1.06%) - 1 stock tracked"
        );
    }
}
