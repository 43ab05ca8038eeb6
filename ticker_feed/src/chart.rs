//! Time-range filtering and axis labels for the detailed price chart.
//!
//! The chart shows a symbol's full history restricted to a caller-selected window
//! ending now. The cutoff is inclusive: a point exactly one window old is kept.

use chrono::DateTime;
use clap::ValueEnum;
use ticker_common::PricePoint;
use strum_macros::{Display, EnumIter, EnumString};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Window selectable on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TimeRange {
    /// Last 24 hours.
    Day,
    /// Last 30 days.
    Month,
    /// Last 365 days.
    Year,
}

impl TimeRange {
    /// Window length in milliseconds.
    pub fn window_ms(&self) -> i64 {
        match self {
            TimeRange::Day => DAY_MS,
            TimeRange::Month => 30 * DAY_MS,
            TimeRange::Year => 365 * DAY_MS,
        }
    }

    /// Oldest timestamp still shown when the chart is drawn at `now`.
    pub fn cutoff(&self, now: i64) -> i64 {
        now - self.window_ms()
    }

    /// Axis label for `timestamp`: clock time for a day, day of month for a month,
    /// month and year for a year. Times are rendered in UTC.
    pub fn format_time(&self, timestamp: i64) -> String {
        let Some(date) = DateTime::from_timestamp_millis(timestamp) else {
            return String::new();
        };
        let pattern = match self {
            TimeRange::Day => "%H:%M",
            TimeRange::Month => "%b %-d",
            TimeRange::Year => "%b %Y",
        };
        date.format(pattern).to_string()
    }
}

/// Points of `history` that fall inside `range` as seen at `now`.
pub fn filter_history<'a, I>(history: I, range: TimeRange, now: i64) -> Vec<PricePoint>
where
    I: IntoIterator<Item = &'a PricePoint>,
{
    let cutoff = range.cutoff(now);
    history
        .into_iter()
        .filter(|point| point.time >= cutoff)
        .copied()
        .collect()
}

/// Price label used on the chart axis and tooltips.
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_day_cutoff_is_inclusive() {
        let history = vec![
            PricePoint::new(NOW - DAY_MS - 1, 1.0),
            PricePoint::new(NOW - DAY_MS, 2.0),
            PricePoint::new(NOW, 3.0),
        ];

        let filtered = filter_history(&history, TimeRange::Day, NOW);
        assert_eq!(filtered, history[1..].to_vec());
    }

    #[test]
    fn test_wider_ranges_keep_more() {
        let history = vec![
            PricePoint::new(NOW - 400 * DAY_MS, 1.0),
            PricePoint::new(NOW - 100 * DAY_MS, 2.0),
            PricePoint::new(NOW - 10 * DAY_MS, 3.0),
            PricePoint::new(NOW - HOUR_MS, 4.0),
        ];

        assert_eq!(filter_history(&history, TimeRange::Day, NOW).len(), 1);
        assert_eq!(filter_history(&history, TimeRange::Month, NOW).len(), 2);
        assert_eq!(filter_history(&history, TimeRange::Year, NOW).len(), 3);
    }

    #[test]
    fn test_range_parsing() {
        assert_eq!("day".parse::<TimeRange>().unwrap(), TimeRange::Day);
        assert_eq!("MONTH".parse::<TimeRange>().unwrap(), TimeRange::Month);
        assert_eq!(TimeRange::Year.to_string(), "year");
    }

    #[test]
    fn test_format_time_per_range() {
        // 2023-11-14T22:13:20Z
        assert_eq!(TimeRange::Day.format_time(NOW), "22:13");
        assert_eq!(TimeRange::Month.format_time(NOW), "Nov 14");
        assert_eq!(TimeRange::Year.format_time(NOW), "Nov 2023");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(140.0), "$140.00");
        assert_eq!(format_price(0.014), "$0.01");
    }
}
