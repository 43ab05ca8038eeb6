//! Ticker symbols supported by the dashboard and helpers to parse them.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::FeedError;

/// Trait providing file parsing for tickers.
pub trait TickerParser {
    /// Parses tickers from a buffered reader.
    ///
    /// Each non-empty line is parsed as a single `Ticker` value using `FromStr`.
    /// Returns an error if any line cannot be parsed.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Ticker>, FeedError>;
}

impl TickerParser for Ticker {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, FeedError> {
        let mut tickers = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(FeedError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }

            match trimmed_line.parse::<Self>() {
                Ok(ticker) => tickers.push(ticker),
                Err(e) => {
                    return Err(FeedError::ParseTickersFile(format!(
                        "{trimmed_line}: {e}"
                    )));
                }
            }
        }
        Ok(tickers)
    }
}

/// Allow-list of ticker symbols the simulator can track.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "lower")]
#[strum(ascii_case_insensitive)]
pub enum Ticker {
    GOOG,
    TSLA,
    AMZN,
    META,
    NVDA,
}

impl Ticker {
    /// Reference price the simulator seeds a fresh subscription around.
    pub fn base_price(&self) -> f64 {
        match self {
            Ticker::GOOG => 140.0,
            Ticker::TSLA => 250.0,
            Ticker::AMZN => 175.0,
            Ticker::META => 485.0,
            Ticker::NVDA => 875.0,
        }
    }

    /// Resolves free-form user input against the allow-list.
    ///
    /// Surrounding whitespace and letter case are ignored; anything that is not a
    /// supported symbol yields `None`.
    pub fn from_symbol(input: &str) -> Option<Self> {
        input.trim().parse().ok()
    }
}
