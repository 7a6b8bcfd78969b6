// In crates/core-types/src/types.rs

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, SeriesError};

/// A normalized, upper-case ticker symbol (e.g., "AAPL").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Trims and upper-cases the raw symbol. Blank input is rejected.
    pub fn new(raw: &str) -> Result<Self, ConfigurationError> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ConfigurationError::EmptyTicker);
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A half-open calendar range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigurationError> {
        if start >= end {
            return Err(ConfigurationError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The first date *not* included in the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// A single daily price bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// A non-empty, strictly date-ordered sequence of bars for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: Ticker,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: Ticker, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::Empty { ticker: ticker.to_string() });
        }

        for (index, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() || bar.close < 0.0 {
                return Err(SeriesError::InvalidClose {
                    index,
                    date: bar.date,
                    close: bar.close,
                });
            }
            if index > 0 && bar.date <= bars[index - 1].date {
                return Err(SeriesError::Unordered { index, date: bar.date });
            }
        }

        Ok(Self { ticker, bars })
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Never true: `new` rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|bar| bar.close)
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }
}

/// The binary regime flag: `Long` when the short average is strictly above the long one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub enum Signal {
    Flat,
    Long,
}

impl Signal {
    /// Ties map to `Flat`.
    pub fn from_averages(sma_short: f64, sma_long: f64) -> Self {
        if sma_short > sma_long { Signal::Long } else { Signal::Flat }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Signal::Flat => 0.0,
            Signal::Long => 1.0,
        }
    }
}

impl From<Signal> for f64 {
    fn from(signal: Signal) -> Self {
        signal.as_f64()
    }
}

impl TryFrom<f64> for Signal {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Signal::Flat)
        } else if value == 1.0 {
            Ok(Signal::Long)
        } else {
            Err(format!("invalid signal value {value}"))
        }
    }
}

/// The first difference of the signal between two consecutive rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Position {
    Sell,
    Hold,
    Buy,
}

impl Position {
    /// `current - previous`, expressed as a position change.
    pub fn between(previous: Signal, current: Signal) -> Self {
        match (previous, current) {
            (Signal::Flat, Signal::Long) => Position::Buy,
            (Signal::Long, Signal::Flat) => Position::Sell,
            _ => Position::Hold,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Position::Sell => -1,
            Position::Hold => 0,
            Position::Buy => 1,
        }
    }

    /// The trade action this position change triggers, if any.
    pub fn action(self) -> Option<Action> {
        match self {
            Position::Buy => Some(Action::Buy),
            Position::Sell => Some(Action::Sell),
            Position::Hold => None,
        }
    }
}

impl From<Position> for i8 {
    fn from(position: Position) -> Self {
        position.as_i8()
    }
}

impl TryFrom<i8> for Position {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Position::Sell),
            0 => Ok(Position::Hold),
            1 => Ok(Position::Buy),
            other => Err(format!("invalid position value {other}")),
        }
    }
}

/// One row of the signal table, aligned to a price bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub price: f64,
    pub sma_short: f64,
    pub sma_long: f64,
    pub signal: Signal,
    /// `None` on the first row, where there is no previous signal to diff against.
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => f.write_str("BUY"),
            Action::Sell => f.write_str("SELL"),
        }
    }
}

/// A crossover event from the trade log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub date: NaiveDate,
    pub price: f64,
    pub action: Action,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 1, d).unwrap()
    }

    #[test]
    fn ticker_is_trimmed_and_uppercased() {
        let ticker = Ticker::new("  aapl ").unwrap();
        assert_eq!(ticker.as_str(), "AAPL");
        assert_eq!(Ticker::new("   "), Err(ConfigurationError::EmptyTicker));
    }

    #[test]
    fn date_range_requires_start_before_end() {
        assert!(DateRange::new(day(1), day(2)).is_ok());
        assert_eq!(
            DateRange::new(day(2), day(2)),
            Err(ConfigurationError::InvalidDateRange { start: day(2), end: day(2) })
        );

        let range = DateRange::new(day(1), day(3)).unwrap();
        assert!(range.contains(day(1)));
        assert!(range.contains(day(2)));
        assert!(!range.contains(day(3)));
    }

    #[test]
    fn price_series_rejects_empty_and_unordered_bars() {
        let ticker = Ticker::new("MSFT").unwrap();
        assert!(matches!(
            PriceSeries::new(ticker.clone(), vec![]),
            Err(SeriesError::Empty { .. })
        ));

        let duplicated = vec![
            PriceBar { date: day(3), close: 1.0 },
            PriceBar { date: day(3), close: 2.0 },
        ];
        assert_eq!(
            PriceSeries::new(ticker.clone(), duplicated),
            Err(SeriesError::Unordered { index: 1, date: day(3) })
        );

        let single = PriceSeries::new(ticker.clone(), vec![PriceBar { date: day(3), close: 1.0 }]).unwrap();
        assert!(!single.is_empty());
        assert_eq!(single.len(), 1);

        let negative = vec![PriceBar { date: day(3), close: -1.0 }];
        assert!(matches!(
            PriceSeries::new(ticker, negative),
            Err(SeriesError::InvalidClose { index: 0, .. })
        ));
    }

    #[test]
    fn signal_ties_are_flat() {
        assert_eq!(Signal::from_averages(10.0, 10.0), Signal::Flat);
        assert_eq!(Signal::from_averages(10.5, 10.0), Signal::Long);
        assert_eq!(Signal::from_averages(9.5, 10.0), Signal::Flat);
    }

    #[test]
    fn position_is_first_difference_of_signal() {
        assert_eq!(Position::between(Signal::Flat, Signal::Long), Position::Buy);
        assert_eq!(Position::between(Signal::Long, Signal::Flat), Position::Sell);
        assert_eq!(Position::between(Signal::Long, Signal::Long), Position::Hold);
        assert_eq!(Position::between(Signal::Flat, Signal::Flat), Position::Hold);
        assert_eq!(Position::Hold.action(), None);
    }

    #[test]
    fn signal_row_serializes_numeric_flags() {
        let row = SignalRow {
            date: day(4),
            price: 20.0,
            sma_short: 15.0,
            sma_long: 12.5,
            signal: Signal::Long,
            position: None,
        };
        let value = serde_json::to_value(row).unwrap();
        assert_eq!(value["signal"], 1.0);
        assert!(value["position"].is_null());
        assert_eq!(value["date"], "2022-01-04");

        let event = TradeEvent { date: day(4), price: 20.0, action: Action::Sell };
        assert_eq!(serde_json::to_value(event).unwrap()["action"], "SELL");
    }
}
