// In crates/core-types/src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

/// A run configuration that must be rejected before any data is fetched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Ticker symbol must not be empty")]
    EmptyTicker,

    #[error("Start date {start} must be before end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("The {name} window must be a positive integer")]
    ZeroWindow { name: &'static str },

    #[error("Long window must be greater than the short window (short = {short}, long = {long})")]
    WindowOrder { short: usize, long: usize },
}

/// A price series that breaks the ordering or value invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Price series for {ticker} is empty")]
    Empty { ticker: String },

    #[error("Bar {index} ({date}) is not strictly after the previous bar")]
    Unordered { index: usize, date: NaiveDate },

    #[error("Bar {index} ({date}) has an invalid close price {close}")]
    InvalidClose { index: usize, date: NaiveDate, close: f64 },
}
