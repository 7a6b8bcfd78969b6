// In crates/core-types/src/lib.rs

pub mod error;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{ConfigurationError, SeriesError};
pub use types::{
    Action, DateRange, Position, PriceBar, PriceSeries, Signal, SignalRow, Ticker, TradeEvent,
};
