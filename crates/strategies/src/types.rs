// In crates/strategies/src/types.rs

use core_types::{SignalRow, TradeEvent};
use serde::{Deserialize, Serialize};

use crate::indicators::IndicatedSeries;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MACrossoverSettings {
    /// Window of the fast average, in bars.
    pub short_window: usize,
    /// Window of the slow average, in bars. Must exceed `short_window`.
    pub long_window: usize,
}

/// Everything a presentation layer needs from one strategy evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOutput {
    pub indicated: IndicatedSeries,
    pub rows: Vec<SignalRow>,
    pub trades: Vec<TradeEvent>,
}
