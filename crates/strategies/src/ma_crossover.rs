// In crates/strategies/src/ma_crossover.rs

use crate::indicators::{self, CrossoverWindows, IndicatedSeries};
use crate::types::MACrossoverSettings;
use crate::Strategy;
use core_types::{ConfigurationError, Position, PriceSeries, Signal, SignalRow, TradeEvent};

/// Derives the regime flag and position change for every indicated row.
///
/// The first row has no predecessor, so its position is `None` rather than
/// a hold.
pub fn generate(indicated: &IndicatedSeries) -> Vec<SignalRow> {
    let mut rows = Vec::with_capacity(indicated.len());
    let mut previous: Option<Signal> = None;

    for i in 0..indicated.len() {
        let sma_short = indicated.sma_short()[i];
        let sma_long = indicated.sma_long()[i];
        let signal = Signal::from_averages(sma_short, sma_long);

        rows.push(SignalRow {
            date: indicated.dates()[i],
            price: indicated.close()[i],
            sma_short,
            sma_long,
            signal,
            position: previous.map(|prev| Position::between(prev, signal)),
        });
        previous = Some(signal);
    }

    rows
}

/// Keeps only the rows where the regime flipped, as BUY/SELL events.
pub fn trade_events(rows: &[SignalRow]) -> Vec<TradeEvent> {
    rows.iter()
        .filter_map(|row| {
            let action = row.position?.action()?;
            Some(TradeEvent { date: row.date, price: row.price, action })
        })
        .collect()
}

/// The simple moving average crossover strategy.
#[derive(Debug, Clone)]
pub struct MACrossover {
    windows: CrossoverWindows,
}

impl MACrossover {
    /// Validates the settings and builds the strategy.
    pub fn new(settings: &MACrossoverSettings) -> Result<Self, ConfigurationError> {
        let windows = CrossoverWindows::new(settings.short_window, settings.long_window)?;
        Ok(Self { windows })
    }

    pub fn from_windows(windows: CrossoverWindows) -> Self {
        Self { windows }
    }

    pub fn windows(&self) -> &CrossoverWindows {
        &self.windows
    }
}

impl Strategy for MACrossover {
    fn name(&self) -> &'static str {
        "SmaCrossover"
    }

    fn indicators(&self, series: &PriceSeries) -> IndicatedSeries {
        indicators::compute(series, &self.windows)
    }

    fn signals(&self, indicated: &IndicatedSeries) -> Vec<SignalRow> {
        generate(indicated)
    }
}
