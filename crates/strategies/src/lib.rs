// In crates/strategies/src/lib.rs

use core_types::{PriceSeries, SignalRow};
pub mod indicators;
pub mod ma_crossover;
pub mod types;

pub use indicators::{CrossoverWindows, IndicatedSeries};
pub use ma_crossover::{generate, trade_events, MACrossover};
pub use types::{MACrossoverSettings, StrategyOutput};

/// The universal interface for a signal strategy.
///
/// A strategy turns a fetched price series into indicator columns and then
/// into a signal table. Both steps are pure: the same series always yields
/// the same output.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    fn indicators(&self, series: &PriceSeries) -> IndicatedSeries;

    fn signals(&self, indicated: &IndicatedSeries) -> Vec<SignalRow>;

    /// Runs both steps and derives the trade log.
    fn evaluate(&self, series: &PriceSeries) -> StrategyOutput {
        let indicated = self.indicators(series);
        let rows = self.signals(&indicated);
        let trades = trade_events(&rows);
        StrategyOutput { indicated, rows, trades }
    }
}
