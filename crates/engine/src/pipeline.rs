// In crates/engine/src/pipeline.rs

use app_config::RunSettings;
use core_types::{Action, ConfigurationError, DateRange, Ticker};
use events::{
    DataFetched, IndicatorsComputed, PipelineEvent, PipelineObserver, RunFailed, RunStarted,
    SignalsGenerated,
};
use price_feed::PriceSeriesProvider;
use serde::Serialize;
use strategies::{CrossoverWindows, MACrossover, MACrossoverSettings, Strategy, StrategyOutput};

use crate::error::{Error, Result};

/// A fully validated run: ticker, date range and crossover windows.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub ticker: Ticker,
    pub range: DateRange,
    pub windows: CrossoverWindows,
}

impl RunRequest {
    /// Validates raw settings. Windows are checked first, then the ticker, then the dates.
    pub fn new(
        ticker: &str,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
        strategy: &MACrossoverSettings,
    ) -> std::result::Result<Self, ConfigurationError> {
        let windows = CrossoverWindows::new(strategy.short_window, strategy.long_window)?;
        let ticker = Ticker::new(ticker)?;
        let range = DateRange::new(start, end)?;
        Ok(Self { ticker, range, windows })
    }

    pub fn from_settings(
        run: &RunSettings,
        strategy: &MACrossoverSettings,
    ) -> std::result::Result<Self, ConfigurationError> {
        Self::new(&run.ticker, run.start_date, run.end_date, strategy)
    }
}

/// The result of one successful run, ready for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyRun {
    pub ticker: Ticker,
    pub range: DateRange,
    pub strategy: &'static str,
    pub short_window: usize,
    pub long_window: usize,
    #[serde(flatten)]
    pub output: StrategyOutput,
}

/// Fetch → indicators → signals, reporting progress to an observer.
pub struct Pipeline {
    provider: Box<dyn PriceSeriesProvider>,
}

impl Pipeline {
    pub fn new(provider: Box<dyn PriceSeriesProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Validates raw settings and runs. Invalid settings never reach the provider.
    pub async fn run_with_settings(
        &self,
        run: &RunSettings,
        strategy: &MACrossoverSettings,
        observer: &mut dyn PipelineObserver,
    ) -> Result<StrategyRun> {
        let request = RunRequest::from_settings(run, strategy)?;
        self.run(&request, observer).await
    }

    /// Runs the pipeline once. A provider failure aborts the run with no partial output.
    pub async fn run(
        &self,
        request: &RunRequest,
        observer: &mut dyn PipelineObserver,
    ) -> Result<StrategyRun> {
        let strategy = MACrossover::from_windows(request.windows.clone());

        observer.on_event(&PipelineEvent::RunStarted(RunStarted {
            ticker: request.ticker.to_string(),
            provider: self.provider.name().to_string(),
            start: request.range.start(),
            end: request.range.end(),
            short_window: request.windows.short(),
            long_window: request.windows.long(),
        }));

        // --- 1. Fetch Data ---
        let series = match self.provider.fetch(&request.ticker, &request.range).await {
            Ok(series) => series,
            Err(source) => {
                observer.on_event(&PipelineEvent::RunFailed(RunFailed {
                    ticker: request.ticker.to_string(),
                    reason: source.to_string(),
                }));
                return Err(Error::DataUnavailable {
                    ticker: request.ticker.to_string(),
                    source,
                });
            }
        };

        observer.on_event(&PipelineEvent::DataFetched(DataFetched {
            ticker: series.ticker().to_string(),
            bars: series.len(),
            first: series.first_date(),
            last: series.last_date(),
        }));

        // --- 2. Add Moving Averages ---
        let indicated = strategy.indicators(&series);
        observer.on_event(&PipelineEvent::IndicatorsComputed(IndicatorsComputed {
            short_window: indicated.short_window(),
            long_window: indicated.long_window(),
            rows: indicated.len(),
        }));

        // --- 3. Generate Trading Signals ---
        let rows = strategy.signals(&indicated);
        let trades = strategies::trade_events(&rows);
        observer.on_event(&PipelineEvent::SignalsGenerated(SignalsGenerated {
            rows: rows.len(),
            buys: trades.iter().filter(|t| t.action == Action::Buy).count(),
            sells: trades.iter().filter(|t| t.action == Action::Sell).count(),
        }));
        for trade in &trades {
            observer.on_event(&PipelineEvent::CrossoverDetected(*trade));
        }

        Ok(StrategyRun {
            ticker: request.ticker.clone(),
            range: request.range,
            strategy: strategy.name(),
            short_window: request.windows.short(),
            long_window: request.windows.long(),
            output: StrategyOutput { indicated, rows, trades },
        })
    }
}
