// --- Pipeline Event Structures ---

use chrono::NaiveDate;
use core_types::{Action, TradeEvent};
use serde::Serialize;

/// A run was accepted and the provider is about to be queried.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStarted {
    pub ticker: String,
    pub provider: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub short_window: usize,
    pub long_window: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataFetched {
    pub ticker: String,
    pub bars: usize,
    pub first: NaiveDate,
    pub last: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorsComputed {
    pub short_window: usize,
    pub long_window: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalsGenerated {
    pub rows: usize,
    pub buys: usize,
    pub sells: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunFailed {
    pub ticker: String,
    pub reason: String,
}

/// The top-level pipeline event enum.
/// `tag` and `content` are used by serde for clean JSON representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum PipelineEvent {
    RunStarted(RunStarted),
    DataFetched(DataFetched),
    IndicatorsComputed(IndicatorsComputed),
    SignalsGenerated(SignalsGenerated),
    CrossoverDetected(TradeEvent),
    RunFailed(RunFailed),
}

/// Consumes pipeline events. The pipeline itself never logs.
pub trait PipelineObserver {
    fn on_event(&mut self, event: &PipelineEvent);
}

/// Forwards every event to `tracing` as a structured record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::RunStarted(e) => tracing::info!(
                ticker = %e.ticker,
                provider = %e.provider,
                start = %e.start,
                end = %e.end,
                "Fetching data for {} from {} to {}...", e.ticker, e.start, e.end
            ),
            PipelineEvent::DataFetched(e) => tracing::info!(
                ticker = %e.ticker,
                bars = e.bars,
                first = %e.first,
                last = %e.last,
                "Data fetched successfully."
            ),
            PipelineEvent::IndicatorsComputed(e) => tracing::info!(
                short_window = e.short_window,
                long_window = e.long_window,
                rows = e.rows,
                "Moving averages calculated."
            ),
            PipelineEvent::SignalsGenerated(e) => tracing::info!(
                rows = e.rows,
                buys = e.buys,
                sells = e.sells,
                "Signals generated."
            ),
            PipelineEvent::CrossoverDetected(trade) => match trade.action {
                Action::Buy => tracing::debug!(date = %trade.date, price = trade.price, "Bullish crossover."),
                Action::Sell => tracing::debug!(date = %trade.date, price = trade.price, "Bearish crossover."),
            },
            PipelineEvent::RunFailed(e) => {
                tracing::error!(ticker = %e.ticker, reason = %e.reason, "Run aborted.")
            }
        }
    }
}

/// Records every event in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<PipelineEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PipelineEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<PipelineEvent> {
        self.events
    }
}

impl PipelineObserver for EventLog {
    fn on_event(&mut self, event: &PipelineEvent) {
        self.events.push(event.clone());
    }
}

/// Fans one event out to several observers.
impl<A: PipelineObserver, B: PipelineObserver> PipelineObserver for (A, B) {
    fn on_event(&mut self, event: &PipelineEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }
}
