// In crates/price-feed/src/lib.rs

use app_config::{ProviderSettings, ProviderSource};
use async_trait::async_trait;
use core_types::{DateRange, PriceSeries, Ticker};

pub mod csv_file;
pub mod error;
pub mod types;
pub mod yahoo;

// Re-export public types
pub use csv_file::CsvProvider;
pub use error::{Error, Result};
pub use yahoo::YahooProvider;

/// The universal interface for a source of historical prices.
///
/// A provider either returns a non-empty, date-ordered series covering the
/// requested half-open range, or an `Error`. Callers treat every error the
/// same way: the data is unavailable.
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// The name of the provider (e.g., "yahoo", "csv").
    fn name(&self) -> &'static str;

    /// Fetches the daily bars for `ticker` within `range`.
    async fn fetch(&self, ticker: &Ticker, range: &DateRange) -> Result<PriceSeries>;
}

/// Builds the provider selected in the settings.
pub fn from_settings(settings: &ProviderSettings) -> Result<Box<dyn PriceSeriesProvider>> {
    let provider: Box<dyn PriceSeriesProvider> = match settings.source {
        ProviderSource::Yahoo => Box::new(YahooProvider::new(&settings.yahoo, settings.adjusted_close)?),
        ProviderSource::Csv => Box::new(CsvProvider::new(&settings.csv, settings.adjusted_close)),
    };
    Ok(provider)
}
