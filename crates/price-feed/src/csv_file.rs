// In crates/price-feed/src/csv_file.rs

use std::io::Read;
use std::path::PathBuf;

use app_config::CsvSettings;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{DateRange, PriceBar, PriceSeries, Ticker};

use crate::error::{Error, Result};
use crate::PriceSeriesProvider;

/// Reads daily bars from a local CSV export (e.g. a Yahoo "Download" file).
#[derive(Debug, Clone)]
pub struct CsvProvider {
    path_template: String,
    adjusted_close: bool,
}

impl CsvProvider {
    pub fn new(settings: &CsvSettings, adjusted_close: bool) -> Self {
        Self {
            path_template: settings.path_template.clone(),
            adjusted_close,
        }
    }

    /// The file backing `ticker`, with `{ticker}` substituted.
    pub fn path_for(&self, ticker: &Ticker) -> PathBuf {
        PathBuf::from(self.path_template.replace("{ticker}", ticker.as_str()))
    }
}

#[async_trait]
impl PriceSeriesProvider for CsvProvider {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn fetch(&self, ticker: &Ticker, range: &DateRange) -> Result<PriceSeries> {
        let path = self.path_for(ticker);
        tracing::debug!(path = %path.display(), "Reading price file.");

        let content = tokio::fs::read(&path)
            .await
            .map_err(|source| Error::Io { path: path.clone(), source })?;

        read_series(content.as_slice(), ticker, range, self.adjusted_close)
    }
}

/// Parses a headed CSV with a date column and a close column into a series.
///
/// The close column is `Adj Close` when `adjusted_close` is set and the file
/// has one, `Close` otherwise. Empty or `null` closes are skipped.
pub fn read_series<R: Read>(
    reader: R,
    ticker: &Ticker,
    range: &DateRange,
    adjusted_close: bool,
) -> Result<PriceSeries> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let date_idx = find("date").ok_or(Error::MissingColumn { column: "Date" })?;
    let close_idx = adjusted_close
        .then(|| find("adj close"))
        .flatten()
        .or_else(|| find("close"))
        .ok_or(Error::MissingColumn { column: "Close" })?;

    let mut bars = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1.
        let row = i + 2;

        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| Error::Malformed {
            row,
            field: "date",
            value: raw_date.to_string(),
        })?;
        if !range.contains(date) {
            continue;
        }

        let raw_close = record.get(close_idx).unwrap_or_default();
        if raw_close.is_empty() || raw_close.eq_ignore_ascii_case("null") {
            continue;
        }
        let close: f64 = raw_close.parse().map_err(|_| Error::Malformed {
            row,
            field: "close",
            value: raw_close.to_string(),
        })?;

        bars.push(PriceBar { date, close });
    }

    if bars.is_empty() {
        return Err(Error::NoData { ticker: ticker.to_string() });
    }

    bars.sort_by_key(|bar| bar.date);
    Ok(PriceSeries::new(ticker.clone(), bars)?)
}

/// Accepts `YYYY-MM-DD`, ignoring any trailing time part.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
