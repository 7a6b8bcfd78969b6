// In crates/price-feed/src/yahoo.rs

use std::time::Duration;

use app_config::YahooSettings;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use core_types::{DateRange, PriceBar, PriceSeries, Ticker};
use reqwest::Client;

use crate::error::{Error, Result};
use crate::types::{ChartResponse, ChartResult};
use crate::PriceSeriesProvider;

const SECONDS_PER_DAY: i64 = 86_400;

/// Daily price history from the Yahoo Finance chart API.
#[derive(Debug, Clone)]
pub struct YahooProvider {
    /// The persistent HTTP client.
    http_client: Client,
    /// The base URL for the chart API, without a trailing slash.
    base_url: String,
    /// Read `adjclose` instead of the raw close.
    adjusted_close: bool,
}

impl YahooProvider {
    /// Constructs a new provider from `YahooSettings`.
    pub fn new(settings: &YahooSettings, adjusted_close: bool) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(YahooProvider {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            adjusted_close,
        })
    }

    /// Fetches the raw daily chart for a ticker.
    ///
    /// This corresponds to the `GET /v8/finance/chart/{symbol}` endpoint.
    ///
    /// # Arguments
    ///
    /// * `ticker`: The symbol to fetch (e.g., "AAPL").
    /// * `range`: The half-open date range. `period1` starts a day early so
    ///   exchanges east of UTC keep their first session; `bars_from_chart`
    ///   clips on exchange-local dates.
    pub async fn get_daily_chart(&self, ticker: &Ticker, range: &DateRange) -> Result<ChartResult> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker.as_str());
        let period1 = (midnight_utc(range.start()) - SECONDS_PER_DAY).to_string();
        let period2 = midnight_utc(range.end()).to_string();

        tracing::debug!(%url, period1, period2, "Requesting daily chart.");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
                ("interval", "1d"),
                ("events", "history"),
                ("includeAdjustedClose", "true"),
            ])
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::RequestFailed)?;

        let parsed: ChartResponse = serde_json::from_str(&body).map_err(|e| {
            // Non-JSON bodies come with HTTP errors (rate limiting, gateway pages).
            if status.is_success() {
                Error::DeserializationFailed(e)
            } else {
                Error::ApiError {
                    code: status.as_u16().to_string(),
                    msg: status.canonical_reason().unwrap_or("Unknown error").to_string(),
                }
            }
        })?;

        // Yahoo returns an error object on failure, so we check for that first.
        if let Some(error) = parsed.chart.error {
            return Err(Error::ApiError { code: error.code, msg: error.description });
        }

        parsed
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| Error::NoData { ticker: ticker.to_string() })
    }
}

#[async_trait]
impl PriceSeriesProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch(&self, ticker: &Ticker, range: &DateRange) -> Result<PriceSeries> {
        let chart = self.get_daily_chart(ticker, range).await?;
        let bars = bars_from_chart(&chart, range, self.adjusted_close)?;
        if bars.is_empty() {
            return Err(Error::NoData { ticker: ticker.to_string() });
        }
        Ok(PriceSeries::new(ticker.clone(), bars)?)
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Converts the column-oriented chart into daily bars inside `range`.
///
/// Bars with a null close are dropped. When two bars land on the same
/// exchange-local date, the later one wins.
pub fn bars_from_chart(chart: &ChartResult, range: &DateRange, adjusted_close: bool) -> Result<Vec<PriceBar>> {
    let adjusted = chart
        .indicators
        .adjclose
        .first()
        .map(|a| a.adjclose.as_slice())
        .filter(|closes| adjusted_close && !closes.is_empty());
    let closes = match adjusted {
        Some(closes) => closes,
        None => chart
            .indicators
            .quote
            .first()
            .map(|q| q.close.as_slice())
            .unwrap_or_default(),
    };

    let offset = chart.meta.gmtoffset;
    let mut bars: Vec<PriceBar> = Vec::with_capacity(chart.timestamp.len());

    for (row, (&timestamp, close)) in chart.timestamp.iter().zip(closes).enumerate() {
        let Some(close) = *close else { continue };
        let date = timestamp
            .checked_add(offset)
            .and_then(|local| DateTime::from_timestamp(local, 0))
            .ok_or_else(|| Error::Malformed {
                row,
                field: "timestamp",
                value: timestamp.to_string(),
            })?
            .date_naive();

        if !range.contains(date) {
            continue;
        }

        match bars.last_mut() {
            Some(last) if last.date == date => last.close = close,
            _ => bars.push(PriceBar { date, close }),
        }
    }

    Ok(bars)
}
