// In crates/app-config/src/types.rs

use chrono::NaiveDate;
use serde::Deserialize;
use strategies::types::MACrossoverSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// The default ticker and date range to analyse.
    pub run: RunSettings,
    /// The moving-average windows for the crossover strategy.
    pub strategy: MACrossoverSettings,
    /// Where historical prices come from.
    pub provider: ProviderSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RunSettings {
    pub ticker: String,
    pub start_date: NaiveDate,
    /// Exclusive upper bound of the date range.
    pub end_date: NaiveDate,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderSource {
    Yahoo,
    Csv,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProviderSettings {
    pub source: ProviderSource,
    /// Use dividend/split adjusted closes when the source offers them.
    #[serde(default = "default_adjusted_close")]
    pub adjusted_close: bool,
    #[serde(default)]
    pub yahoo: YahooSettings,
    #[serde(default)]
    pub csv: CsvSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct YahooSettings {
    /// The REST base URL for the Yahoo Finance chart API.
    #[serde(default = "default_yahoo_base_url")]
    pub base_url: String,
    /// Yahoo rejects requests without a browser-like user agent.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for YahooSettings {
    fn default() -> Self {
        Self {
            base_url: default_yahoo_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CsvSettings {
    /// File path with a `{ticker}` placeholder, e.g. `data/{ticker}.csv`.
    #[serde(default = "default_path_template")]
    pub path_template: String,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self { path_template: default_path_template() }
    }
}

/// Helper functions for serde defaults
fn default_adjusted_close() -> bool { true }
fn default_yahoo_base_url() -> String { "https://query1.finance.yahoo.com".into() }
fn default_user_agent() -> String { "Mozilla/5.0 (X11; Linux x86_64) crossover/0.1".into() }
fn default_timeout_secs() -> u64 { 30 }
fn default_path_template() -> String { "data/{ticker}.csv".into() }
