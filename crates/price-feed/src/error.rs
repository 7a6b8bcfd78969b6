// In crates/price-feed/src/error.rs

use std::path::PathBuf;

use core_types::SeriesError;
use thiserror::Error;

/// Every way a provider can fail to hand back a usable price series.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the HTTP client: {0}")]
    ClientBuildError(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("API error: code {code}, msg: {msg}")]
    ApiError { code: String, msg: String },
    #[error("No price data returned for {ticker}")]
    NoData { ticker: String },
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV header has no '{column}' column")]
    MissingColumn { column: &'static str },
    #[error("Row {row}: cannot parse {field} from '{value}'")]
    Malformed {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("Invalid price series: {0}")]
    InvalidSeries(#[from] SeriesError),
}

impl Error {
    /// True when the source answered but had nothing for the ticker/range,
    /// as opposed to a transport or parsing failure.
    pub fn is_no_data(&self) -> bool {
        match self {
            Error::NoData { .. } | Error::InvalidSeries(SeriesError::Empty { .. }) => true,
            Error::ApiError { code, .. } => code.eq_ignore_ascii_case("Not Found"),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
