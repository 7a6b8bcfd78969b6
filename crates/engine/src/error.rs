// In crates/engine/src/error.rs

use core_types::ConfigurationError;
use thiserror::Error;

/// Why a run produced no output. Both variants are terminal.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Data for {ticker} is unavailable: {source}")]
    DataUnavailable {
        ticker: String,
        #[source]
        source: price_feed::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
