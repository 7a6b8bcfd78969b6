//! Integration tests for the CSV file provider against files on disk.

use app_config::CsvSettings;
use chrono::NaiveDate;
use core_types::{DateRange, Ticker};
use price_feed::{CsvProvider, Error, PriceSeriesProvider};

fn provider(dir: &tempfile::TempDir) -> CsvProvider {
    let settings = CsvSettings {
        path_template: format!("{}/{{ticker}}.csv", dir.path().display()),
    };
    CsvProvider::new(&settings, true)
}

fn january() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2022, 2, 1).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn reads_the_file_named_after_the_ticker() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("AAPL.csv"),
        "Date,Close,Adj Close\n2022-01-04,179.70,177.66\n2022-01-03,182.01,179.95\n2022-02-01,174.61,172.67\n",
    )
    .unwrap();

    let provider = provider(&dir);
    let ticker = Ticker::new("aapl").unwrap();
    assert_eq!(provider.path_for(&ticker), dir.path().join("AAPL.csv"));

    let series = provider.fetch(&ticker, &january()).await.unwrap();

    let closes: Vec<f64> = series.closes().collect();
    assert_eq!(closes, vec![179.95, 177.66]);
    assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2022, 1, 3).unwrap());
    assert_eq!(provider.name(), "csv");
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = provider(&dir)
        .fetch(&Ticker::new("MSFT").unwrap(), &january())
        .await
        .unwrap_err();

    match &err {
        Error::Io { path, .. } => assert_eq!(path, &dir.path().join("MSFT.csv")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.is_no_data());
}
