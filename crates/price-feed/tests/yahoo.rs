//! Integration tests for the Yahoo chart provider against a mocked HTTP API.

use app_config::YahooSettings;
use chrono::NaiveDate;
use core_types::{DateRange, Ticker};
use price_feed::{Error, PriceSeriesProvider, YahooProvider};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> YahooProvider {
    let settings = YahooSettings {
        base_url: format!("{}/", server.uri()),
        user_agent: "crossover-tests".into(),
        timeout_secs: 5,
    };
    YahooProvider::new(&settings, true).unwrap()
}

fn january() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2022, 2, 1).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn fetches_adjusted_daily_bars() {
    let server = MockServer::start().await;
    let body = json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "currency": "USD", "gmtoffset": -18000 },
                "timestamp": [1641220200, 1641306600, 1641393000],
                "indicators": {
                    "quote": [{ "close": [182.01, 179.70, 174.92] }],
                    "adjclose": [{ "adjclose": [179.95, 177.66, null] }]
                }
            }],
            "error": null
        }
    });

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .and(query_param("interval", "1d"))
        .and(query_param("period1", "1640908800"))
        .and(query_param("period2", "1643673600"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let series = provider(&server)
        .fetch(&Ticker::new("aapl").unwrap(), &january())
        .await
        .unwrap();

    let closes: Vec<f64> = series.closes().collect();
    assert_eq!(closes, vec![179.95, 177.66]);
    assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2022, 1, 3).unwrap());
}

#[tokio::test]
async fn surfaces_chart_errors() {
    let server = MockServer::start().await;
    let body = json!({
        "chart": {
            "result": null,
            "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
        }
    });

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NOPE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(body))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch(&Ticker::new("NOPE").unwrap(), &january())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ApiError { ref code, .. } if code == "Not Found"));
    assert!(err.is_no_data());
}

#[tokio::test]
async fn empty_chart_is_no_data() {
    let server = MockServer::start().await;
    let body = json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "gmtoffset": -18000 },
                "indicators": { "quote": [{}] }
            }],
            "error": null
        }
    });

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch(&Ticker::new("AAPL").unwrap(), &january())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoData { ref ticker } if ticker == "AAPL"));
}

#[tokio::test]
async fn non_json_error_pages_become_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch(&Ticker::new("AAPL").unwrap(), &january())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ApiError { ref code, .. } if code == "429"));
    assert!(!err.is_no_data());
}
