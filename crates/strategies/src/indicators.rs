// In crates/strategies/src/indicators.rs

use chrono::NaiveDate;
use core_types::{ConfigurationError, PriceSeries, Ticker};
use serde::Serialize;
use ta::indicators::SimpleMovingAverage as Sma;
use ta::{Next, Period};

/// A validated pair of SMA windows with `long > short > 0`.
///
/// Holds unfed `ta` indicator prototypes; every `compute` call clones them
/// so runs never share state.
#[derive(Debug, Clone)]
pub struct CrossoverWindows {
    short: Sma,
    long: Sma,
}

impl CrossoverWindows {
    pub fn new(short_window: usize, long_window: usize) -> Result<Self, ConfigurationError> {
        let short = Sma::new(short_window)
            .map_err(|_| ConfigurationError::ZeroWindow { name: "short" })?;
        let long = Sma::new(long_window)
            .map_err(|_| ConfigurationError::ZeroWindow { name: "long" })?;

        if long_window <= short_window {
            return Err(ConfigurationError::WindowOrder {
                short: short_window,
                long: long_window,
            });
        }

        Ok(Self { short, long })
    }

    pub fn short(&self) -> usize {
        self.short.period()
    }

    pub fn long(&self) -> usize {
        self.long.period()
    }
}

impl PartialEq for CrossoverWindows {
    fn eq(&self, other: &Self) -> bool {
        self.short() == other.short() && self.long() == other.long()
    }
}

/// Close prices with their short and long moving averages, index-aligned to the source series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatedSeries {
    ticker: Ticker,
    short_window: usize,
    long_window: usize,
    dates: Vec<NaiveDate>,
    close: Vec<f64>,
    sma_short: Vec<f64>,
    sma_long: Vec<f64>,
}

impl IndicatedSeries {
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn short_window(&self) -> usize {
        self.short_window
    }

    pub fn long_window(&self) -> usize {
        self.long_window
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn sma_short(&self) -> &[f64] {
        &self.sma_short
    }

    pub fn sma_long(&self) -> &[f64] {
        &self.sma_long
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}

/// Computes the short and long simple moving averages over the close prices.
///
/// Until a window has filled, the average is taken over the samples seen so
/// far, so every index has a defined value. A window holding one repeated
/// close averages to exactly that close.
pub fn compute(series: &PriceSeries, windows: &CrossoverWindows) -> IndicatedSeries {
    let mut short = windows.short.clone();
    let mut long = windows.long.clone();

    let len = series.len();
    let mut dates = Vec::with_capacity(len);
    let mut close = Vec::with_capacity(len);
    let mut sma_short = Vec::with_capacity(len);
    let mut sma_long = Vec::with_capacity(len);

    // Length of the trailing run of bars sharing the current close.
    let mut run = 0;

    for (i, bar) in series.bars().iter().enumerate() {
        run = match close.last() {
            Some(&previous) if previous == bar.close => run + 1,
            _ => 1,
        };
        let seen = i + 1;

        dates.push(bar.date);
        close.push(bar.close);
        sma_short.push(settle(short.next(bar.close), bar.close, run, seen.min(windows.short())));
        sma_long.push(settle(long.next(bar.close), bar.close, run, seen.min(windows.long())));
    }

    IndicatedSeries {
        ticker: series.ticker().clone(),
        short_window: windows.short(),
        long_window: windows.long(),
        dates,
        close,
        sma_short,
        sma_long,
    }
}

/// `ta` keeps a running sum that drifts by a few ulps. A window holding only
/// `close` returns `close` exactly.
fn settle(mean: f64, close: f64, run: usize, samples: usize) -> f64 {
    if run >= samples { close } else { mean }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use core_types::PriceBar;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar { date: start + Duration::days(i as i64), close })
            .collect();
        PriceSeries::new(Ticker::new("TEST").unwrap(), bars).unwrap()
    }

    fn naive_mean(closes: &[f64], i: usize, window: usize) -> f64 {
        let from = (i + 1).saturating_sub(window);
        let slice = &closes[from..=i];
        slice.iter().sum::<f64>() / slice.len() as f64
    }

    #[test]
    fn windows_reject_long_not_greater_than_short() {
        assert_eq!(
            CrossoverWindows::new(100, 40).unwrap_err(),
            ConfigurationError::WindowOrder { short: 100, long: 40 }
        );
        assert_eq!(
            CrossoverWindows::new(20, 20).unwrap_err(),
            ConfigurationError::WindowOrder { short: 20, long: 20 }
        );
        assert_eq!(
            CrossoverWindows::new(0, 5).unwrap_err(),
            ConfigurationError::ZeroWindow { name: "short" }
        );
        assert_eq!(
            CrossoverWindows::new(3, 0).unwrap_err(),
            ConfigurationError::ZeroWindow { name: "long" }
        );

        let windows = CrossoverWindows::new(40, 100).unwrap();
        assert_eq!((windows.short(), windows.long()), (40, 100));
    }

    #[test]
    fn expanding_then_sliding_window() {
        let closes = [10.0, 10.0, 10.0, 20.0, 20.0, 20.0, 20.0, 10.0, 10.0, 10.0];
        let windows = CrossoverWindows::new(2, 4).unwrap();
        let indicated = compute(&series(&closes), &windows);

        assert_eq!(
            indicated.sma_short(),
            &[10.0, 10.0, 10.0, 15.0, 20.0, 20.0, 20.0, 15.0, 10.0, 10.0]
        );
        assert_eq!(
            indicated.sma_long(),
            &[10.0, 10.0, 10.0, 12.5, 15.0, 17.5, 20.0, 17.5, 15.0, 12.5]
        );
        assert_eq!(indicated.close(), &closes);
        assert_eq!(indicated.len(), closes.len());
    }

    #[test]
    fn averages_match_mean_of_trailing_window() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.13)
            .collect();
        let windows = CrossoverWindows::new(5, 21).unwrap();
        let indicated = compute(&series(&closes), &windows);

        for i in 0..closes.len() {
            assert!((indicated.sma_short()[i] - naive_mean(&closes, i, 5)).abs() < 1e-9);
            assert!((indicated.sma_long()[i] - naive_mean(&closes, i, 21)).abs() < 1e-9);
        }
    }

    #[test]
    fn uniform_windows_average_to_the_repeated_close() {
        // Two-decimal walk, then a flat tail at the last price.
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut closes: Vec<f64> = (0..60)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 33) % 40_000) as f64 / 100.0 + 50.0
            })
            .collect();
        let flat = *closes.last().unwrap();
        let tail_start = closes.len();
        closes.extend(std::iter::repeat(flat).take(10));

        let windows = CrossoverWindows::new(3, 7).unwrap();
        let indicated = compute(&series(&closes), &windows);

        for i in tail_start + 2..closes.len() {
            assert_eq!(indicated.sma_short()[i], flat);
        }
        for i in tail_start + 6..closes.len() {
            assert_eq!(indicated.sma_long()[i], flat);
        }
    }

    #[test]
    fn single_bar_averages_equal_close() {
        let windows = CrossoverWindows::new(40, 100).unwrap();
        let indicated = compute(&series(&[42.5]), &windows);
        assert_eq!(indicated.sma_short(), &[42.5]);
        assert_eq!(indicated.sma_long(), &[42.5]);
    }

    #[test]
    fn repeated_compute_does_not_leak_state() {
        let windows = CrossoverWindows::new(2, 3).unwrap();
        let data = series(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(compute(&data, &windows), compute(&data, &windows));
    }
}
