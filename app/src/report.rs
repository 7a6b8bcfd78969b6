// In app/src/report.rs

use core_types::{ConfigurationError, Position, SignalRow, TradeEvent};

/// How many flagged rows the "Sample of Trades" table shows.
const TRADE_SAMPLE_ROWS: usize = 5;

/// The user-facing message for a failed run.
pub fn failure_message(err: &engine::Error) -> String {
    match err {
        engine::Error::Configuration(ConfigurationError::WindowOrder { .. }) => {
            "Error: Long window must be greater than the short window.".to_string()
        }
        engine::Error::Configuration(e) => format!("Error: {e}."),
        engine::Error::DataUnavailable { ticker, source } if source.is_no_data() => {
            format!("No data found for {ticker}. It might be delisted or the ticker is incorrect.")
        }
        engine::Error::DataUnavailable { source, .. } => {
            format!("An error occurred while fetching data: {source}")
        }
    }
}

/// One simulated execution line, e.g. `2022-03-15: BUY signal at price $155.09`.
pub fn trade_line(trade: &TradeEvent) -> String {
    format!("{}: {} signal at price ${:.2}", trade.date, trade.action, trade.price)
}

/// Prints the simulated trade log.
pub fn print_trade_log(trades: &[TradeEvent]) {
    println!("\n-- Executing Trades --");
    for trade in trades {
        println!("{}", trade_line(trade));
    }
    println!("\n-- Trade simulation complete --\n");
}

/// Renders rows as a fixed-width table. The undefined first position prints as `NaN`.
pub fn signal_table(rows: &[SignalRow]) -> String {
    let mut out = format!(
        "{:<10}  {:>10}  {:>10}  {:>10}  {:>6}  {:>9}\n",
        "Date", "price", "SMA_Short", "SMA_Long", "signal", "positions"
    );
    for row in rows {
        let position = match row.position {
            Some(p) => format!("{:.1}", f64::from(p.as_i8())),
            None => "NaN".to_string(),
        };
        out.push_str(&format!(
            "{:<10}  {:>10.4}  {:>10.4}  {:>10.4}  {:>6.1}  {:>9}\n",
            row.date.to_string(),
            row.price,
            row.sma_short,
            row.sma_long,
            row.signal.as_f64(),
            position
        ));
    }
    out
}

/// Rows whose position is not a hold. The undefined first row counts.
pub fn trade_sample(rows: &[SignalRow]) -> Vec<SignalRow> {
    rows.iter()
        .filter(|row| row.position != Some(Position::Hold))
        .take(TRADE_SAMPLE_ROWS)
        .copied()
        .collect()
}

/// Prints the head of the signal table and the first flagged rows.
pub fn print_samples(rows: &[SignalRow], sample_rows: usize) {
    println!("--- Sample of Generated Signals ---");
    print!("{}", signal_table(&rows[..sample_rows.min(rows.len())]));
    println!("\n--- Sample of Trades ---");
    print!("{}", signal_table(&trade_sample(rows)));
}
