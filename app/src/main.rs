// In app/src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use app_config::{ProviderSource, Settings};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Pipeline, StrategyRun};
use events::{EventLog, PipelineObserver, TracingObserver};
use tracing_subscriber::prelude::*;

mod export;
mod report;

use crate::export::ExportDocument;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Simple moving average crossover signals for daily stock prices.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetches prices, generates signals and prints the simulated trade log.
    Run {
        #[command(flatten)]
        args: RunArgs,

        /// Number of signal rows to show in the sample table.
        #[arg(long, default_value_t = 10)]
        sample_rows: usize,
    },

    /// Writes the indicator series, signal table and trade log as JSON.
    Export {
        #[command(flatten)]
        args: RunArgs,

        /// Destination file for the JSON document.
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Overrides for the `[run]` and `[strategy]` config sections.
#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// The ticker symbol to analyse (e.g., "AAPL").
    #[arg(short, long)]
    ticker: Option<String>,

    /// Start date in YYYY-MM-DD format.
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// End date in YYYY-MM-DD format (exclusive).
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Short SMA window, in bars.
    #[arg(long)]
    short_window: Option<usize>,

    /// Long SMA window, in bars.
    #[arg(long)]
    long_window: Option<usize>,

    /// Read prices from this CSV file instead of the configured provider.
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl RunArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(ticker) = &self.ticker {
            settings.run.ticker = ticker.clone();
        }
        if let Some(start) = self.start_date {
            settings.run.start_date = start;
        }
        if let Some(end) = self.end_date {
            settings.run.end_date = end;
        }
        if let Some(short) = self.short_window {
            settings.strategy.short_window = short;
        }
        if let Some(long) = self.long_window {
            settings.strategy.long_window = long;
        }
        if let Some(path) = &self.csv {
            settings.provider.source = ProviderSource::Csv;
            settings.provider.csv.path_template = path.to_string_lossy().into_owned();
        }
    }
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let mut settings = app_config::load_settings()?;
    let run_args = match &cli.command {
        Commands::Run { args, .. } | Commands::Export { args, .. } => args,
    };
    run_args.apply(&mut settings);

    init_logging(&settings.app.log_level);
    tracing::info!(environment = %settings.app.environment, "Application settings loaded successfully.");

    // Match on the parsed command and call the appropriate handler.
    let code = match cli.command {
        Commands::Run { sample_rows, .. } => handle_run(&settings, sample_rows).await?,
        Commands::Export { output, .. } => handle_export(&settings, output).await?,
    };

    Ok(code)
}

/// Logs go to stderr so the report on stdout stays clean.
fn init_logging(log_level: &str) {
    let level = log_level.parse().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new()
            .with_target("reqwest", tracing::Level::WARN) // Keep HTTP internals quiet
            .with_target("hyper", tracing::Level::WARN)
            .with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Builds the provider and runs the pipeline. `None` means the run failed and
/// the user has already been told why.
async fn execute(settings: &Settings, observer: &mut dyn PipelineObserver) -> Result<Option<(StrategyRun, &'static str)>> {
    let provider = price_feed::from_settings(&settings.provider)?;
    let pipeline = Pipeline::new(provider);

    match pipeline.run_with_settings(&settings.run, &settings.strategy, observer).await {
        Ok(run) => Ok(Some((run, pipeline.provider_name()))),
        Err(e) => {
            eprintln!("{}", report::failure_message(&e));
            Ok(None)
        }
    }
}

// --- "Run" Subcommand Logic ---

/// Prints the simulated trade log followed by samples of the signal table.
async fn handle_run(settings: &Settings, sample_rows: usize) -> Result<ExitCode> {
    let mut observer = TracingObserver;
    let Some((run, _)) = execute(settings, &mut observer).await? else {
        return Ok(ExitCode::FAILURE);
    };

    report::print_trade_log(&run.output.trades);
    report::print_samples(&run.output.rows, sample_rows);

    Ok(ExitCode::SUCCESS)
}

// --- "Export" Subcommand Logic ---

/// Writes the run, together with the pipeline events it produced, as JSON.
async fn handle_export(settings: &Settings, output: PathBuf) -> Result<ExitCode> {
    let mut observer = (TracingObserver, EventLog::new());
    let Some((run, provider)) = execute(settings, &mut observer).await? else {
        return Ok(ExitCode::FAILURE);
    };

    let document = ExportDocument {
        provider,
        run: &run,
        events: observer.1.events(),
    };
    export::write_json(&output, &document)?;
    tracing::info!(path = %output.display(), rows = run.output.rows.len(), "Export written.");

    Ok(ExitCode::SUCCESS)
}
