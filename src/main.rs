use std::{path::PathBuf, process, str::FromStr};

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use vendas::{Aggregator, CsvAggregator, Renderer, ReportFormat, SalesReport};

/// Analyses a sales CSV file, with date filters and text or JSON output.
#[derive(Debug, Parser)]
#[command(name = "vendas", version, about)]
struct Cli {
    /// Path to the sales CSV file.
    csv_file: PathBuf,

    /// Start of the date filter (YYYY-MM-DD), inclusive.
    #[arg(long)]
    data_inicio: Option<String>,

    /// End of the date filter (YYYY-MM-DD), inclusive.
    #[arg(long)]
    data_fim: Option<String>,

    /// Report format: "text" or "json".
    #[arg(long, default_value = "text", value_parser = ReportFormat::from_str)]
    format: ReportFormat,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    let mut aggregator = CsvAggregator::new(cli.csv_file);
    aggregator.set_date_filter(cli.data_inicio, cli.data_fim);
    let summary = aggregator.aggregate()?;

    let mut report = SalesReport::new(summary, cli.format);
    report.render();
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run() {
        error!("{err:#}");
        process::exit(1);
    }
}
