use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, Level};

mod catalog;
mod config;
mod cost_engine;
mod loader;
mod report;
mod sales;

use catalog::Catalog;
use config::LogConfig;
use cost_engine::ConsoleSink;
use loader::LoadError;
use report::SalesReport;
use sales::Sale;

/// Computes the total cost of a sales record against a price catalogue.
#[derive(Parser)]
#[clap(version = "0.1.0", author = "Vance Longwill <vance@evren.co.uk>")]
struct Opts {
    /// JSON price catalogue: [{"title": .., "price": ..}, ..]
    catalog: PathBuf,
    /// JSON sales record: [{"items": [{"Product": .., "Quantity": ..}, ..]}, ..]
    sales: PathBuf,
    /// File the two-line result is written to, replacing earlier contents
    #[clap(long, default_value = "SalesResults.txt")]
    output: PathBuf,
    /// Append-only diagnostics log
    #[clap(long, default_value = "computeSales.log")]
    log_file: PathBuf,
    /// Most verbose level written to the log (error, warn, info, debug, trace)
    #[clap(long, default_value = "error")]
    log_level: Level,
}

impl Opts {
    fn log_config(&self) -> LogConfig {
        LogConfig {
            path: self.log_file.clone(),
            level: self.log_level,
        }
    }
}

fn run(opts: &Opts) -> Result<()> {
    let started = Instant::now();

    let catalog: Catalog = loader::load_json(&opts.catalog)?;
    let sales: Vec<Sale> = loader::load_json(&opts.sales)?;
    debug!(
        products = catalog.len(),
        sales = sales.len(),
        "Loaded input files"
    );

    let summary = cost_engine::total_cost(&catalog, &sales, &mut ConsoleSink);
    debug!(
        total = %summary.total,
        counted = summary.counted,
        skipped = summary.skipped,
        "Computed sales cost"
    );

    let report = SalesReport::new(summary.total, started.elapsed());
    report
        .write_to(&opts.output)
        .with_context(|| format!("unable to write results to {}", opts.output.display()))?;
    print!("{}", report);

    Ok(())
}

fn main() -> ExitCode {
    let opts: Opts = Opts::parse();

    if let Err(e) = opts.log_config().init() {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = run(&opts) {
        error!(error = %format!("{:#}", e), "Something went wrong");
        println!("Error: {}", e);
        return match e.downcast_ref::<LoadError>() {
            Some(load_error) => ExitCode::from(load_error.exit_code()),
            None => ExitCode::FAILURE,
        };
    }

    ExitCode::SUCCESS
}
