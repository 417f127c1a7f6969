//! Fixed Ops overview report.
//!
//! Reads a dealership's repair-order line items, keeps the ones closed in the
//! requested window (and, optionally, of one labor/service classification),
//! and writes a drillable Dealer → ... → RO rollup of sales, gross and
//! productivity metrics to CSV.
mod aggregate;
mod calendar;
mod config;
mod error;
mod filter;
mod loader;
mod metrics;
mod output;
mod reports;
mod types;
mod util;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use config::Config;
use reports::{ReportKind, ReportOutcome, ReportParams};

#[derive(Parser, Debug)]
#[command(name = "fixed_ops_report")]
#[command(about = "Fixed Ops overview by payment method or service type")]
struct Args {
    /// All data closed on and after this date is considered (YYYY-MM-DD)
    #[arg(short, long, alias = "start_date")]
    start_date: Option<NaiveDate>,

    /// All data closed on and before this date is considered (YYYY-MM-DD)
    #[arg(short, long, alias = "end_date")]
    end_date: Option<NaiveDate>,

    /// Report to build: "Payment Method" or "Service Type"
    #[arg(short, long, alias = "report_for", default_value = "Payment Method")]
    report_for: String,

    /// Only include this labor type (Service_Group), or "All"
    #[arg(short = 'p', long, alias = "labor_type", default_value = "All")]
    labor_type: String,

    /// Only include this service type (Service_Type), or "All"
    #[arg(short = 't', long, alias = "service_type", default_value = "All")]
    service_type: String,

    /// TOML file with paths and report labels
    #[arg(long)]
    config: Option<PathBuf>,

    /// RO line-item CSV (overrides the config file)
    #[arg(long, env = "RO_FILE_PATH")]
    ro_file: Option<PathBuf>,

    /// Weekday contribution CSV (overrides the config file)
    #[arg(long, env = "WORKING_DAYS_FILE")]
    working_days_file: Option<PathBuf>,

    /// Directory for the generated report (overrides the config file)
    #[arg(long, env = "REPORT_DIR")]
    report_dir: Option<PathBuf>,

    /// Report file name prefix (overrides the config file)
    #[arg(long, env = "FILE_NAME_PREFIX")]
    file_name_prefix: Option<String>,

    /// Also write the report rows as JSON next to the CSV
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn params(&self) -> Result<ReportParams> {
        let kind: ReportKind = self.report_for.parse()?;
        Ok(ReportParams {
            kind,
            start_date: self.start_date,
            end_date: self.end_date,
            labor_type: self.labor_type.clone(),
            service_type: self.service_type.clone(),
        })
    }

    /// Layer file configuration and CLI/env overrides over the defaults.
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(p) = &self.ro_file {
            config.ro_file_path = p.clone();
        }
        if let Some(p) = &self.working_days_file {
            config.working_days_file = p.clone();
        }
        if let Some(p) = &self.report_dir {
            config.report_dir = p.clone();
        }
        if let Some(prefix) = &self.file_name_prefix {
            config.file_name_prefix = prefix.clone();
        }
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "fixed_ops_report=debug" } else { "fixed_ops_report=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Reject an unknown report before touching any input.
    let params = args.params()?;
    let config = args.config()?;
    info!(
        kind = %params.kind,
        start = ?params.start_date,
        end = ?params.end_date,
        labor_type = %params.labor_type,
        service_type = %params.service_type,
        "generating report"
    );

    let (items, load_report) = loader::load_line_items(&config.ro_file_path)
        .context("Failed to load RO line items")?;
    let calendar = loader::load_calendar(&config.working_days_file)
        .context("Failed to load working days")?;
    println!(
        "Processing dataset... ({} rows read, {} loaded, {} open)",
        util::format_int(load_report.total_rows),
        util::format_int(load_report.loaded_rows),
        util::format_int(load_report.open_rows)
    );
    if load_report.skipped_rows > 0 {
        println!(
            "Note: {} rows skipped due to parse/validation errors.",
            util::format_int(load_report.skipped_rows)
        );
    }

    let table = match reports::run(&params, &items, &calendar) {
        ReportOutcome::Report(table) => table,
        ReportOutcome::NoData => {
            println!("No data for the given specifications, kindly try for different specifications");
            return Ok(());
        }
    };

    let lines = output::project_all(&table);
    let path = output::write_report(&config, params.kind, &lines, Local::now().date_naive())?;
    if args.json {
        output::write_json(&path.with_extension("json"), &table)?;
    }

    println!("Fixed Ops Overview by {} for {}\n", params.kind, config.audience);
    println!("{}\n", output::preview_table(&table, config.preview_rows));
    println!("The {} report was saved to {}", params.kind, path.display());
    Ok(())
}
