//! Listing Report - store listing status from an inventory feed
//!
//! Reads the product mapping, the inventory feed, the producer roster and the
//! store template, then writes the Listing and Delisted sheets.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use listing_report::{generate_report, ReportConfig, ReportInputs};

/// Store listing report generator
#[derive(Parser, Debug)]
#[command(name = "listing_report")]
#[command(version, about, long_about = None)]
struct Args {
    /// Product mapping file (`<id>:<name>` per line, `;` comments)
    #[arg(long, default_value = "productMapping.txt")]
    products: PathBuf,

    /// Fixed-width inventory feed
    #[arg(long, default_value = "data.dat")]
    feed: PathBuf,

    /// Producer roster CSV (producer cell, product cell)
    #[arg(long, default_value = "producers.csv")]
    roster: PathBuf,

    /// Store template CSV
    #[arg(long, default_value = "template.csv")]
    template: PathBuf,

    /// Directory for the generated sheets
    #[arg(short, long, default_value = "report")]
    output: PathBuf,

    /// JSON configuration file (static columns, palette, date format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Date stamped into the report, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Directory for the error log written on failure
    #[arg(long, default_value = ".")]
    error_log_dir: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting listing_report...");

    if let Err(e) = run(&args) {
        log::error!("Report generation failed: {:#}", e);
        match write_error_log(&args.error_log_dir, &e) {
            Ok(path) => log::error!("Error details written to {}", path.display()),
            Err(log_err) => log::error!("Writing the error log failed: {:#}", log_err),
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = ReportConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let inputs = ReportInputs {
        products: args.products.clone(),
        feed: args.feed.clone(),
        roster: args.roster.clone(),
        template: args.template.clone(),
        output_dir: args.output.clone(),
    };
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let summary = generate_report(&inputs, &config, date).context("Failed to generate report")?;
    log::info!(
        "{} products, {} producers, {} listed and {} delisted stores",
        summary.products,
        summary.producers,
        summary.listed,
        summary.delisted
    );
    for path in &summary.written {
        log::info!("Output: {}", path.display());
    }
    Ok(())
}

/// Write the full error chain to `ERROR-<utc millis>.txt`
fn write_error_log(dir: &Path, error: &anyhow::Error) -> Result<PathBuf> {
    let path = dir.join(format!("ERROR-{}.txt", Utc::now().timestamp_millis()));
    let mut report = format!("{}\n", error);
    for cause in error.chain().skip(1) {
        report.push_str(&format!("  caused by: {}\n", cause));
    }
    std::fs::write(&path, report)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
