//! One complete report run, from input files to written sheets

use std::path::PathBuf;

use chrono::NaiveDate;
use log::info;

use crate::classifier::{ReportClassifier, ReportLayout, RowPlacement, Section};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::io::{load_catalog, load_feed, load_producers};
use crate::report::ReportRenderer;
use crate::template::Template;

/// Paths of everything a run reads and where it writes
#[derive(Debug, Clone)]
pub struct ReportInputs {
    pub products: PathBuf,
    pub feed: PathBuf,
    pub roster: PathBuf,
    pub template: PathBuf,
    pub output_dir: PathBuf,
}

/// What a finished run produced
#[derive(Debug)]
pub struct ReportSummary {
    pub products: usize,
    pub producers: usize,
    pub listed: usize,
    pub delisted: usize,
    /// Feed stores missing from the template
    pub unreported_stores: Vec<i32>,
    pub placements: Vec<RowPlacement>,
    pub written: Vec<PathBuf>,
}

/// Load every input, classify the template stores and write the report.
///
/// The first error aborts the run; nothing is written before all inputs
/// have loaded and every store has been classified.
pub fn generate_report(
    inputs: &ReportInputs,
    config: &ReportConfig,
    report_date: NaiveDate,
) -> Result<ReportSummary> {
    config.validate()?;

    let catalog = load_catalog(&inputs.products)?;
    let index = load_feed(&inputs.feed, &catalog)?;
    let producers = load_producers(&inputs.roster, &config.palette)?;
    let template = Template::from_csv_path(&inputs.template)?;
    let unreported_stores = template.warn_unreported_stores(&index);

    let layout = ReportLayout::new(config.static_column_count, &catalog)?;
    let classifier = ReportClassifier::new(layout, report_date);
    let placements =
        classifier.classify_stores(&template.store_ids(), &index, &catalog, &producers)?;

    let renderer = ReportRenderer::new(
        &template,
        classifier.layout(),
        &catalog,
        &config.date_format,
    );
    let written = renderer.write(&placements, &inputs.output_dir)?;

    let listed = placements
        .iter()
        .filter(|p| p.section == Section::Listing)
        .count();
    let summary = ReportSummary {
        products: catalog.len(),
        producers: producers.len(),
        listed,
        delisted: placements.len() - listed,
        unreported_stores,
        placements,
        written,
    };
    info!(
        "Report complete: {} listed, {} delisted",
        summary.listed, summary.delisted
    );
    Ok(summary)
}
