use chrono::NaiveDate;
use listing_report::{generate_report, ReportConfig, ReportError, ReportInputs, Section};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Test fixtures - a small chain with four stores and three products

fn product_mapping() -> &'static str {
    "; product mapping\n\
     0012345:Chateau Margaux\n\
     0023456:Barolo Riserva\n\
     -1:Gift card\n"
}

fn feed() -> &'static str {
    // date    product store state change
    "2013061400123450001L6\n\
     2013061400234560001D-1\n\
     2013061400123450002D0\n\
     2013061409999990002L9\n\
     2013061400234560004F12\n\
     2013061400123450077L1\n"
}

fn roster() -> &'static str {
    "Producer,Product\n\
     10 Acme Wines,12345\n\
     ,23456\n\
     11 Bellevue,-1\n\
     ,\n"
}

fn template() -> &'static str {
    "Store,City\n\
     1,Ottawa\n\
     2,Kingston\n\
     3,Perth\n\
     4,Brockville\n"
}

fn write_inputs(dir: &Path, feed_content: &str, roster_content: &str) -> ReportInputs {
    let inputs = ReportInputs {
        products: dir.join("productMapping.txt"),
        feed: dir.join("data.dat"),
        roster: dir.join("producers.csv"),
        template: dir.join("template.csv"),
        output_dir: dir.join("out"),
    };
    fs::write(&inputs.products, product_mapping()).unwrap();
    fs::write(&inputs.feed, feed_content).unwrap();
    fs::write(&inputs.roster, roster_content).unwrap();
    fs::write(&inputs.template, template()).unwrap();
    inputs
}

fn config() -> ReportConfig {
    ReportConfig::from_json(r#"{ "static_column_count": 2, "date_format": "%Y-%m-%d" }"#).unwrap()
}

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2013, 6, 20).unwrap()
}

#[test]
fn test_full_run_classifies_template_stores() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), feed(), roster());

    let summary = generate_report(&inputs, &config(), report_date()).unwrap();

    assert_eq!(summary.products, 3);
    assert_eq!(summary.producers, 2);
    assert_eq!(summary.listed, 2);
    assert_eq!(summary.delisted, 2);
    assert_eq!(summary.unreported_stores, vec![77]);

    let sections: Vec<(i32, Section, usize)> = summary
        .placements
        .iter()
        .map(|p| (p.store_id, p.section, p.row_index))
        .collect();
    assert_eq!(
        sections,
        vec![
            (1, Section::Listing, 1),
            (2, Section::Delisted, 1),
            (3, Section::Delisted, 2),
            (4, Section::Listing, 2),
        ]
    );
}

#[test]
fn test_full_run_writes_sheets() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), feed(), roster());

    generate_report(&inputs, &config(), report_date()).unwrap();

    let mut reader = csv::Reader::from_path(inputs.output_dir.join("Listing.csv")).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec![
            "Store",
            "City",
            "Chateau Margaux\n(12345)",
            "Barolo Riserva\n(23456)",
            "Gift card",
            "Date Updated"
        ]
    );
    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["1", "Ottawa", "6", "-1", "", "2013-06-20"],
            vec!["4", "Brockville", "", "12", "", "2013-06-20"],
        ]
    );

    let delisted = fs::read_to_string(inputs.output_dir.join("Delisted.csv")).unwrap();
    assert_eq!(
        delisted.lines().collect::<Vec<_>>(),
        vec![
            "Store,City,Date Updated",
            "2,Kingston,2013-06-20",
            "3,Perth,2013-06-20"
        ]
    );
    assert!(inputs.output_dir.join("placements.json").exists());
}

#[test]
fn test_bad_feed_line_aborts_before_writing() {
    let dir = TempDir::new().unwrap();
    let bad_feed = "2013061400123450001L6\n2013O61400234560001D-1\n";
    let inputs = write_inputs(dir.path(), bad_feed, roster());

    let err = generate_report(&inputs, &config(), report_date()).unwrap_err();
    match &err {
        ReportError::AtLine { line, .. } => assert_eq!(*line, 2),
        other => panic!("expected line context, got {other:?}"),
    }
    assert!(matches!(err.root(), ReportError::InvalidFieldFormat { .. }));
    assert!(!inputs.output_dir.exists());
}

#[test]
fn test_double_claim_in_roster_aborts() {
    let dir = TempDir::new().unwrap();
    let bad_roster = "Producer,Product\n10 Acme,12345\n11 Bellevue,12345\n";
    let inputs = write_inputs(dir.path(), feed(), bad_roster);

    let err = generate_report(&inputs, &config(), report_date()).unwrap_err();
    assert!(matches!(err, ReportError::AtLine { line: 3, .. }));
    assert!(matches!(
        err.root(),
        ReportError::ProductAlreadyOwned {
            product_id: 12345,
            owner_id: 10,
            ..
        }
    ));
}

#[test]
fn test_listed_product_without_producer_aborts() {
    let dir = TempDir::new().unwrap();
    let partial_roster = "Producer,Product\n10 Acme Wines,12345\n";
    let inputs = write_inputs(dir.path(), feed(), partial_roster);

    let err = generate_report(&inputs, &config(), report_date()).unwrap_err();
    assert!(matches!(err, ReportError::NotFound { id: 23456, .. }));
}

#[test]
fn test_missing_input_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let mut inputs = write_inputs(dir.path(), feed(), roster());
    inputs.products = dir.path().join("missing.txt");

    let err = generate_report(&inputs, &config(), report_date()).unwrap_err();
    assert!(matches!(err, ReportError::Io(_)));
}
