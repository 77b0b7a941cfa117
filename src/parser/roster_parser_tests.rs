//! Unit tests for ownership roster parsing.

use super::*;

fn rows(cells: &[(&str, &str)]) -> Vec<RosterRow> {
    cells
        .iter()
        .enumerate()
        .map(|(i, (producer, product))| RosterRow::new(i + 2, *producer, *product))
        .collect()
}

#[test]
fn group_rows_carry_the_last_producer() {
    let roster =
        parse_ownership_roster(rows(&[("10 Acme", "501"), ("", "502"), ("", "503")])).unwrap();

    assert_eq!(roster.producers.len(), 1);
    assert_eq!(roster.producers[0].line, 2);
    assert_eq!(roster.producers[0].producer.id, 10);
    assert_eq!(roster.producers[0].producer.name, "Acme");
    let claimed: Vec<(usize, i32, i32)> = roster
        .claims
        .iter()
        .map(|c| (c.line, c.producer_id, c.product_id))
        .collect();
    assert_eq!(claimed, vec![(2, 10, 501), (3, 10, 502), (4, 10, 503)]);
}

#[test]
fn new_producer_cell_starts_a_new_group() {
    let roster = parse_ownership_roster(rows(&[
        ("10 Acme Wines", "501"),
        ("", "502"),
        ("11 Bellevue Estate", "610"),
        ("  ", "611"),
    ]))
    .unwrap();

    let names: Vec<&str> = roster
        .producers
        .iter()
        .map(|p| p.producer.name.as_str()).collect();
    assert_eq!(names, vec!["Acme Wines", "Bellevue Estate"]);
    assert_eq!(roster.claims[2].producer_id, 11);
    assert_eq!(roster.claims[3].producer_id, 11);
    assert_eq!(roster.claims[3].product_id, 611);
}

#[test]
fn parsed_producers_have_no_color() {
    let roster = parse_ownership_roster(rows(&[("10 Acme", "501")])).unwrap();
    assert!(roster.producers[0].producer.display_color().is_none());
    assert!(roster.producers[0].producer.product_ids().is_empty());
}

#[test]
fn first_row_must_start_a_group() {
    let err = parse_ownership_roster(rows(&[("", "501"), ("10 Acme", "502")])).unwrap_err();
    match &err {
        ReportError::AtLine { line, .. } => assert_eq!(*line, 2),
        other => panic!("expected line context, got {other:?}"),
    }
    assert!(matches!(err.root(), ReportError::MalformedRecord { .. }));
}

#[test]
fn producer_cell_without_space_is_malformed() {
    let err = parse_ownership_roster(rows(&[("10", "501")])).unwrap_err();
    assert!(matches!(err.root(), ReportError::MalformedRecord { .. }));
}

#[test]
fn producer_cell_with_non_integer_id_is_malformed() {
    let err = parse_ownership_roster(rows(&[("Acme 10", "501")])).unwrap_err();
    assert!(matches!(err.root(), ReportError::MalformedRecord { .. }));
}

#[test]
fn non_integer_product_cell_is_malformed_and_reports_its_line() {
    let err =
        parse_ownership_roster(rows(&[("10 Acme", "501"), ("", "five-oh-two")])).unwrap_err();
    match &err {
        ReportError::AtLine { line, .. } => assert_eq!(*line, 3),
        other => panic!("expected line context, got {other:?}"),
    }
}

#[test]
fn empty_roster_is_empty() {
    let roster = parse_ownership_roster(Vec::new()).unwrap();
    assert!(roster.producers.is_empty());
    assert!(roster.claims.is_empty());
}

#[test]
fn header_parsing_trims_outer_whitespace() {
    let producer = parse_producer_header("  42   Domaine Leflaive ").unwrap();
    assert_eq!(producer.id, 42);
    assert_eq!(producer.name, "Domaine Leflaive");
}

#[test]
fn id_with_trailing_space_has_an_empty_name() {
    let producer = parse_producer_header("10 ").unwrap();
    assert_eq!(producer.id, 10);
    assert_eq!(producer.name, "");
}

#[test]
fn leading_whitespace_does_not_end_the_id() {
    let producer = parse_producer_header("  7 Bellevue").unwrap();
    assert_eq!(producer.id, 7);
    assert_eq!(producer.name, "Bellevue");
}
