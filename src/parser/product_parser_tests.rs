//! Unit tests for product definition parsing.

use super::*;

/// Counts down from -1 like the catalog does
struct Countdown(i32);

impl SyntheticIdSource for Countdown {
    fn issue_synthetic_id(&mut self) -> Result<i32> {
        self.0 -= 1;
        Ok(self.0)
    }
}

struct Exhausted;

impl SyntheticIdSource for Exhausted {
    fn issue_synthetic_id(&mut self) -> Result<i32> {
        Err(ReportError::IdSpaceExhausted)
    }
}

#[test]
fn parses_id_and_trimmed_name() {
    let product = parse_product_definition("300012:  Chateau Margaux ", &mut Countdown(0)).unwrap();
    assert_eq!(product.id, 300012);
    assert_eq!(product.name.as_deref(), Some("Chateau Margaux"));
}

#[test]
fn id_without_colon_has_no_name() {
    let product = parse_product_definition("4711", &mut Countdown(0)).unwrap();
    assert_eq!(product.id, 4711);
    assert!(product.name.is_none());
}

#[test]
fn blank_name_counts_as_absent() {
    let product = parse_product_definition("12:   ", &mut Countdown(0)).unwrap();
    assert!(product.name.is_none());
}

#[test]
fn third_field_is_ignored() {
    let product = parse_product_definition("12:Pinot Noir:2009", &mut Countdown(0)).unwrap();
    assert_eq!(product.id, 12);
    assert_eq!(product.name.as_deref(), Some("Pinot Noir"));
}

#[test]
fn negative_id_is_replaced_by_synthetic_ids_in_decreasing_order() {
    let mut ids = Countdown(0);
    let first = parse_product_definition("-1:Gift card", &mut ids).unwrap();
    let second = parse_product_definition("-900:Deposit", &mut ids).unwrap();
    assert_eq!(first.id, -1);
    assert_eq!(second.id, -2);
    assert!(second.id < first.id);
}

#[test]
fn non_negative_id_never_touches_the_id_source() {
    let product = parse_product_definition("0:Zero", &mut Exhausted).unwrap();
    assert_eq!(product.id, 0);
}

#[test]
fn exhausted_id_source_fails_negative_definitions() {
    let err = parse_product_definition("-1:Gift card", &mut Exhausted).unwrap_err();
    assert!(matches!(err, ReportError::IdSpaceExhausted));
}

#[test]
fn non_integer_id_is_malformed() {
    for line in ["abc:Name", ":Name", "", "12.5:Name"] {
        let err = parse_product_definition(line, &mut Countdown(0)).unwrap_err();
        assert!(
            matches!(err, ReportError::MalformedRecord { .. }),
            "{line:?} gave {err:?}"
        );
    }
}

#[test]
fn comment_detection() {
    assert!(is_comment_line("; header"));
    assert!(is_comment_line(";12:Hidden"));
    assert!(!is_comment_line(" ;12:Indented"));
    assert!(!is_comment_line("12:Visible"));
}
