//! Ownership roster parsing.
//!
//! The roster is vertically grouped: a row with a producer cell starts a new
//! group, and every row (including that one) adds its product cell to the
//! current group.
//!
//! ```text
//! producer     | product
//! 10 Acme      | 501
//!              | 502
//!              | 503
//! 11 Bellevue  | 610
//! ```

use log::debug;

use crate::error::{ReportError, Result};
use crate::producers::Producer;

use super::parse_padded_int;

pub(crate) const ROSTER_ORIGIN: &str = "ownership roster";

/// One raw roster row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    /// Line in the source file, for error context
    pub line: usize,
    pub producer: String,
    pub product: String,
}

impl RosterRow {
    pub fn new(line: usize, producer: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            line,
            producer: producer.into(),
            product: product.into(),
        }
    }
}

/// A producer header and the roster line it came from
#[derive(Debug, Clone)]
pub struct RosterProducer {
    pub line: usize,
    pub producer: Producer,
}

/// A product claimed by the producer of its group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipClaim {
    pub line: usize,
    pub producer_id: i32,
    pub product_id: i32,
}

/// Roster flattened into producers and claims, in roster order
#[derive(Debug, Default)]
pub struct OwnershipRoster {
    pub producers: Vec<RosterProducer>,
    pub claims: Vec<OwnershipClaim>,
}

/// Parses a producer cell of the form `<integer-id> <name>`.
///
/// The id ends at the first space of the cell; only leading whitespace is
/// dropped before looking for it. `"10 "` is producer 10 with an empty name,
/// while `"10"` has no separator and is malformed.
pub fn parse_producer_header(raw: &str) -> Result<Producer> {
    let (raw_id, name) = raw
        .trim_start()
        .split_once(' ')
        .ok_or_else(|| ReportError::MalformedRecord {
            raw: raw.to_string(),
            reason: "expected '<id> <name>'".to_string(),
        })?;
    let id = parse_padded_int(raw_id).ok_or_else(|| ReportError::MalformedRecord {
        raw: raw.to_string(),
        reason: format!("unable to parse producer id {raw_id:?}"),
    })?;
    Ok(Producer::new(id, name.trim()))
}

fn parse_product_cell(raw: &str) -> Result<i32> {
    parse_padded_int(raw.trim()).ok_or_else(|| ReportError::MalformedRecord {
        raw: raw.to_string(),
        reason: "unable to parse product id".to_string(),
    })
}

/// Folds roster rows into producers plus a flat list of claims.
///
/// Nothing is registered here; the result is handed to the producer
/// registry as a whole.
pub fn parse_ownership_roster<I>(rows: I) -> Result<OwnershipRoster>
where
    I: IntoIterator<Item = RosterRow>,
{
    let (roster, _) = rows.into_iter().try_fold(
        (OwnershipRoster::default(), None::<i32>),
        |(mut roster, current), row| -> Result<(OwnershipRoster, Option<i32>)> {
            let tag = |e: ReportError| e.at_line(ROSTER_ORIGIN, row.line);

            let group = if row.producer.trim().is_empty() {
                current.ok_or_else(|| {
                    tag(ReportError::MalformedRecord {
                        raw: row.product.clone(),
                        reason: "product listed before any producer".to_string(),
                    })
                })?
            } else {
                let producer = parse_producer_header(&row.producer).map_err(tag)?;
                debug!("Roster group for producer {} ({})", producer.id, producer.name);
                let id = producer.id;
                roster.producers.push(RosterProducer {
                    line: row.line,
                    producer,
                });
                id
            };

            let product_id = parse_product_cell(&row.product).map_err(tag)?;
            roster.claims.push(OwnershipClaim {
                line: row.line,
                producer_id: group,
                product_id,
            });
            Ok((roster, Some(group)))
        },
    )?;
    Ok(roster)
}

#[cfg(test)]
#[path = "roster_parser_tests.rs"]
mod tests;
