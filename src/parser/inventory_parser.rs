//! Fixed-width inventory feed parsing.
//!
//! Line layout (byte offsets):
//!
//! | Field            | Offset | Length    | Format          |
//! |------------------|--------|-----------|-----------------|
//! | entry date       | 0      | 8         | `yyyyMMdd`      |
//! | product id       | 8      | 7         | integer         |
//! | store id         | 15     | 4         | integer         |
//! | listing state    | 19     | 1         | `L`, `D` or `F` |
//! | inventory change | 20     | remainder | signed integer  |

use std::ops::Range;

use chrono::NaiveDate;

use crate::error::{FeedField, ReportError, Result};
use crate::inventory::{InventoryEntry, ListingState};

use super::parse_padded_int;

const DATE_SLOT: Range<usize> = 0..8;
const PRODUCT_SLOT: Range<usize> = 8..15;
const STORE_SLOT: Range<usize> = 15..19;
const STATE_SLOT: Range<usize> = 19..20;
const CHANGE_START: usize = 20;

/// Cut a slot out of the line; a short line or a slot splitting a
/// multi-byte character reports whatever was there.
fn slot(line: &str, field: FeedField, range: Range<usize>) -> Result<&str> {
    line.get(range.clone()).ok_or_else(|| ReportError::InvalidFieldFormat {
        field,
        raw: line.get(range.start..).unwrap_or_default().to_string(),
    })
}

fn int_slot(line: &str, field: FeedField, range: Range<usize>) -> Result<i32> {
    let raw = slot(line, field, range)?;
    parse_padded_int(raw).ok_or_else(|| ReportError::InvalidFieldFormat {
        field,
        raw: raw.to_string(),
    })
}

/// Strict `yyyyMMdd`: eight ASCII digits forming a real calendar date
fn parse_entry_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = raw[0..4].parse().ok()?;
    let month = raw[4..6].parse().ok()?;
    let day = raw[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Reads only the product id slot.
///
/// Used to drop lines for products outside the catalog before the rest of
/// the line is validated.
pub fn peek_product_id(line: &str) -> Result<i32> {
    int_slot(line, FeedField::ProductId, PRODUCT_SLOT)
}

/// Parses one fixed-width feed line. Every slot is mandatory.
pub fn parse_inventory_entry(line: &str) -> Result<InventoryEntry> {
    let raw_date = slot(line, FeedField::EntryDate, DATE_SLOT)?;
    let entry_date = parse_entry_date(raw_date).ok_or_else(|| ReportError::InvalidFieldFormat {
        field: FeedField::EntryDate,
        raw: raw_date.to_string(),
    })?;

    let product_id = int_slot(line, FeedField::ProductId, PRODUCT_SLOT)?;
    let store_id = int_slot(line, FeedField::StoreId, STORE_SLOT)?;

    let raw_state = slot(line, FeedField::ListingState, STATE_SLOT)?;
    let listing_state = raw_state
        .chars()
        .next()
        .and_then(ListingState::from_code)
        .ok_or_else(|| ReportError::InvalidFieldFormat {
            field: FeedField::ListingState,
            raw: raw_state.to_string(),
        })?;

    let inventory_change = int_slot(
        line,
        FeedField::InventoryChange,
        CHANGE_START..line.len().max(CHANGE_START),
    )?;

    Ok(InventoryEntry {
        entry_date,
        product_id,
        store_id,
        inventory_change,
        listing_state,
    })
}

#[cfg(test)]
#[path = "inventory_parser_tests.rs"]
mod tests;
