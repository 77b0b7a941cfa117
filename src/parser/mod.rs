//! Record parsing for the three report inputs.
//!
//! The parsers turn raw text into typed records and know nothing about the
//! stores that end up holding them.
//!
//! # Module Structure
//!
//! - [`product_parser`] - `<id>:<name>` product definitions
//! - [`inventory_parser`] - fixed-width inventory-change feed lines
//! - [`roster_parser`] - grouped producer/product ownership rows

pub mod inventory_parser;
pub mod product_parser;
pub mod roster_parser;

pub use inventory_parser::{parse_inventory_entry, peek_product_id};
pub use product_parser::{is_comment_line, parse_product_definition, SyntheticIdSource};
pub(crate) use roster_parser::ROSTER_ORIGIN;
pub use roster_parser::{
    parse_ownership_roster, OwnershipClaim, OwnershipRoster, RosterProducer, RosterRow,
};

/// Parse an integer cell or slot, allowing space padding around it
pub(crate) fn parse_padded_int(raw: &str) -> Option<i32> {
    raw.trim_matches(' ').parse::<i32>().ok()
}
