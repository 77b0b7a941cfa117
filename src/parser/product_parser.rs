//! Product definition parsing.
//!
//! Definitions look like `<integer-id>:<name>`. A third colon field is
//! accepted and ignored.

use log::debug;

use crate::catalog::Product;
use crate::error::{ReportError, Result};

use super::parse_padded_int;

const COMMENT_PREFIX: char = ';';
const FIELD_SEPARATOR: char = ':';

/// Hands out ids for products declared with a negative id
pub trait SyntheticIdSource {
    fn issue_synthetic_id(&mut self) -> Result<i32>;
}

/// Whether a product mapping line is a comment
pub fn is_comment_line(line: &str) -> bool {
    line.starts_with(COMMENT_PREFIX)
}

/// Parses one product definition line.
///
/// A negative declared id is discarded and replaced by an id from `ids`.
///
/// # Arguments
/// * `line` - A definition such as `"300012:Chateau Margaux"`
/// * `ids` - Source of synthetic ids, normally the catalog being loaded
pub fn parse_product_definition<S>(line: &str, ids: &mut S) -> Result<Product>
where
    S: SyntheticIdSource + ?Sized,
{
    let mut fields = line.split(FIELD_SEPARATOR);
    let raw_id = fields.next().unwrap_or_default();
    let declared = parse_padded_int(raw_id).ok_or_else(|| ReportError::MalformedRecord {
        raw: line.to_string(),
        reason: format!("unable to parse product id {raw_id:?}, expected integer"),
    })?;

    let name = fields
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let id = if declared < 0 {
        let synthetic = ids.issue_synthetic_id()?;
        debug!("Product {name:?} declared id {declared}, assigned synthetic id {synthetic}");
        synthetic
    } else {
        declared
    };

    Ok(Product::new(id, name))
}

#[cfg(test)]
#[path = "product_parser_tests.rs"]
mod tests;
