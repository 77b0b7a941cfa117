//! Error types for listing_report

use std::fmt;

use thiserror::Error;

/// Fixed-width slot of an inventory feed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedField {
    EntryDate,
    ProductId,
    StoreId,
    ListingState,
    InventoryChange,
}

impl fmt::Display for FeedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeedField::EntryDate => "entry date",
            FeedField::ProductId => "product id",
            FeedField::StoreId => "store id",
            FeedField::ListingState => "listing state",
            FeedField::InventoryChange => "inventory change",
        };
        f.write_str(name)
    }
}

/// Unified error type for loading, registering and classifying
#[derive(Debug, Error)]
pub enum ReportError {
    /// A record did not have the expected shape
    #[error("Malformed record {raw:?}: {reason}")]
    MalformedRecord { raw: String, reason: String },

    /// A fixed-width slot did not parse
    #[error("Invalid {field} field: {raw:?}")]
    InvalidFieldFormat { field: FeedField, raw: String },

    #[error("Product id {id} is defined twice: {new_name:?} conflicts with {existing_name:?}")]
    DuplicateProductId {
        id: i32,
        new_name: Option<String>,
        existing_name: Option<String>,
    },

    #[error("Ran out of synthetic product ids to assign")]
    IdSpaceExhausted,

    #[error("Producer id {id} already belongs to another producer: {existing_name}")]
    DuplicateProducerId { id: i32, existing_name: String },

    /// Producer still holds a color from another registry
    #[error("Producer {producer_id} already carries color {color}; remove it from its registry first")]
    ColorAlreadyAssigned { producer_id: i32, color: String },

    #[error("No colors left for producer {producer_id}; remove producers or extend the palette")]
    PaletteExhausted { producer_id: i32 },

    #[error("Product {product_id} already belongs to producer {owner_id} ({owner_name})")]
    ProductAlreadyOwned {
        product_id: i32,
        owner_id: i32,
        owner_name: String,
    },

    #[error("Duplicate inventory entry for store {store_id}, product {product_id}")]
    DuplicateEntry { store_id: i32, product_id: i32 },

    #[error("Unknown producer: {0}")]
    UnknownProducer(i32),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: i32 },

    #[error("Invalid column index: {0} (columns start at 1)")]
    InvalidColumnIndex(i64),

    /// Feed import attempted before any product was loaded
    #[error("No products were loaded; the product mapping must be read before the feed")]
    EmptyCatalog,

    #[error("Store {store_id} appears twice in the template (rows {first_row} and {second_row})")]
    DuplicateTemplateStore {
        store_id: i32,
        first_row: usize,
        second_row: usize,
    },

    #[error("Template row {row} does not start with a store id: {raw:?}")]
    InvalidTemplateStore { row: usize, raw: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Any record error, tagged with where it came from
    #[error("{origin} line {line}: {source}")]
    AtLine {
        origin: String,
        line: usize,
        #[source]
        source: Box<ReportError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    /// Attach input name and 1-based line number
    pub fn at_line(self, origin: impl Into<String>, line: usize) -> Self {
        ReportError::AtLine {
            origin: origin.into(),
            line,
            source: Box::new(self),
        }
    }

    /// The underlying record error, looking through line context
    pub fn root(&self) -> &ReportError {
        match self {
            ReportError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result alias for listing_report operations
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_line_keeps_root_and_context() {
        let err = ReportError::EmptyCatalog.at_line("data.dat", 7);
        assert!(matches!(err.root(), ReportError::EmptyCatalog));
        let msg = err.to_string();
        assert!(msg.starts_with("data.dat line 7: "));
    }

    #[test]
    fn invalid_field_names_the_field() {
        let err = ReportError::InvalidFieldFormat {
            field: FeedField::EntryDate,
            raw: "2024O101".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid entry date field: \"2024O101\"");
    }
}
