//! Store classification and report column layout.
//!
//! A store is *listed* when any of its entries is Listed or Forced, and
//! *delisted* otherwise (including when it has no entries at all). Each
//! section numbers its rows from 1 in template order.
//!
//! Column layout of the Listing sheet:
//!
//! ```text
//! | 1 ..= K static | K+1 ..= K+N products | K+N+1 Date Updated |
//! ```
//!
//! The Delisted sheet has no product columns, so its date sits at `K+1`.

use std::fmt;

use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;

use crate::catalog::ProductCatalog;
use crate::error::{ReportError, Result};
use crate::inventory::StoreInventoryIndex;
use crate::producers::{Color, ProducerRegistry};

const LETTERS: u32 = 26;

/// Letters for a column number known to be at least 1
fn column_letters(mut n: u64) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % LETTERS as u64) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / LETTERS as u64;
    }
    letters.iter().rev().collect()
}

/// Spreadsheet column label for a 1-based column number.
///
/// Bijective base 26: 1 → `A`, 26 → `Z`, 27 → `AA`, 702 → `ZZ`, 703 → `AAA`.
pub fn column_name(one_based_index: i64) -> Result<String> {
    if one_based_index <= 0 {
        return Err(ReportError::InvalidColumnIndex(one_based_index));
    }
    Ok(column_letters(one_based_index as u64))
}

/// A1-style cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRef {
    pub column: usize,
    pub row: usize,
}

impl CellRef {
    pub fn new(column: usize, row: usize) -> Result<Self> {
        if column == 0 {
            return Err(ReportError::InvalidColumnIndex(0));
        }
        Ok(Self { column, row })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.column as u64), self.row)
    }
}

/// Rectangular range such as `A2:J2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Output sheet a store row lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    Listing,
    Delisted,
}

impl Section {
    pub fn sheet_name(self) -> &'static str {
        match self {
            Section::Listing => "Listing",
            Section::Delisted => "Delisted",
        }
    }
}

/// Column positions shared by the classifier and the renderer
#[derive(Debug, Clone, Serialize)]
pub struct ReportLayout {
    static_columns: usize,
    product_ids: Vec<i32>,
}

impl ReportLayout {
    pub fn new(static_columns: usize, catalog: &ProductCatalog) -> Result<Self> {
        if static_columns == 0 {
            return Err(ReportError::InvalidColumnIndex(0));
        }
        Ok(Self {
            static_columns,
            product_ids: catalog.iter().map(|p| p.id).collect(),
        })
    }

    pub fn static_columns(&self) -> usize {
        self.static_columns
    }

    /// Product ids in column order
    pub fn product_ids(&self) -> &[i32] {
        &self.product_ids
    }

    /// Column of the product at `position` in catalog order (0-based)
    pub fn product_column(&self, position: usize) -> usize {
        self.static_columns + position + 1
    }

    pub fn date_column(&self, section: Section) -> usize {
        match section {
            Section::Listing => self.static_columns + self.product_ids.len() + 1,
            Section::Delisted => self.static_columns + 1,
        }
    }

    /// Total width of a sheet
    pub fn column_count(&self, section: Section) -> usize {
        self.date_column(section)
    }

    /// Static columns of `row`, e.g. `A5:J5`
    pub fn static_range(&self, row: usize) -> CellRange {
        CellRange {
            start: CellRef { column: 1, row },
            end: CellRef {
                column: self.static_columns,
                row,
            },
        }
    }
}

/// One product value written into a listed store's row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedValue {
    pub product_id: i32,
    pub column: usize,
    pub inventory_change: i32,
    pub color: Color,
}

/// Where and with what a store's data lands in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowPlacement {
    pub store_id: i32,
    pub section: Section,
    /// 1-based data row within the section
    pub row_index: usize,
    /// Sheet row in the template the static columns come from
    pub template_row: usize,
    pub static_source: CellRange,
    pub values: Vec<PlacedValue>,
    pub date_column: usize,
    pub date: NaiveDate,
}

impl RowPlacement {
    /// Sheet row in the output section (row 1 is the header)
    pub fn sheet_row(&self) -> usize {
        self.row_index + 1
    }

    /// Where the static columns are pasted
    pub fn static_target(&self) -> CellRange {
        CellRange {
            start: CellRef {
                column: 1,
                row: self.sheet_row(),
            },
            end: CellRef {
                column: self.static_source.end.column,
                row: self.sheet_row(),
            },
        }
    }

    pub fn date_cell(&self) -> CellRef {
        CellRef {
            column: self.date_column,
            row: self.sheet_row(),
        }
    }
}

/// Decides listed/delisted placement for every template store
#[derive(Debug, Clone)]
pub struct ReportClassifier {
    layout: ReportLayout,
    report_date: NaiveDate,
}

impl ReportClassifier {
    pub fn new(layout: ReportLayout, report_date: NaiveDate) -> Self {
        Self {
            layout,
            report_date,
        }
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Classify stores in template order.
    ///
    /// `store_ids_in_template_order[i]` must be the store on template data
    /// row `i + 1` (sheet row `i + 2`). Listed stores get one value per
    /// catalog product they have an entry for, colored by the product's
    /// producer; a listed product without a producer is an error.
    pub fn classify_stores(
        &self,
        store_ids_in_template_order: &[i32],
        index: &StoreInventoryIndex,
        catalog: &ProductCatalog,
        producers: &ProducerRegistry,
    ) -> Result<Vec<RowPlacement>> {
        let mut next_listed = 1;
        let mut next_delisted = 1;
        let mut placements = Vec::with_capacity(store_ids_in_template_order.len());

        for (position, &store_id) in store_ids_in_template_order.iter().enumerate() {
            let listed = index.has_any_listed_or_forced(store_id);
            let (section, row_index) = if listed {
                next_listed += 1;
                (Section::Listing, next_listed - 1)
            } else {
                next_delisted += 1;
                (Section::Delisted, next_delisted - 1)
            };

            let values = if listed {
                self.place_values(store_id, index, catalog, producers)?
            } else {
                Vec::new()
            };

            let template_row = position + 2;
            debug!(
                "Store {} -> {} row {} ({} values)",
                store_id,
                section.sheet_name(),
                row_index,
                values.len()
            );
            placements.push(RowPlacement {
                store_id,
                section,
                row_index,
                template_row,
                static_source: self.layout.static_range(template_row),
                values,
                date_column: self.layout.date_column(section),
                date: self.report_date,
            });
        }

        info!(
            "Classified {} stores: {} listed, {} delisted",
            placements.len(),
            next_listed - 1,
            next_delisted - 1
        );
        Ok(placements)
    }

    fn place_values(
        &self,
        store_id: i32,
        index: &StoreInventoryIndex,
        catalog: &ProductCatalog,
        producers: &ProducerRegistry,
    ) -> Result<Vec<PlacedValue>> {
        let entries = index.entries_for_store(store_id);
        catalog
            .iter()
            .enumerate()
            .filter_map(|(position, product)| {
                entries.get(&product.id).map(|entry| (position, entry))
            })
            .map(|(position, entry)| -> Result<PlacedValue> {
                Ok(PlacedValue {
                    product_id: entry.product_id,
                    column: self.layout.product_column(position),
                    inventory_change: entry.inventory_change,
                    color: producers.color_for_product(entry.product_id)?.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
