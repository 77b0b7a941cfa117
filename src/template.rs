//! Reference template: a header row plus one row per store.
//!
//! The first column of each data row holds the store id. Rows are read down
//! to the first blank line or the first row whose store cell is empty, and
//! the row order is the order stores appear in the report.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{ReportError, Result};
use crate::inventory::StoreInventoryIndex;
use crate::io::read_csv_block;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRow {
    pub store_id: i32,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Template {
    headers: Vec<String>,
    rows: Vec<TemplateRow>,
}

impl Template {
    /// Build from a header row and raw data rows, validating store ids
    pub fn new(headers: Vec<String>, raw_rows: Vec<Vec<String>>) -> Result<Self> {
        let mut rows = Vec::with_capacity(raw_rows.len());
        let mut seen: HashMap<i32, usize> = HashMap::new();

        for (index, cells) in raw_rows.into_iter().enumerate() {
            let sheet_row = index + 2;
            let raw_id = cells.first().map(|c| c.trim()).unwrap_or_default();
            if raw_id.is_empty() {
                debug!("Template ends at blank store cell on row {}", sheet_row);
                break;
            }
            let store_id = raw_id
                .parse::<i32>()
                .map_err(|_| ReportError::InvalidTemplateStore {
                    row: sheet_row,
                    raw: raw_id.to_string(),
                })?;
            if let Some(first_row) = seen.insert(store_id, sheet_row) {
                return Err(ReportError::DuplicateTemplateStore {
                    store_id,
                    first_row,
                    second_row: sheet_row,
                });
            }
            rows.push(TemplateRow { store_id, cells });
        }

        Ok(Self { headers, rows })
    }

    /// Read a CSV template
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let (headers, records) = read_csv_block(&fs::read(path)?)?;
        let raw_rows: Vec<Vec<String>> = records
            .into_iter()
            .map(|(_, record)| record.iter().map(str::to_string).collect())
            .collect();

        let template = Self::new(headers, raw_rows)?;
        info!(
            "Read template {} with {} store rows",
            path.display(),
            template.rows.len()
        );
        Ok(template)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[TemplateRow] {
        &self.rows
    }

    /// Store ids in row order; position `i` is sheet row `i + 2`
    pub fn store_ids(&self) -> Vec<i32> {
        self.rows.iter().map(|row| row.store_id).collect()
    }

    /// Row by sheet row number (the header is row 1)
    pub fn sheet_row(&self, sheet_row: usize) -> Option<&TemplateRow> {
        sheet_row.checked_sub(2).and_then(|i| self.rows.get(i))
    }

    /// First `count` header cells, padded with blanks
    pub fn static_headers(&self, count: usize) -> Vec<String> {
        padded(&self.headers, count)
    }

    /// Log feed stores that the template never mentions.
    ///
    /// Their data cannot appear in the report. Returns the store ids found.
    pub fn warn_unreported_stores(&self, index: &StoreInventoryIndex) -> Vec<i32> {
        let known: std::collections::HashSet<i32> = self.rows.iter().map(|r| r.store_id).collect();
        let missing: Vec<i32> = index
            .store_ids()
            .into_iter()
            .filter(|id| !known.contains(id))
            .collect();
        if !missing.is_empty() {
            warn!(
                "{} store{} in the feed are not in the template and will not be reported: {:?}",
                missing.len(),
                if missing.len() != 1 { "s" } else { "" },
                missing
            );
        }
        missing
    }
}

/// First `count` cells of `cells`, padded with blanks
pub(crate) fn padded(cells: &[String], count: usize) -> Vec<String> {
    let mut out: Vec<String> = cells.iter().take(count).cloned().collect();
    out.resize(count, String::new());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn reads_rows_up_to_the_first_blank_store() {
        let template = Template::new(
            strings(&["Store", "City"]),
            vec![
                strings(&["12", "Ottawa"]),
                strings(&["7", "Kingston"]),
                strings(&["", ""]),
                strings(&["99", "After the gap"]),
            ],
        )
        .unwrap();
        assert_eq!(template.store_ids(), vec![12, 7]);
        assert_eq!(template.sheet_row(3).unwrap().cells[1], "Kingston");
        assert!(template.sheet_row(1).is_none());
    }

    #[test]
    fn duplicate_store_rows_are_rejected() {
        let err = Template::new(
            strings(&["Store"]),
            vec![strings(&["12"]), strings(&["7"]), strings(&["12"])],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ReportError::DuplicateTemplateStore {
                store_id: 12,
                first_row: 2,
                second_row: 4
            }
        ));
    }

    #[test]
    fn non_numeric_store_is_rejected() {
        let err = Template::new(strings(&["Store"]), vec![strings(&["Main St"])]).unwrap_err();
        assert!(matches!(err, ReportError::InvalidTemplateStore { row: 2, .. }));
    }

    #[test]
    fn static_headers_are_padded() {
        let template = Template::new(strings(&["Store", "City"]), Vec::new()).unwrap();
        assert_eq!(template.static_headers(3), strings(&["Store", "City", ""]));
        assert_eq!(template.static_headers(1), strings(&["Store"]));
    }
}
