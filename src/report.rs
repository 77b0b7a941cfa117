//! Plain-file report renderer.
//!
//! Applies row placements to the template and writes `Listing.csv`,
//! `Delisted.csv` and `placements.json`. CSV cells cannot carry a fill
//! color, so the colors travel in the JSON document next to the cell
//! addresses they belong to.

use std::fmt::Write;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::catalog::ProductCatalog;
use crate::classifier::{column_name, CellRef, ReportLayout, RowPlacement, Section};
use crate::error::{ReportError, Result};
use crate::template::{padded, Template};

pub const DATE_HEADER: &str = "Date Updated";
pub const PLACEMENTS_FILE: &str = "placements.json";

/// A rendered sheet: header row plus data rows, all `width` cells wide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub section: Section,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(section: Section, header: Vec<String>) -> Self {
        Self {
            section,
            rows: vec![header],
        }
    }

    /// Put `value` at a 1-based sheet position, growing the grid as needed
    fn set(&mut self, cell: CellRef, value: String) {
        let width = self.rows[0].len();
        while self.rows.len() < cell.row {
            self.rows.push(vec![String::new(); width]);
        }
        let row = &mut self.rows[cell.row - 1];
        if row.len() < cell.column {
            row.resize(cell.column, String::new());
        }
        row[cell.column - 1] = value;
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ProductColumn<'a> {
    product_id: i32,
    column: usize,
    column_name: String,
    header: String,
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ColoredCell<'a> {
    sheet: &'static str,
    cell: String,
    product_id: i32,
    color: &'a str,
}

#[derive(Debug, Serialize)]
struct PlacementDocument<'a> {
    static_columns: usize,
    products: Vec<ProductColumn<'a>>,
    colored_cells: Vec<ColoredCell<'a>>,
    placements: &'a [RowPlacement],
}

/// Renders placements against a template
pub struct ReportRenderer<'a> {
    template: &'a Template,
    layout: &'a ReportLayout,
    catalog: &'a ProductCatalog,
    date_format: &'a str,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(
        template: &'a Template,
        layout: &'a ReportLayout,
        catalog: &'a ProductCatalog,
        date_format: &'a str,
    ) -> Self {
        Self {
            template,
            layout,
            catalog,
            date_format,
        }
    }

    fn header(&self, section: Section) -> Vec<String> {
        let mut header = self.template.static_headers(self.layout.static_columns());
        if section == Section::Listing {
            header.extend(self.catalog.iter().map(|p| p.header_label()));
        }
        header.push(DATE_HEADER.to_string());
        header
    }

    /// Build both sheets in memory
    pub fn render(&self, placements: &[RowPlacement]) -> Result<(Sheet, Sheet)> {
        let mut listing = Sheet::new(Section::Listing, self.header(Section::Listing));
        let mut delisted = Sheet::new(Section::Delisted, self.header(Section::Delisted));

        for placement in placements {
            let source = self
                .template
                .sheet_row(placement.template_row)
                .ok_or(ReportError::NotFound {
                    kind: "Template row",
                    id: placement.template_row as i32,
                })?;
            let sheet = match placement.section {
                Section::Listing => &mut listing,
                Section::Delisted => &mut delisted,
            };

            let target = placement.static_target();
            let statics = padded(&source.cells, self.layout.static_columns());
            for (offset, value) in statics.into_iter().enumerate() {
                sheet.set(
                    CellRef {
                        column: target.start.column + offset,
                        row: target.start.row,
                    },
                    value,
                );
            }
            for value in &placement.values {
                sheet.set(
                    CellRef {
                        column: value.column,
                        row: placement.sheet_row(),
                    },
                    value.inventory_change.to_string(),
                );
            }
            let mut date = String::new();
            write!(date, "{}", placement.date.format(self.date_format)).map_err(|_| {
                ReportError::InvalidConfig(format!(
                    "date_format {:?} cannot render {}",
                    self.date_format, placement.date
                ))
            })?;
            sheet.set(placement.date_cell(), date);
            debug!(
                "Copied {} to {} on {}",
                placement.static_source,
                target,
                placement.section.sheet_name()
            );
        }

        Ok((listing, delisted))
    }

    fn document<'p>(&'p self, placements: &'p [RowPlacement]) -> Result<PlacementDocument<'p>> {
        let products = self
            .catalog
            .iter()
            .enumerate()
            .map(|(position, product)| -> Result<ProductColumn<'p>> {
                let column = self.layout.product_column(position);
                Ok(ProductColumn {
                    product_id: product.id,
                    column,
                    column_name: column_name(column as i64)?,
                    header: product.header_label(),
                    name: product.name.as_deref(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let colored_cells = placements
            .iter()
            .flat_map(|placement| {
                placement.values.iter().map(move |value| ColoredCell {
                    sheet: placement.section.sheet_name(),
                    cell: CellRef {
                        column: value.column,
                        row: placement.sheet_row(),
                    }
                    .to_string(),
                    product_id: value.product_id,
                    color: value.color.as_str(),
                })
            })
            .collect();

        Ok(PlacementDocument {
            static_columns: self.layout.static_columns(),
            products,
            colored_cells,
            placements,
        })
    }

    /// Write both sheets and the placement document into `output_dir`.
    ///
    /// Returns the paths written.
    pub fn write(&self, placements: &[RowPlacement], output_dir: &Path) -> Result<Vec<PathBuf>> {
        let (listing, delisted) = self.render(placements)?;
        let document = self.document(placements)?;
        fs::create_dir_all(output_dir)?;

        let mut written = Vec::new();
        for sheet in [&listing, &delisted] {
            let path = output_dir.join(format!("{}.csv", sheet.section.sheet_name()));
            sheet.write_csv(&path)?;
            info!(
                "Wrote {} ({} stores)",
                path.display(),
                sheet.rows.len() - 1
            );
            written.push(path);
        }

        let path = output_dir.join(PLACEMENTS_FILE);
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, &document)?;
        info!("Wrote {}", path.display());
        written.push(path);

        Ok(written)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
