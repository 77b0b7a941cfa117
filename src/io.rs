//! File loaders for the report inputs

use std::fs;
use std::path::Path;

use csv::StringRecord;
use log::{debug, info};

use crate::catalog::ProductCatalog;
use crate::error::Result;
use crate::inventory::StoreInventoryIndex;
use crate::parser::{parse_ownership_roster, OwnershipRoster, RosterRow};
use crate::producers::{Color, ProducerRegistry};

fn origin(path: &Path) -> String {
    path.display().to_string()
}

/// Read the product mapping file into a new catalog
pub fn load_catalog(path: &Path) -> Result<ProductCatalog> {
    info!("Reading current product data from {}", path.display());
    let content = fs::read_to_string(path)?;
    debug!("Processing {} lines", content.lines().count());

    let mut catalog = ProductCatalog::new();
    catalog.load_from(&origin(path), content.lines())?;
    Ok(catalog)
}

/// Read the fixed-width inventory feed for the products in `catalog`
pub fn load_feed(path: &Path, catalog: &ProductCatalog) -> Result<StoreInventoryIndex> {
    info!("Reading inventory update from {}", path.display());
    let content = fs::read_to_string(path)?;

    let mut index = StoreInventoryIndex::new();
    index.import_feed(&origin(path), content.lines(), catalog)?;
    Ok(index)
}

/// Header and data records of a CSV document, each record with its line.
///
/// Stops at the first blank line. The csv reader skips empty lines on its
/// own, so a record whose start offset still points at a line terminator
/// ends the block.
pub(crate) fn read_csv_block(content: &[u8]) -> Result<(Vec<String>, Vec<(usize, StringRecord)>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);
    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    let (mut line, mut counted_to) = (1, 0);
    for result in reader.records() {
        let record = result?;
        let start = record_start(content, record.position().map_or(0, |pos| pos.byte() as usize));
        line += content[counted_to..start].iter().filter(|&&b| b == b'\n').count();
        counted_to = start;
        if matches!(content.get(start), Some(b'\r' | b'\n')) {
            debug!("Stopped at blank line {}", line);
            break;
        }
        records.push((line, record));
    }
    Ok((headers, records))
}

/// A CRLF terminator leaves its `\n` to be skipped by the next read.
fn record_start(content: &[u8], offset: usize) -> usize {
    let after_cr = offset > 0 && content.get(offset - 1) == Some(&b'\r');
    if after_cr && content.get(offset) == Some(&b'\n') {
        offset + 1
    } else {
        offset
    }
}

/// Read roster rows from a CSV file with a header row.
///
/// Column 1 is the producer cell, column 2 the product cell. Reading stops
/// at the first blank line or the first row with an empty product cell.
pub fn read_roster_rows(path: &Path) -> Result<Vec<RosterRow>> {
    let (_, records) = read_csv_block(&fs::read(path)?)?;

    let mut rows = Vec::new();
    for (line, record) in records {
        let producer = record.get(0).unwrap_or_default();
        let product = record.get(1).unwrap_or_default();
        if product.trim().is_empty() {
            debug!("Roster ends at blank product cell on line {}", line);
            break;
        }
        rows.push(RosterRow::new(line, producer, product));
    }
    Ok(rows)
}

/// Read and parse the ownership roster
pub fn load_roster(path: &Path) -> Result<OwnershipRoster> {
    info!("Reading producers from {}", path.display());
    let rows = read_roster_rows(path)?;
    parse_ownership_roster(rows)
}

/// Read the roster and register every producer and claim
pub fn load_producers(path: &Path, palette: &[Color]) -> Result<ProducerRegistry> {
    let roster = load_roster(path)?;
    ProducerRegistry::from_roster(roster, palette)
}
