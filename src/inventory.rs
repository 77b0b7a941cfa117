//! Inventory-change entries grouped by store and product

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use log::{debug, info};

use crate::catalog::ProductCatalog;
use crate::error::{ReportError, Result};
use crate::parser::{parse_inventory_entry, peek_product_id};

/// Listing status of a product at a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingState {
    Listed,
    Delisted,
    /// Listed by head office regardless of the store's choice
    Forced,
}

impl ListingState {
    /// Decode the single-letter feed code
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'L' => Some(ListingState::Listed),
            'D' => Some(ListingState::Delisted),
            'F' => Some(ListingState::Forced),
            _ => None,
        }
    }

    /// Whether the product counts as carried by the store
    pub fn is_active(self) -> bool {
        matches!(self, ListingState::Listed | ListingState::Forced)
    }
}

/// One line of the inventory-change feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub entry_date: NaiveDate,
    pub product_id: i32,
    pub store_id: i32,
    pub inventory_change: i32,
    pub listing_state: ListingState,
}

static NO_ENTRIES: BTreeMap<i32, InventoryEntry> = BTreeMap::new();

/// Entries per store, per product
#[derive(Debug, Clone, Default)]
pub struct StoreInventoryIndex {
    stores: HashMap<i32, BTreeMap<i32, InventoryEntry>>,
}

impl StoreInventoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; a second entry for the same store and product is an error
    pub fn add_entry(&mut self, entry: InventoryEntry) -> Result<()> {
        let products = self.stores.entry(entry.store_id).or_default();
        if products.contains_key(&entry.product_id) {
            return Err(ReportError::DuplicateEntry {
                store_id: entry.store_id,
                product_id: entry.product_id,
            });
        }
        products.insert(entry.product_id, entry);
        Ok(())
    }

    /// Import a whole feed.
    ///
    /// Lines for products missing from `catalog` are skipped. Any other
    /// problem aborts the import and leaves the index as it was.
    pub fn import_feed<'a, I>(&mut self, origin: &str, lines: I, catalog: &ProductCatalog) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if catalog.is_empty() {
            return Err(ReportError::EmptyCatalog);
        }

        let mut staged = self.clone();
        let mut imported = 0usize;
        let mut skipped = 0usize;

        for (index, line) in lines.into_iter().enumerate() {
            let line_no = index + 1;
            let product_id = peek_product_id(line).map_err(|e| e.at_line(origin, line_no))?;
            if !catalog.contains(product_id) {
                skipped += 1;
                continue;
            }

            let entry = parse_inventory_entry(line).map_err(|e| e.at_line(origin, line_no))?;
            staged
                .add_entry(entry)
                .map_err(|e| e.at_line(origin, line_no))?;
            imported += 1;
        }

        debug!("Skipped {} feed lines for products outside the catalog", skipped);
        info!(
            "Found {} entries for tracked products in {} store{}",
            imported,
            staged.store_count(),
            if staged.store_count() != 1 { "s" } else { "" }
        );

        *self = staged;
        Ok(())
    }

    /// Entries for a store keyed by product id; empty for an unknown store
    pub fn entries_for_store(&self, store_id: i32) -> &BTreeMap<i32, InventoryEntry> {
        self.stores.get(&store_id).unwrap_or(&NO_ENTRIES)
    }

    /// True iff any of the store's entries is Listed or Forced
    pub fn has_any_listed_or_forced(&self, store_id: i32) -> bool {
        self.entries_for_store(store_id)
            .values()
            .any(|entry| entry.listing_state.is_active())
    }

    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    pub fn entry_count(&self) -> usize {
        self.stores.values().map(BTreeMap::len).sum()
    }

    /// Store ids present in the index, ascending
    pub fn store_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.stores.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
