//! Product catalog built from the product mapping file
//!
//! Products keep the order in which they were defined; that order decides the
//! report's product columns.

use std::collections::HashMap;

use log::{debug, info};
use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::parser::{is_comment_line, parse_product_definition, SyntheticIdSource};

/// A product known to the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: i32,
    pub name: Option<String>,
}

impl Product {
    pub fn new(id: i32, name: Option<String>) -> Self {
        Self { id, name }
    }

    /// Whether the id was issued by the catalog rather than declared
    pub fn is_synthetic(&self) -> bool {
        self.id < 0
    }

    /// Column header text for this product.
    ///
    /// Named products show their id on a second line, except synthetic ones
    /// whose id means nothing to a reader. Unnamed products show only the id.
    pub fn header_label(&self) -> String {
        match &self.name {
            Some(name) if self.is_synthetic() => name.clone(),
            Some(name) => format!("{}\n({})", name, self.id),
            None => self.id.to_string(),
        }
    }
}

/// Product lookup by id, in definition order
#[derive(Debug)]
pub struct ProductCatalog {
    products: Vec<Product>,
    positions: HashMap<i32, usize>,
    last_synthetic: i32,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            positions: HashMap::new(),
            last_synthetic: 0,
        }
    }

    /// Load product definitions, skipping `;` comment lines.
    ///
    /// Errors carry the 1-based line number within `lines`.
    pub fn load<'a, I>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.load_from("product mapping", lines)
    }

    /// Same as [`ProductCatalog::load`], naming the input in error context
    pub fn load_from<'a, I>(&mut self, origin: &str, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let before = self.products.len();
        for (index, line) in lines.into_iter().enumerate() {
            if is_comment_line(line) {
                debug!("Skipping comment line {}", index + 1);
                continue;
            }
            let product = parse_product_definition(line, self)
                .map_err(|e| e.at_line(origin, index + 1))?;
            self.insert(product)
                .map_err(|e| e.at_line(origin, index + 1))?;
        }

        info!(
            "{} products successfully added ({} total)",
            self.products.len() - before,
            self.products.len()
        );
        Ok(())
    }

    /// Add a single product, rejecting an id that is already taken
    pub fn insert(&mut self, product: Product) -> Result<()> {
        if let Some(&pos) = self.positions.get(&product.id) {
            return Err(ReportError::DuplicateProductId {
                id: product.id,
                new_name: product.name,
                existing_name: self.products[pos].name.clone(),
            });
        }
        debug!("Adding product {} ({:?})", product.id, product.name);
        self.positions.insert(product.id, self.products.len());
        self.products.push(product);
        Ok(())
    }

    pub fn lookup(&self, id: i32) -> Result<&Product> {
        self.positions
            .get(&id)
            .map(|&pos| &self.products[pos])
            .ok_or(ReportError::NotFound { kind: "Product", id })
    }

    pub fn contains(&self, id: i32) -> bool {
        self.positions.contains_key(&id)
    }

    /// Position of a product in definition order (0-based)
    pub fn position(&self, id: i32) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate products in definition order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Start synthetic ids just above `last`, so the next one issued is `last - 1`
    #[cfg(test)]
    pub(crate) fn with_last_synthetic(last: i32) -> Self {
        Self {
            last_synthetic: last,
            ..Self::new()
        }
    }
}

impl SyntheticIdSource for ProductCatalog {
    fn issue_synthetic_id(&mut self) -> Result<i32> {
        let next = self
            .last_synthetic
            .checked_sub(1)
            .ok_or(ReportError::IdSpaceExhausted)?;
        self.last_synthetic = next;
        Ok(next)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
