//! Listing Report - store listing status from an inventory feed
//!
//! Reconciles a fixed-width inventory-change feed and a producer ownership
//! roster against a product catalog, then classifies every store of a
//! reference template as listed or delisted and writes the report sheets.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod inventory;
pub mod io;
pub mod parser;
pub mod producers;
pub mod report;
pub mod run;
pub mod template;

pub use catalog::{Product, ProductCatalog};
pub use classifier::{column_name, ReportClassifier, ReportLayout, RowPlacement, Section};
pub use config::ReportConfig;
pub use error::{FeedField, ReportError, Result};
pub use inventory::{InventoryEntry, ListingState, StoreInventoryIndex};
pub use producers::{Color, ColorPool, Producer, ProducerRegistry};
pub use report::ReportRenderer;
pub use run::{generate_report, ReportInputs, ReportSummary};
pub use template::Template;
