//! Producers and their color-coded product ownership.
//!
//! - [`color_pool`] - bounded stack of unassigned palette colors
//! - [`registry`] - producer registry enforcing exclusive ownership

pub mod color_pool;
pub mod registry;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use color_pool::ColorPool;
pub use registry::ProducerRegistry;

/// A display color, as written in the palette (e.g. `"#00CED1"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A producer owning a set of products.
///
/// Color and owned products are only changed by [`ProducerRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Producer {
    pub id: i32,
    pub name: String,
    display_color: Option<Color>,
    product_ids: Vec<i32>,
}

impl Producer {
    /// A colorless producer owning nothing yet
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            display_color: None,
            product_ids: Vec::new(),
        }
    }

    pub fn display_color(&self) -> Option<&Color> {
        self.display_color.as_ref()
    }

    /// Owned products in the order they were claimed
    pub fn product_ids(&self) -> &[i32] {
        &self.product_ids
    }
}
