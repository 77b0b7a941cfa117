//! Bounded stack of palette colors

use std::collections::HashSet;

use crate::error::{ReportError, Result};

use super::Color;

/// Colors not currently assigned to a producer.
///
/// The palette is pushed in order, so the last palette entry is handed out
/// first and a returned color is the next one reused.
#[derive(Debug, Clone)]
pub struct ColorPool {
    stack: Vec<Color>,
    capacity: usize,
}

impl ColorPool {
    /// Build a full pool from a palette of distinct colors
    pub fn from_palette(palette: &[Color]) -> Result<Self> {
        if palette.is_empty() {
            return Err(ReportError::InvalidConfig("palette is empty".to_string()));
        }
        let mut seen = HashSet::with_capacity(palette.len());
        if let Some(dup) = palette.iter().find(|color| !seen.insert(*color)) {
            return Err(ReportError::InvalidConfig(format!(
                "palette lists {dup} more than once"
            )));
        }

        let mut stack = Vec::with_capacity(palette.len());
        stack.extend(palette.iter().cloned());
        Ok(Self {
            stack,
            capacity: palette.len(),
        })
    }

    /// Take the most recently pushed color
    pub fn pop(&mut self) -> Option<Color> {
        self.stack.pop()
    }

    /// Return a color; hands it back if the pool is already full
    pub fn push(&mut self, color: Color) -> std::result::Result<(), Color> {
        if self.stack.len() >= self.capacity {
            return Err(color);
        }
        self.stack.push(color);
        Ok(())
    }

    /// The color the next `pop` would return
    pub fn contains(&self, color: &Color) -> bool {
        self.stack.contains(color)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Size of the palette the pool was built from
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
