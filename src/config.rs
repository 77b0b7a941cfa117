//! Run configuration.
//!
//! Everything has a built-in default; a JSON file may override any field:
//!
//! ```json
//! {
//!   "static_column_count": 10,
//!   "palette": ["#00CED1", "#8FBC8F"],
//!   "date_format": "%-m/%-d/%Y"
//! }
//! ```

use std::fmt::Write;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use log::{debug, info};
use serde::Deserialize;

use crate::error::{ReportError, Result};
use crate::producers::{Color, ColorPool};

/// Store identity and metadata columns copied from the template
pub const DEFAULT_STATIC_COLUMN_COUNT: usize = 10;

/// `m/d/yyyy`
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Producer colors, in push order: the last one is handed out first.
const DEFAULT_PALETTE: [&str; 27] = [
    "#00CED1", // dark turquoise
    "#8FBC8F", // dark sea green
    "#9400D3", // dark violet
    "#E9967A", // dark salmon
    "#BDB76B", // dark khaki
    "#A9A9A9", // dark gray
    "#00FFFF", // cyan
    "#FF1493", // deep pink
    "#ADFF2F", // green yellow
    "#9370DB", // medium purple
    "#BC8F8F", // rosy brown
    "#FF6347", // tomato
    "#7FFFD4", // aquamarine
    "#228B22", // forest green
    "#0000FF", // blue
    "#00BFFF", // deep sky blue
    "#F0E68C", // khaki
    "#FF8C00", // dark orange
    "#FFD700", // gold
    "#008000", // green
    "#F08080", // light coral
    "#90EE90", // light green
    "#20B2AA", // light sea green
    "#BA55D3", // medium orchid
    "#FF4500", // orange red
    "#00FA9A", // medium spring green
    "#DB7093", // pale violet red
];

pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE.iter().map(|c| Color::from(*c)).collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Number of leading template columns copied verbatim into each row
    pub static_column_count: usize,
    pub palette: Vec<Color>,
    /// `chrono` format string for the "Date Updated" column
    pub date_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            static_column_count: DEFAULT_STATIC_COLUMN_COUNT,
            palette: default_palette(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ReportConfig {
    /// Load from a JSON file, or use the defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                let content = std::fs::read_to_string(path)?;
                Self::from_json(&content)?
            }
            None => {
                debug!("No configuration file given, using defaults");
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.static_column_count == 0 {
            return Err(ReportError::InvalidConfig(
                "static_column_count must be at least 1".to_string(),
            ));
        }
        if self.date_format.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "date_format must not be empty".to_string(),
            ));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ReportError::InvalidConfig(format!(
                "date_format {:?} is not a valid chrono format",
                self.date_format
            )));
        }
        // Time and zone fields parse as items but cannot render for a plain date.
        let mut sample = String::new();
        write!(sample, "{}", NaiveDate::MIN.format(&self.date_format)).map_err(|_| {
            ReportError::InvalidConfig(format!(
                "date_format {:?} cannot render a calendar date",
                self.date_format
            ))
        })?;
        ColorPool::from_palette(&self.palette)?;
        Ok(())
    }
}
