//! Row-level product data read from an import spreadsheet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CategoryPathError;

/// One valid data row of the import sheet, already coerced to typed values.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    /// 1-based sheet row number, kept for log messages.
    pub row: usize,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub weight: Option<Weight>,
    /// Raw category cell, e.g. `"Auto/Brakes/Pads"`.
    pub category_path: String,
    pub seo_title: String,
    pub seo_description: String,
}

/// Product weight as the catalog expects it: `{"unit": "LB", "value": 2.5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub unit: String,
    pub value: f64,
}

/// The parent/child pair taken from a category path cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPath {
    pub parent: String,
    pub child: String,
}

impl CategoryPath {
    /// Parses a category cell into its last two segments.
    ///
    /// A cell may list several comma-separated paths; the last one wins.
    /// Empty segments (leading, trailing or doubled slashes) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryPathError::TooShort`] when fewer than two segments
    /// remain.
    pub fn parse(raw: &str) -> Result<Self, CategoryPathError> {
        let last_path = raw.rsplit(',').next().unwrap_or_default();
        let segments: Vec<&str> = last_path
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [.., parent, child] => Ok(Self {
                parent: (*parent).to_string(),
                child: (*child).to_string(),
            }),
            _ => Err(CategoryPathError::TooShort(raw.to_string())),
        }
    }
}

impl std::fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.parent, self.child)
    }
}
