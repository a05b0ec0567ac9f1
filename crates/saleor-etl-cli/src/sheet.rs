//! Reads product rows out of the first worksheet of an import workbook.
//!
//! Columns are positional. The header row is skipped, at most `limit` data
//! rows are looked at, and rows without a price are dropped.

use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_decimal::Decimal;
use saleor_etl_core::{ImportRow, Weight};

/// Zero-based column offsets of each field in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnLayout {
    pub name: usize,
    pub sku: usize,
    pub price: usize,
    pub weight: usize,
    pub category: usize,
    pub seo_title: usize,
    pub seo_description: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            name: 0,
            sku: 1,
            price: 2,
            weight: 8,
            category: 11,
            seo_title: 13,
            seo_description: 14,
        }
    }
}

/// Opens `path` (`.xls`, `.xlsx`, `.ods`, ...) and returns its first worksheet.
///
/// # Errors
///
/// Returns an error if the workbook cannot be opened, has no worksheets, or
/// the first worksheet cannot be read.
pub(crate) fn open_sheet(path: &Path) -> anyhow::Result<Range<Data>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook {} has no worksheets", path.display()))?
        .with_context(|| format!("failed to read first worksheet of {}", path.display()))
}

/// Reads [`ImportRow`]s out of a worksheet opened with [`open_sheet`].
///
/// Positions are absolute: a sheet with blank leading rows or an empty first
/// column still reads each field from its fixed column.
pub(crate) fn extract_sheet<'a>(
    sheet: &'a Range<Data>,
    layout: ColumnLayout,
    limit: usize,
    weight_unit: &'a str,
) -> impl Iterator<Item = ImportRow> + 'a {
    let origin = sheet
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));
    extract_rows(sheet.rows(), origin, layout, limit, weight_unit)
}

/// Lazily turns sheet rows into [`ImportRow`]s.
///
/// `origin` is the zero-based (row, column) of the first cell in `rows`.
/// Sheet row 0 is the header, only sheet rows `1..=limit` are read, and row
/// numbers in the output are 1-based sheet rows.
pub(crate) fn extract_rows<'a, R>(
    rows: R,
    origin: (usize, usize),
    layout: ColumnLayout,
    limit: usize,
    weight_unit: &'a str,
) -> impl Iterator<Item = ImportRow> + 'a
where
    R: IntoIterator<Item = &'a [Data]>,
    R::IntoIter: 'a,
{
    let (first_row, first_col) = origin;
    rows.into_iter()
        .enumerate()
        .map(move |(idx, cells)| (first_row + idx, cells))
        .filter(|(sheet_row, _)| *sheet_row >= 1)
        .take_while(move |(sheet_row, _)| *sheet_row <= limit)
        .filter_map(move |(sheet_row, cells)| {
            read_row(sheet_row + 1, cells, first_col, layout, weight_unit)
        })
}

fn read_row(
    row: usize,
    cells: &[Data],
    first_col: usize,
    layout: ColumnLayout,
    weight_unit: &str,
) -> Option<ImportRow> {
    let cell = |col: usize| {
        col.checked_sub(first_col)
            .and_then(|offset| cells.get(offset))
            .unwrap_or(&Data::Empty)
    };

    let price = match cell_decimal(cell(layout.price)) {
        Ok(Some(price)) if !price.is_zero() => price,
        Ok(_) => {
            tracing::debug!(row, "skipping row without a price");
            return None;
        }
        Err(raw) => {
            tracing::warn!(row, price = %raw, "skipping row with a non-numeric price");
            return None;
        }
    };

    let sku = cell_text(cell(layout.sku));
    if sku.is_empty() {
        tracing::warn!(row, "skipping row without a SKU");
        return None;
    }

    let weight = match cell_f64(cell(layout.weight)) {
        Ok(value) => value.map(|value| Weight {
            unit: weight_unit.to_string(),
            value,
        }),
        Err(raw) => {
            tracing::warn!(row, %sku, weight = %raw, "ignoring non-numeric weight");
            None
        }
    };

    Some(ImportRow {
        row,
        name: cell_text(cell(layout.name)),
        sku,
        price,
        weight,
        category_path: cell_text(cell(layout.category)),
        seo_title: cell_text(cell(layout.seo_title)),
        seo_description: cell_text(cell(layout.seo_description)),
    })
}

/// Renders a cell as trimmed text. Whole floats lose their `.0` so numeric
/// SKUs come out as `"1042"`, not `"1042.0"`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        #[allow(clippy::cast_possible_truncation)]
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// `Ok(None)` for an empty cell, `Err(raw text)` for text that is not a number.
fn cell_decimal(cell: &Data) -> Result<Option<Decimal>, String> {
    match cell {
        Data::Empty => Ok(None),
        Data::Int(i) => Ok(Some(Decimal::from(*i))),
        Data::Float(f) => Decimal::from_str(&f.to_string())
            .map(Some)
            .map_err(|_| f.to_string()),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            Decimal::from_str(trimmed.trim_start_matches('$'))
                .map(Some)
                .map_err(|_| trimmed.to_string())
        }
        other => Err(other.to_string()),
    }
}

fn cell_f64(cell: &Data) -> Result<Option<f64>, String> {
    match cell {
        Data::Empty => Ok(None),
        #[allow(clippy::cast_precision_loss)]
        Data::Int(i) => Ok(Some(*i as f64)),
        Data::Float(f) => Ok(Some(*f)),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| trimmed.to_string())
        }
        other => Err(other.to_string()),
    }
}
