//! Read products from the first worksheet of a spreadsheet.
//!
//! The first non-empty row is the header and must contain `name`, `year`,
//! `price`, `cpu model` and `hard disk size` (any case, surrounding
//! whitespace ignored, any order). Extra columns are ignored.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::objects::product::{Product, ProductData};

/// Header names every sheet must carry, already normalized.
pub const REQUIRED_HEADERS: [&str; 5] = ["name", "year", "price", "cpu model", "hard disk size"];

static EMPTY_CELL: Data = Data::Empty;

/// Column index of each required header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    name: usize,
    year: usize,
    price: usize,
    cpu: usize,
    disk: usize,
}

/// Read every valid product row from the spreadsheet at `path`.
///
/// Structural problems (missing file, no sheet data, bad headers) are logged
/// and yield an empty list. Rows with a blank name or non-numeric year/price
/// are skipped individually.
pub fn read_products_from_excel<P: AsRef<Path>>(path: P) -> Vec<Product> {
    let path = path.as_ref();

    if !path.exists() {
        log::error!("File not found: {}", path.display());
        return vec![];
    }

    let products = match read_first_sheet(path) {
        Ok(Some(range)) => products_from_range(&range),
        Ok(None) => {
            log::error!("Excel file is empty: {}", path.display());
            vec![]
        }
        Err(e) => {
            log::error!("Error reading Excel: {}", e);
            vec![]
        }
    };

    println!("\n{} valid products loaded from Excel.", products.len());
    products
}

/// Open the workbook and return the used range of its first sheet, if any.
fn read_first_sheet(path: &Path) -> Result<Option<Range<Data>>, String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Ok(None);
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {e}", sheet_name))?;

    if range.is_empty() {
        return Ok(None);
    }

    Ok(Some(range))
}

fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|cell| cell_text(cell).trim().is_empty())
}

fn products_from_range(range: &Range<Data>) -> Vec<Product> {
    // Row numbers are 1-based and relative to the sheet, for diagnostics.
    let first_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let mut rows = range
        .rows()
        .enumerate()
        .filter(|(_, row)| !is_blank_row(row));

    let Some((_, header_row)) = rows.next() else {
        log::error!("Excel file is empty.");
        return vec![];
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_text(cell).trim().to_lowercase())
        .collect();

    let columns = match resolve_columns(&headers) {
        Some(columns) => columns,
        None => {
            log::error!("Invalid Excel headers.");
            log::error!("Expected: {}", REQUIRED_HEADERS.join(", "));
            log::error!("Found: {}", headers.join(", "));
            return vec![];
        }
    };

    let mut products = vec![];
    for (offset, row) in rows {
        match parse_row(row, &columns) {
            Ok(product) => products.push(product),
            Err(reason) => {
                log::warn!("Skipping invalid row {}: {}", first_row + offset, reason);
            }
        }
    }

    products
}

fn resolve_columns(headers: &[String]) -> Option<Columns> {
    let position = |name: &str| headers.iter().position(|h| h == name);

    Some(Columns {
        name: position("name")?,
        year: position("year")?,
        price: position("price")?,
        cpu: position("cpu model")?,
        disk: position("hard disk size")?,
    })
}

fn parse_row(row: &[Data], columns: &Columns) -> Result<Product, String> {
    let cell = |index: usize| row.get(index).unwrap_or(&EMPTY_CELL);

    let name = cell_text(cell(columns.name));
    if name.trim().is_empty() {
        return Err("name is blank".to_string());
    }

    let year = cell_year(cell(columns.year))?;
    let price = cell_number(cell(columns.price)).map_err(|e| format!("price {e}"))?;
    let cpu = cell_text(cell(columns.cpu));
    let disk = cell_text(cell(columns.disk));

    Ok(Product::new(&name, ProductData::new(year, price, &cpu, &disk)))
}

/// Render a cell as text the way a user sees it in the sheet.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric content of a cell. Text is accepted when it parses as a number.
fn cell_number(cell: &Data) -> Result<f64, String> {
    match cell {
        Data::Int(i) => Ok(*i as f64),
        Data::Float(f) => Ok(*f),
        Data::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| format!("'{}' is not a number", s)),
        Data::Empty => Err("is empty".to_string()),
        other => Err(format!("'{}' is not a number", other)),
    }
}

fn cell_year(cell: &Data) -> Result<i32, String> {
    let value = cell_number(cell).map_err(|e| format!("year {e}"))?;
    let rounded = value.round_ties_even();

    if rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
        return Err(format!("year {} is out of range", value));
    }

    Ok(rounded as i32)
}
