//! Spreadsheet Parsing
//!
//! Reads the first worksheet of a workbook into `SheetRow`s and turns them
//! into fresh `TravelItem`s. Column layout (after one header row):
//! A = city, B = category label, C = name, D = details, E = maps link,
//! unless the header row names all five columns elsewhere.

use calamine::{open_workbook_auto, Data, Range, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

use crate::domain::{Category, DomainError, DomainResult, TravelItem};

/// One usable data row of the source sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub city: String,
    pub category: String,
    pub name: String,
    pub details: String,
    pub location: String,
}

/// Parse a workbook file (xlsx, xls, ods)
pub fn parse_workbook(path: &Path) -> DomainResult<Vec<SheetRow>> {
    if !path.exists() {
        return Err(DomainError::NotFound(format!(
            "spreadsheet {}",
            path.display()
        )));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| DomainError::InvalidInput(format!("Failed to open spreadsheet: {}", e)))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DomainError::InvalidInput("Spreadsheet has no worksheets".to_string()))?
        .map_err(|e| DomainError::InvalidInput(format!("Failed to read worksheet: {}", e)))?;

    Ok(rows_from_range(&range))
}

/// Parse an in-memory xlsx workbook
pub fn parse_workbook_bytes(bytes: &[u8]) -> DomainResult<Vec<SheetRow>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| DomainError::InvalidInput(format!("Failed to open spreadsheet: {}", e)))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DomainError::InvalidInput("Spreadsheet has no worksheets".to_string()))?
        .map_err(|e| DomainError::InvalidInput(format!("Failed to read worksheet: {}", e)))?;

    Ok(rows_from_range(&range))
}

/// Column positions of the five source fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    city: usize,
    category: usize,
    name: usize,
    details: usize,
    location: usize,
}

impl ColumnMap {
    /// Plain layout: A..E
    const POSITIONAL: ColumnMap = ColumnMap {
        city: 0,
        category: 1,
        name: 2,
        details: 3,
        location: 4,
    };

    /// Locate columns by header text, so exported workbooks (which carry a
    /// subcategory column) read back. Falls back to the positional layout
    /// unless every header is found.
    fn from_header(header: &[String]) -> Self {
        let find = |label: &str| header.iter().position(|h| h.eq_ignore_ascii_case(label));
        match (find("city"), find("category"), find("name"), find("details"), find("location")) {
            (Some(city), Some(category), Some(name), Some(details), Some(location)) => ColumnMap {
                city,
                category,
                name,
                details,
                location,
            },
            _ => Self::POSITIONAL,
        }
    }
}

fn rows_from_range(range: &Range<Data>) -> Vec<SheetRow> {
    // Ranges start at the first used cell; columns are addressed absolutely
    let start_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let cell = |row: &[Data], col: usize| -> String {
        col.checked_sub(start_col)
            .and_then(|idx| row.get(idx))
            .map(cell_text)
            .unwrap_or_default()
    };

    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => {
            let width = start_col + header.len();
            let labels: Vec<String> = (0..width).map(|col| cell(header, col)).collect();
            ColumnMap::from_header(&labels)
        }
        None => return Vec::new(),
    };

    rows.filter_map(|row| {
        let city = cell(row, columns.city);
        let name = cell(row, columns.name);
        if city.is_empty() || name.is_empty() {
            return None;
        }
        Some(SheetRow {
            city,
            category: cell(row, columns.category),
            name,
            details: cell(row, columns.details),
            location: cell(row, columns.location),
        })
    })
    .collect()
}

/// Render any cell as trimmed text
fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

/// Guess a subcategory from the item's name and details
pub fn detect_subcategory(name: &str, details: &str) -> Option<String> {
    let combined = format!("{} {}", name, details).to_lowercase();

    if combined.contains("abaya") || combined.contains("thobe") {
        Some("abaya-thobe".to_string())
    } else if combined.contains("historical") || combined.contains("history") {
        Some("historical".to_string())
    } else if combined.contains("modern") {
        Some("modern".to_string())
    } else {
        None
    }
}

/// Turn parsed rows into pending items in sheet order
pub fn rows_to_items(rows: &[SheetRow]) -> Vec<TravelItem> {
    rows.iter()
        .enumerate()
        .map(|(sort_order, row)| {
            let mut item = TravelItem::new(row.city.clone(), Category::from_label(&row.category), row.name.clone());
            item.subcategory = detect_subcategory(&row.name, &row.details);
            item.details = row.details.clone();
            item.location = row.location.clone();
            item.sort_order = sort_order as i32;
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use rust_xlsxwriter::Workbook;

    fn workbook_bytes(rows: &[[&str; 5]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (c, header) in ["City", "Category", "Name", "Details", "Location"].iter().enumerate() {
            sheet.write_string(0, c as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32 + 1, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_parse_skips_header_and_incomplete_rows() {
        let bytes = workbook_bytes(&[
            ["Riyadh", "Places to visit", "Masmak Fort", "Historical fort", "https://maps.example/1"],
            ["", "Food", "No city", "", ""],
            ["Riyadh", "Food", "", "No name", ""],
            ["  Jeddah ", "Shopping", " Souq ", "", ""],
        ]);

        let rows = parse_workbook_bytes(&bytes).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Masmak Fort");
        assert_eq!(rows[0].location, "https://maps.example/1");
        assert_eq!(rows[1].city, "Jeddah");
        assert_eq!(rows[1].name, "Souq");
        assert_eq!(rows[1].details, "");
    }

    #[test]
    fn test_numeric_cells_render_as_text() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "City").unwrap();
        sheet.write_string(1, 0, "Riyadh").unwrap();
        sheet.write_string(1, 1, "Places").unwrap();
        sheet.write_number(1, 2, 42.0).unwrap();
        sheet.write_number(1, 3, 2.5).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = parse_workbook_bytes(&bytes).unwrap();
        assert_eq!(rows[0].name, "42");
        assert_eq!(rows[0].details, "2.5");
    }

    #[test]
    fn test_header_names_override_positions() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (c, header) in ["City", "Category", "Subcategory", "Name", "Details", "Location"].iter().enumerate() {
            sheet.write_string(0, c as u16, *header).unwrap();
        }
        for (c, value) in ["Riyadh", "places", "historical", "Masmak Fort", "Fort", "https://m/1"].iter().enumerate() {
            sheet.write_string(1, c as u16, *value).unwrap();
        }
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = parse_workbook_bytes(&bytes).unwrap();
        assert_eq!(rows[0].name, "Masmak Fort");
        assert_eq!(rows[0].details, "Fort");
        assert_eq!(rows[0].location, "https://m/1");
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_workbook(Path::new("/definitely/not/here.xlsx")).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_parse_garbage_bytes() {
        assert!(parse_workbook_bytes(b"not a workbook").is_err());
    }

    #[test]
    fn test_detect_subcategory() {
        assert_eq!(detect_subcategory("Abaya shop", "").as_deref(), Some("abaya-thobe"));
        assert_eq!(detect_subcategory("Tailor", "Custom THOBE").as_deref(), Some("abaya-thobe"));
        assert_eq!(detect_subcategory("Old town", "rich history").as_deref(), Some("historical"));
        assert_eq!(detect_subcategory("Modern art", "").as_deref(), Some("modern"));
        assert_eq!(detect_subcategory("Kabsa house", "rice"), None);
    }

    #[test]
    fn test_rows_to_items() {
        let rows = vec![
            SheetRow {
                city: "Riyadh".into(),
                category: "Shopping".into(),
                name: "Abaya boutique".into(),
                details: "".into(),
                location: "".into(),
            },
            SheetRow {
                city: "Riyadh".into(),
                category: "Food".into(),
                name: "Kabsa".into(),
                details: "".into(),
                location: "https://maps.example/k".into(),
            },
        ];

        let items = rows_to_items(&rows);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, Category::Shopping);
        assert_eq!(items[0].subcategory.as_deref(), Some("abaya-thobe"));
        assert_eq!(items[1].sort_order, 1);
        assert_eq!(items[1].status, Status::Pending);
        assert!(!items[1].is_admin_added);
        assert_ne!(items[0].id, items[1].id);
    }
}
