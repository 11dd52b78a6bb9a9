//! Spreadsheet Export
//!
//! One-way dump of the local store into an `.xlsx` workbook.

use chrono::{NaiveDate, SecondsFormat};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

use crate::domain::{DomainError, DomainResult, TravelItem};

pub const EXPORT_SHEET_NAME: &str = "Travel Data";

pub const EXPORT_HEADERS: [&str; 14] = [
    "City",
    "Category",
    "Subcategory",
    "Name",
    "Details",
    "Location",
    "Status",
    "Priority",
    "Rating",
    "User Notes",
    "Sort Order",
    "Pinned",
    "Admin Added",
    "Last Updated",
];

fn xlsx_err(e: XlsxError) -> DomainError {
    DomainError::Internal(format!("Failed to write spreadsheet: {}", e))
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Build the export workbook in memory
pub fn export_items(items: &[TravelItem]) -> DomainResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    fill_sheet(worksheet, items).map_err(xlsx_err)?;
    workbook.save_to_buffer().map_err(xlsx_err)
}

/// Write the export workbook to `path`, creating parent directories
pub fn export_to_file(items: &[TravelItem], path: &Path) -> DomainResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DomainError::Internal(e.to_string()))?;
    }
    let bytes = export_items(items)?;
    std::fs::write(path, bytes).map_err(|e| DomainError::Internal(e.to_string()))?;
    tracing::info!(count = items.len(), path = %path.display(), "exported items");
    Ok(())
}

/// `travel_data_YYYY-MM-DD.xlsx`
pub fn default_export_file_name(date: NaiveDate) -> String {
    format!("travel_data_{}.xlsx", date.format("%Y-%m-%d"))
}

fn fill_sheet(worksheet: &mut Worksheet, items: &[TravelItem]) -> Result<(), XlsxError> {
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    let mut sorted: Vec<&TravelItem> = items.iter().collect();
    sorted.sort_by(|a, b| {
        a.city
            .cmp(&b.city)
            .then(a.category.cmp(&b.category))
            .then(a.sort_order.cmp(&b.sort_order))
    });

    for (idx, item) in sorted.iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet.write_string(row, 0, &item.city)?;
        // Spreadsheet labels; Category::from_label maps them back on import
        worksheet.write_string(row, 1, item.category.display_name())?;
        if let Some(sub) = &item.subcategory {
            worksheet.write_string(row, 2, sub)?;
        }
        worksheet.write_string(row, 3, &item.name)?;
        if !item.details.is_empty() {
            worksheet.write_string(row, 4, &item.details)?;
        }
        if !item.location.is_empty() {
            worksheet.write_string(row, 5, &item.location)?;
        }
        worksheet.write_string(row, 6, item.status.as_str())?;
        if let Some(priority) = item.priority {
            worksheet.write_string(row, 7, priority.as_str())?;
        }
        if let Some(rating) = item.rating {
            worksheet.write_number(row, 8, f64::from(rating.value()))?;
        }
        if !item.user_notes.is_empty() {
            worksheet.write_string(row, 9, &item.user_notes)?;
        }
        worksheet.write_number(row, 10, f64::from(item.sort_order))?;
        worksheet.write_string(row, 11, yes_no(item.is_pinned))?;
        worksheet.write_string(row, 12, yes_no(item.is_admin_added))?;
        worksheet.write_string(
            row,
            13,
            &item.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        )?;
    }

    worksheet.set_column_width(3, 30)?;
    worksheet.set_column_width(4, 40)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Priority, Rating};
    use crate::sync::parse_workbook;
    use calamine::{open_workbook_auto, Data, Reader};
    use tempfile::TempDir;

    fn sample_items() -> Vec<TravelItem> {
        let mut kabsa = TravelItem::new("Riyadh", Category::Food, "Kabsa");
        kabsa.sort_order = 0;
        kabsa.rating = Some(Rating::new(5).unwrap());
        kabsa.is_pinned = true;

        let mut fort = TravelItem::new("Riyadh", Category::Places, "Masmak Fort");
        fort.subcategory = Some("historical".to_string());
        fort.details = "Mud-brick fort".to_string();
        fort.location = "https://maps.example/fort".to_string();
        fort.priority = Some(Priority::Must);
        fort.toggle_status();

        let mut souq = TravelItem::new("Jeddah", Category::Shopping, "Souq");
        souq.is_admin_added = true;

        vec![kabsa, fort, souq]
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(default_export_file_name(date), "travel_data_2024-03-07.xlsx");
    }

    #[test]
    fn test_export_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.xlsx");
        export_to_file(&sample_items(), &path).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![EXPORT_SHEET_NAME.to_string()]);
        let range = workbook.worksheet_range(EXPORT_SHEET_NAME).unwrap();

        let header: Vec<String> = range.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
        assert_eq!(header, EXPORT_HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>());

        // Jeddah first, then Riyadh places before food
        let cities: Vec<String> = range.rows().skip(1).map(|r| r[0].to_string()).collect();
        assert_eq!(cities, vec!["Jeddah", "Riyadh", "Riyadh"]);
        let fort = range.rows().nth(2).unwrap();
        assert_eq!(fort[1], Data::String("Places to Visit".to_string()));
        assert_eq!(fort[3], Data::String("Masmak Fort".to_string()));
        assert_eq!(fort[6], Data::String("visited".to_string()));
        assert_eq!(fort[7], Data::String("must".to_string()));
        assert_eq!(fort[8], Data::Empty);
        assert_eq!(fort[11], Data::String("No".to_string()));

        let kabsa = range.rows().nth(3).unwrap();
        assert_eq!(kabsa[1], Data::String("Food Spots".to_string()));
        assert_eq!(kabsa[8], Data::Float(5.0));
        assert_eq!(kabsa[11], Data::String("Yes".to_string()));

        let souq = range.rows().nth(1).unwrap();
        assert_eq!(souq[12], Data::String("Yes".to_string()));
    }

    #[test]
    fn test_export_reads_back_through_import() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roundtrip.xlsx");
        export_to_file(&sample_items(), &path).unwrap();

        let rows = parse_workbook(&path).unwrap();
        assert_eq!(rows.len(), 3);
        let fort = rows.iter().find(|r| r.name == "Masmak Fort").unwrap();
        assert_eq!(Category::from_label(&fort.category), Category::Places);
        assert_eq!(fort.details, "Mud-brick fort");
        assert_eq!(fort.location, "https://maps.example/fort");
        let souq = rows.iter().find(|r| r.name == "Souq").unwrap();
        assert_eq!(Category::from_label(&souq.category), Category::Shopping);
        let kabsa = rows.iter().find(|r| r.name == "Kabsa").unwrap();
        assert_eq!(Category::from_label(&kabsa.category), Category::Food);
    }

    #[test]
    fn test_export_empty_store() {
        let bytes = export_items(&[]).unwrap();
        assert!(crate::sync::parse_workbook_bytes(&bytes).unwrap().is_empty());
    }
}
