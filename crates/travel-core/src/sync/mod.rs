//! Spreadsheet Sync
//!
//! Parsing of the bundled workbook and reconciliation with the local store.

mod spreadsheet;
mod reconcile;

pub use spreadsheet::{detect_subcategory, parse_workbook, parse_workbook_bytes, rows_to_items, SheetRow};
pub use reconcile::{
    merge_items, needs_initial_sync, reimport, sync_from_spreadsheet, sync_status, MergeStrategy,
    SyncReport, SyncStatus,
};
