//! Spreadsheet → Local Store Sync
//!
//! First-run seeding and re-import with user data preservation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::path::Path;

use crate::domain::{DomainError, DomainResult, ItemKey, TravelItem};
use crate::repository::{ItemCityOperations, ItemRepository, Repository, SettingsRepository};
use super::spreadsheet::{parse_workbook, rows_to_items};

/// How a re-import treats existing rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Keep status, priority, rating, notes, order and pin of matching items
    #[default]
    KeepUserData,
    /// Drop everything and load the spreadsheet as-is
    ReplaceAll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub is_initialized: bool,
    pub item_count: u32,
    pub last_sync: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Items in the store after the operation
    pub item_count: usize,
    /// Items whose user data was carried over from an earlier import
    pub merged: usize,
    /// True when the store already had data and nothing was imported
    pub skipped: bool,
}

/// True when the local store is still empty
pub async fn needs_initial_sync(repo: &ItemRepository) -> DomainResult<bool> {
    Ok(repo.count().await? == 0)
}

/// Seed the store from the spreadsheet. A store that already holds items is
/// left untouched, so repeated calls are safe.
pub async fn sync_from_spreadsheet(
    repo: &ItemRepository,
    settings: &SettingsRepository,
    path: &Path,
) -> DomainResult<SyncReport> {
    let current = repo.count().await?;
    if current > 0 {
        tracing::debug!(current, "store already seeded, skipping initial sync");
        return Ok(SyncReport {
            item_count: current as usize,
            merged: 0,
            skipped: true,
        });
    }

    let rows = parse_workbook(path)?;
    let items = rows_to_items(&rows);
    if items.is_empty() {
        return Err(DomainError::InvalidInput("No items found in spreadsheet".to_string()));
    }

    let inserted = repo.bulk_insert(&items).await?;
    settings.touch_last_sync(Utc::now()).await?;
    tracing::info!(inserted, path = %path.display(), "initial spreadsheet sync complete");

    Ok(SyncReport {
        item_count: inserted,
        merged: 0,
        skipped: false,
    })
}

/// Re-read the spreadsheet and replace the store according to `strategy`
pub async fn reimport(
    repo: &ItemRepository,
    settings: &SettingsRepository,
    path: &Path,
    strategy: MergeStrategy,
) -> DomainResult<SyncReport> {
    let rows = parse_workbook(path)?;
    let fresh = rows_to_items(&rows);
    // An empty sheet would wipe every imported item along with its notes
    if fresh.is_empty() {
        return Err(DomainError::InvalidInput("No items found in spreadsheet".to_string()));
    }

    let (items, merged) = match strategy {
        MergeStrategy::ReplaceAll => (fresh, 0),
        MergeStrategy::KeepUserData => {
            let existing = repo.list().await?;
            merge_items(existing, fresh, Utc::now())
        }
    };

    let item_count = repo.replace_all(&items).await?;
    settings.touch_last_sync(Utc::now()).await?;
    tracing::info!(item_count, merged, ?strategy, "spreadsheet re-import complete");

    Ok(SyncReport {
        item_count,
        merged,
        skipped: false,
    })
}

/// Merge freshly parsed items with the existing store contents.
///
/// Spreadsheet rows win for base fields (category, subcategory, details,
/// location); a row whose key matches an existing item keeps that item's id
/// and user state. Duplicate keys pair up in manual order, one existing item
/// per fresh row. Admin-added items with no spreadsheet counterpart are kept.
pub fn merge_items(
    mut existing: Vec<TravelItem>,
    fresh: Vec<TravelItem>,
    now: DateTime<Utc>,
) -> (Vec<TravelItem>, usize) {
    existing.sort_by_key(|item| item.sort_order);
    let mut by_key: HashMap<ItemKey, VecDeque<TravelItem>> = HashMap::new();
    for item in existing {
        by_key.entry(item.key()).or_default().push_back(item);
    }

    let mut merged = 0;
    let mut result: Vec<TravelItem> = fresh
        .into_iter()
        .map(|mut item| match by_key.get_mut(&item.key()).and_then(VecDeque::pop_front) {
            Some(old) => {
                merged += 1;
                item.id = old.id;
                item.status = old.status;
                item.priority = old.priority;
                item.rating = old.rating;
                item.user_notes = old.user_notes;
                item.sort_order = old.sort_order;
                item.is_pinned = old.is_pinned;
                item.is_admin_added = old.is_admin_added;
                item.created_at = old.created_at;
                item.updated_at = now;
                item
            }
            None => item,
        })
        .collect();

    let mut admin_only: Vec<TravelItem> = by_key
        .into_values()
        .flatten()
        .filter(|item| item.is_admin_added)
        .collect();
    admin_only.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    result.extend(admin_only);

    (result, merged)
}

pub async fn sync_status(repo: &ItemRepository, settings: &SettingsRepository) -> DomainResult<SyncStatus> {
    let item_count = repo.count().await?;
    let last_sync = settings.load().await?.last_sync;
    Ok(SyncStatus {
        is_initialized: item_count > 0,
        item_count,
        last_sync,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Priority, Rating, Status};
    use crate::repository::init_db;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn write_sheet(dir: &TempDir, rows: &[[&str; 5]]) -> std::path::PathBuf {
        let path = dir.path().join("travel_data.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (c, header) in ["City", "Category", "Name", "Details", "Location"].iter().enumerate() {
            sheet.write_string(0, c as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                sheet.write_string(r as u32 + 1, c as u16, *value).unwrap();
            }
        }
        workbook.save(&path).unwrap();
        path
    }

    async fn setup() -> (ItemRepository, SettingsRepository) {
        let state = init_db(Path::new(":memory:")).await.unwrap();
        (state.item_repo(), state.settings_repo())
    }

    #[tokio::test]
    async fn test_initial_sync_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, &[
            ["Riyadh", "Places", "Masmak Fort", "Old fort", ""],
            ["Riyadh", "Food", "Kabsa", "", ""],
        ]);
        let (repo, settings) = setup().await;

        assert!(needs_initial_sync(&repo).await.unwrap());
        let first = sync_from_spreadsheet(&repo, &settings, &path).await.unwrap();
        assert_eq!(first.item_count, 2);
        assert!(!first.skipped);
        assert!(settings.load().await.unwrap().last_sync.is_some());

        let second = sync_from_spreadsheet(&repo, &settings, &path).await.unwrap();
        assert!(second.skipped);
        assert_eq!(second.item_count, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
        assert!(!needs_initial_sync(&repo).await.unwrap());
    }

    #[tokio::test]
    async fn test_initial_sync_rejects_empty_sheet() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, &[]);
        let (repo, settings) = setup().await;

        let err = sync_from_spreadsheet(&repo, &settings, &path).await.unwrap_err();
        assert_eq!(err, DomainError::InvalidInput("No items found in spreadsheet".to_string()));
        assert_eq!(settings.load().await.unwrap().last_sync, None);
    }

    #[tokio::test]
    async fn test_reimport_keeps_user_data() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, &[
            ["Riyadh", "Places", "Masmak Fort", "Old fort", ""],
            ["Riyadh", "Food", "Kabsa", "", ""],
        ]);
        let (repo, settings) = setup().await;
        sync_from_spreadsheet(&repo, &settings, &path).await.unwrap();

        let mut fort = repo
            .list_by_city_and_category("Riyadh", Category::Places)
            .await
            .unwrap()
            .remove(0);
        fort.toggle_status();
        fort.rating = Some(Rating::new(5).unwrap());
        fort.priority = Some(Priority::Must);
        fort.user_notes = "Go early".to_string();
        fort.sort_order = 9;
        repo.update(&fort).await.unwrap();

        let mut custom = TravelItem::new("Riyadh", Category::Food, "Secret bakery");
        custom.is_admin_added = true;
        repo.create(&custom).await.unwrap();

        // Spreadsheet now has new details for the fort and a new row
        let path = write_sheet(&dir, &[
            ["Riyadh", "Places", "Masmak Fort", "Restored mud-brick fort", "https://maps.example/f"],
            ["Riyadh", "Food", "Kabsa", "", ""],
            ["Jeddah", "Places", "Corniche", "", ""],
        ]);
        let report = reimport(&repo, &settings, &path, MergeStrategy::KeepUserData).await.unwrap();
        assert_eq!(report.merged, 2);
        assert_eq!(report.item_count, 4);

        let reloaded = repo.find_by_id(&fort.id).await.unwrap().expect("fort keeps its id");
        assert_eq!(reloaded.status, Status::Visited);
        assert_eq!(reloaded.rating, Some(Rating::new(5).unwrap()));
        assert_eq!(reloaded.priority, Some(Priority::Must));
        assert_eq!(reloaded.user_notes, "Go early");
        assert_eq!(reloaded.sort_order, 9);
        assert_eq!(reloaded.details, "Restored mud-brick fort");
        assert_eq!(reloaded.location, "https://maps.example/f");

        assert!(repo.find_by_id(&custom.id).await.unwrap().is_some());
        assert_eq!(repo.list_cities().await.unwrap(), vec!["Jeddah", "Riyadh"]);
    }

    #[tokio::test]
    async fn test_reimport_replace_all_discards_user_data() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, &[["Riyadh", "Places", "Masmak Fort", "", ""]]);
        let (repo, settings) = setup().await;
        sync_from_spreadsheet(&repo, &settings, &path).await.unwrap();

        let mut fort = repo.list().await.unwrap().remove(0);
        fort.toggle_status();
        repo.update(&fort).await.unwrap();

        reimport(&repo, &settings, &path, MergeStrategy::ReplaceAll).await.unwrap();

        let items = repo.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_ne!(items[0].id, fort.id);
        assert_eq!(items[0].status, Status::Pending);
    }

    #[test]
    fn test_merge_matches_each_existing_item_once() {
        let now = Utc::now();
        let mut old = TravelItem::new("Riyadh", Category::Food, "Kabsa");
        old.user_notes = "best".to_string();

        let fresh = vec![
            TravelItem::new("Riyadh", Category::Food, "Kabsa"),
            TravelItem::new("Riyadh", Category::Food, "Kabsa"),
        ];
        let (merged, count) = merge_items(vec![old.clone()], fresh, now);

        assert_eq!(count, 1);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, old.id);
        assert_eq!(merged[0].user_notes, "best");
        assert_ne!(merged[1].id, old.id);
        assert_eq!(merged[1].user_notes, "");
    }

    #[test]
    fn test_merge_pairs_duplicate_keys_in_manual_order() {
        let mut first = TravelItem::new("Riyadh", Category::Food, "Kabsa");
        first.user_notes = "first copy".to_string();
        first.sort_order = 0;
        let mut second = TravelItem::new("Riyadh", Category::Food, "Kabsa");
        second.user_notes = "second copy".to_string();
        second.status = Status::Tasted;
        second.is_pinned = true;
        second.sort_order = 1;

        let fresh = vec![
            TravelItem::new("Riyadh", Category::Food, "Kabsa"),
            TravelItem::new("Riyadh", Category::Food, "Kabsa"),
        ];
        // Store order is not manual order
        let (merged, count) = merge_items(vec![second.clone(), first.clone()], fresh, Utc::now());

        assert_eq!(count, 2);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, first.id);
        assert_eq!(merged[0].user_notes, "first copy");
        assert_eq!(merged[1].id, second.id);
        assert_eq!(merged[1].user_notes, "second copy");
        assert_eq!(merged[1].status, Status::Tasted);
        assert!(merged[1].is_pinned);
    }

    #[tokio::test]
    async fn test_reimport_rejects_empty_sheet_and_keeps_store() {
        let dir = TempDir::new().unwrap();
        let path = write_sheet(&dir, &[["Riyadh", "Places", "Masmak Fort", "", ""]]);
        let (repo, settings) = setup().await;
        sync_from_spreadsheet(&repo, &settings, &path).await.unwrap();
        let synced_at = settings.load().await.unwrap().last_sync;

        let mut fort = repo.list().await.unwrap().remove(0);
        fort.toggle_status();
        fort.user_notes = "Go early".to_string();
        repo.update(&fort).await.unwrap();

        let empty = write_sheet(&dir, &[]);
        for strategy in [MergeStrategy::KeepUserData, MergeStrategy::ReplaceAll] {
            let err = reimport(&repo, &settings, &empty, strategy).await.unwrap_err();
            assert_eq!(err, DomainError::InvalidInput("No items found in spreadsheet".to_string()));
        }

        let kept = repo.find_by_id(&fort.id).await.unwrap().expect("fort survives");
        assert_eq!(kept.status, Status::Visited);
        assert_eq!(kept.user_notes, "Go early");
        assert_eq!(settings.load().await.unwrap().last_sync, synced_at);
    }

    #[test]
    fn test_merge_drops_unmatched_imported_items() {
        let stale = TravelItem::new("Riyadh", Category::Places, "Closed museum");
        let (merged, count) = merge_items(vec![stale], Vec::new(), Utc::now());
        assert_eq!(count, 0);
        assert!(merged.is_empty());
    }

    #[tokio::test]
    async fn test_sync_status() {
        let (repo, settings) = setup().await;
        let status = sync_status(&repo, &settings).await.unwrap();
        assert_eq!(
            status,
            SyncStatus {
                is_initialized: false,
                item_count: 0,
                last_sync: None,
            }
        );
    }
}
