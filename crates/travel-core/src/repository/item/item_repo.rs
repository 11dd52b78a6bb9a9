//! Item Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for TravelItem CRUD and search.
//! Specialized operations are in separate modules:
//! - item_city: City / category listing and bulk replacement
//! - item_positioning: Manual sort order management

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::domain::{Category, DomainError, DomainResult, Priority, Rating, Status, TravelItem};
use super::super::db::{db_err, not_initialized, SharedConnection};
use super::super::traits::{Repository, SearchableRepository};

/// Column list shared by every item query, in `row_to_item` order
pub(super) const ITEM_COLUMNS: &str = "id, city, category, subcategory, name, details, location, status, priority, rating, user_notes, sort_order, is_pinned, is_admin_added, created_at, updated_at";

/// SQLite implementation of Item repository
#[derive(Clone)]
pub struct ItemRepository {
    pub(super) conn: SharedConnection,
}

impl ItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<TravelItem> for ItemRepository {
    async fn create(&self, entity: &TravelItem) -> DomainResult<TravelItem> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        insert_item(conn, entity).map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DomainError::Conflict(format!("item {} already exists", entity.id))
            }
            other => db_err(other),
        })?;

        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<TravelItem>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let items = query_items(
            conn,
            &format!("SELECT {} FROM items WHERE id = ?1", ITEM_COLUMNS),
            params![id],
        )?;
        Ok(items.into_iter().next())
    }

    async fn list(&self) -> DomainResult<Vec<TravelItem>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        query_items(
            conn,
            &format!(
                "SELECT {} FROM items ORDER BY city, category, sort_order, name",
                ITEM_COLUMNS
            ),
            [],
        )
    }

    async fn update(&self, entity: &TravelItem) -> DomainResult<TravelItem> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut updated = entity.clone();
        updated.updated_at = Utc::now();

        let changed = conn
            .execute(
                "UPDATE items SET city = ?1, category = ?2, subcategory = ?3, name = ?4, details = ?5, location = ?6,
                    status = ?7, priority = ?8, rating = ?9, user_notes = ?10, sort_order = ?11, is_pinned = ?12,
                    is_admin_added = ?13, updated_at = ?14
                 WHERE id = ?15",
                params![
                    updated.city,
                    updated.category.as_str(),
                    updated.subcategory,
                    updated.name,
                    updated.details,
                    updated.location,
                    updated.status.as_str(),
                    updated.priority.map(|p| p.as_str()),
                    updated.rating.map(|r| r.value()),
                    updated.user_notes,
                    updated.sort_order,
                    updated.is_pinned,
                    updated.is_admin_added,
                    updated.updated_at.timestamp_millis(),
                    updated.id,
                ],
            )
            .map_err(db_err)?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("item {}", entity.id)));
        }
        Ok(updated)
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let removed = conn
            .execute("DELETE FROM items WHERE id = ?1", params![id])
            .map_err(db_err)?;
        if removed == 0 {
            return Err(DomainError::NotFound(format!("item {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<TravelItem> for ItemRepository {
    /// Filtered in Rust so non-ASCII text folds the same way as `query::search`
    async fn search(&self, query: &str) -> DomainResult<Vec<TravelItem>> {
        let items = self.list().await?;
        Ok(crate::query::search(&items, query).into_iter().cloned().collect())
    }
}

/// Insert a single item row
pub(super) fn insert_item(conn: &Connection, item: &TravelItem) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO items (id, city, category, subcategory, name, details, location, status, priority, rating,
            user_notes, sort_order, is_pinned, is_admin_added, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            item.id,
            item.city,
            item.category.as_str(),
            item.subcategory,
            item.name,
            item.details,
            item.location,
            item.status.as_str(),
            item.priority.map(|p| p.as_str()),
            item.rating.map(|r| r.value()),
            item.user_notes,
            item.sort_order,
            item.is_pinned,
            item.is_admin_added,
            item.created_at.timestamp_millis(),
            item.updated_at.timestamp_millis(),
        ],
    )
}

/// Run a SELECT over `ITEM_COLUMNS` and map every row
pub(super) fn query_items<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> DomainResult<Vec<TravelItem>> {
    let mut stmt = conn.prepare(sql).map_err(db_err)?;
    let rows = stmt.query_map(params, |row| Ok(row_to_item(row))).map_err(db_err)?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row.map_err(db_err)??);
    }
    Ok(items)
}

fn corrupt(e: DomainError) -> DomainError {
    DomainError::Internal(format!("corrupt item row: {}", e))
}

fn millis_to_datetime(ms: i64) -> DomainResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| DomainError::Internal(format!("invalid timestamp {}", ms)))
}

/// Convert a database row to TravelItem
fn row_to_item(row: &Row) -> DomainResult<TravelItem> {
    let category: String = row.get(2).map_err(db_err)?;
    let status: String = row.get(7).map_err(db_err)?;
    let priority: Option<String> = row.get(8).map_err(db_err)?;
    let rating: Option<u8> = row.get(9).map_err(db_err)?;

    Ok(TravelItem {
        id: row.get(0).map_err(db_err)?,
        city: row.get(1).map_err(db_err)?,
        category: Category::parse(&category).map_err(corrupt)?,
        subcategory: row.get(3).map_err(db_err)?,
        name: row.get(4).map_err(db_err)?,
        details: row.get(5).map_err(db_err)?,
        location: row.get(6).map_err(db_err)?,
        status: Status::parse(&status).map_err(corrupt)?,
        priority: priority
            .as_deref()
            .map(Priority::parse)
            .transpose()
            .map_err(corrupt)?,
        rating: rating.map(Rating::new).transpose().map_err(corrupt)?,
        user_notes: row.get(10).map_err(db_err)?,
        sort_order: row.get(11).map_err(db_err)?,
        is_pinned: row.get(12).map_err(db_err)?,
        is_admin_added: row.get(13).map_err(db_err)?,
        created_at: millis_to_datetime(row.get(14).map_err(db_err)?)?,
        updated_at: millis_to_datetime(row.get(15).map_err(db_err)?)?,
    })
}
