//! Item Positioning Operations
//!
//! Manual ordering of items within a (city, category) list.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;

use crate::domain::{Category, DomainError, DomainResult};
use crate::query;
use super::super::db::{db_err, not_initialized};
use super::item_repo::ItemRepository;

/// Trait for item positioning operations
#[async_trait]
pub trait ItemPositioningOperations {
    /// Sort order for a newly added item: current max + 1 (empty list counts as max 0)
    async fn next_sort_order(&self, city: &str, category: Category) -> DomainResult<i32>;

    /// Write `sort_order = index` for every id, in one transaction
    async fn apply_order(&self, ids: &[String]) -> DomainResult<()>;

    /// Move the row at `from` to `to` within the displayed list `ids` and
    /// persist the new order. Returns the ids in their new order.
    async fn move_in_list(&self, ids: &[String], from: usize, to: usize) -> DomainResult<Vec<String>>;
}

#[async_trait]
impl ItemPositioningOperations for ItemRepository {
    async fn next_sort_order(&self, city: &str, category: Category) -> DomainResult<i32> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let max: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(sort_order), 0) FROM items WHERE city = ?1 AND category = ?2",
                params![city, category.as_str()],
                |row| row.get(0),
            )
            .map_err(db_err)?;
        Ok(max + 1)
    }

    async fn apply_order(&self, ids: &[String]) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;

        let now = Utc::now().timestamp_millis();
        let tx = conn.transaction().map_err(db_err)?;
        for (new_pos, id) in ids.iter().enumerate() {
            let changed = tx
                .execute(
                    "UPDATE items SET sort_order = ?1, updated_at = ?2 WHERE id = ?3",
                    params![new_pos as i32, now, id],
                )
                .map_err(db_err)?;
            if changed == 0 {
                // Dropping the transaction rolls back the earlier updates
                return Err(DomainError::NotFound(format!("item {}", id)));
            }
        }
        tx.commit().map_err(db_err)?;
        Ok(())
    }

    async fn move_in_list(&self, ids: &[String], from: usize, to: usize) -> DomainResult<Vec<String>> {
        if from >= ids.len() || to >= ids.len() {
            return Err(DomainError::InvalidInput(format!(
                "cannot move position {} to {} in a list of {}",
                from,
                to,
                ids.len()
            )));
        }
        let order = query::move_item(ids, from, to);
        self.apply_order(&order).await?;
        Ok(order)
    }
}
