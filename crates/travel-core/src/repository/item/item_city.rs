//! Item City Operations
//!
//! Listing by city / category and the bulk writes used by spreadsheet sync.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{Category, DomainResult, TravelItem};
use super::super::db::{db_err, not_initialized};
use super::item_repo::{insert_item, query_items, ItemRepository, ITEM_COLUMNS};

/// Trait for city-scoped and bulk item operations
#[async_trait]
pub trait ItemCityOperations {
    /// All items of a city, in manual order
    async fn list_by_city(&self, city: &str) -> DomainResult<Vec<TravelItem>>;

    /// Items of one city and category, in manual order
    async fn list_by_city_and_category(&self, city: &str, category: Category) -> DomainResult<Vec<TravelItem>>;

    /// Distinct city names, sorted
    async fn list_cities(&self) -> DomainResult<Vec<String>>;

    /// Admin-added items, optionally restricted to one city
    async fn list_admin_added(&self, city: Option<&str>) -> DomainResult<Vec<TravelItem>>;

    async fn count(&self) -> DomainResult<u32>;

    async fn clear_all(&self) -> DomainResult<()>;

    /// Insert many items in one transaction
    async fn bulk_insert(&self, items: &[TravelItem]) -> DomainResult<usize>;

    /// Clear the table and insert `items` in one transaction
    async fn replace_all(&self, items: &[TravelItem]) -> DomainResult<usize>;
}

#[async_trait]
impl ItemCityOperations for ItemRepository {
    async fn list_by_city(&self, city: &str) -> DomainResult<Vec<TravelItem>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        query_items(
            conn,
            &format!(
                "SELECT {} FROM items WHERE city = ?1 ORDER BY sort_order, name",
                ITEM_COLUMNS
            ),
            params![city],
        )
    }

    async fn list_by_city_and_category(&self, city: &str, category: Category) -> DomainResult<Vec<TravelItem>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        query_items(
            conn,
            &format!(
                "SELECT {} FROM items WHERE city = ?1 AND category = ?2 ORDER BY sort_order, name",
                ITEM_COLUMNS
            ),
            params![city, category.as_str()],
        )
    }

    async fn list_cities(&self) -> DomainResult<Vec<String>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn
            .prepare("SELECT DISTINCT city FROM items ORDER BY city")
            .map_err(db_err)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0)).map_err(db_err)?;

        let mut cities = Vec::new();
        for city in rows {
            cities.push(city.map_err(db_err)?);
        }
        Ok(cities)
    }

    async fn list_admin_added(&self, city: Option<&str>) -> DomainResult<Vec<TravelItem>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        match city {
            Some(city) => query_items(
                conn,
                &format!(
                    "SELECT {} FROM items WHERE is_admin_added = 1 AND city = ?1 ORDER BY created_at DESC",
                    ITEM_COLUMNS
                ),
                params![city],
            ),
            None => query_items(
                conn,
                &format!(
                    "SELECT {} FROM items WHERE is_admin_added = 1 ORDER BY city, created_at DESC",
                    ITEM_COLUMNS
                ),
                [],
            ),
        }
    }

    async fn count(&self) -> DomainResult<u32> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get::<_, u32>(0))
            .map_err(db_err)
    }

    async fn clear_all(&self) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.execute("DELETE FROM items", []).map_err(db_err)?;
        Ok(())
    }

    async fn bulk_insert(&self, items: &[TravelItem]) -> DomainResult<usize> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;

        let tx = conn.transaction().map_err(db_err)?;
        for item in items {
            insert_item(&tx, item).map_err(db_err)?;
        }
        tx.commit().map_err(db_err)?;

        tracing::debug!(count = items.len(), "bulk inserted items");
        Ok(items.len())
    }

    async fn replace_all(&self, items: &[TravelItem]) -> DomainResult<usize> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;

        let tx = conn.transaction().map_err(db_err)?;
        tx.execute("DELETE FROM items", []).map_err(db_err)?;
        for item in items {
            insert_item(&tx, item).map_err(db_err)?;
        }
        tx.commit().map_err(db_err)?;

        tracing::debug!(count = items.len(), "replaced item table");
        Ok(items.len())
    }
}
