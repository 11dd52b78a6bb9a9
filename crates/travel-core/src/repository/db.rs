//! Database Connection and Setup
//!
//! Manages the SQLite connection and schema migrations.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};
use super::{ItemRepository, SettingsRepository};

/// Connection shared by every repository. `None` until `init_db` finishes.
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
    path: PathBuf,
}

impl DbState {
    /// Create an empty state; the connection is filled in later
    pub fn new(path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn is_ready(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Move an initialized connection into this state
    pub async fn adopt(&self, other: DbState) {
        let conn = other.conn.lock().await.take();
        *self.conn.lock().await = conn;
    }

    pub fn item_repo(&self) -> ItemRepository {
        ItemRepository::new(self.conn.clone())
    }

    pub fn settings_repo(&self) -> SettingsRepository {
        SettingsRepository::new(self.conn.clone())
    }
}

pub(crate) fn db_err(e: rusqlite::Error) -> DomainError {
    DomainError::Internal(e.to_string())
}

pub(crate) fn not_initialized() -> DomainError {
    DomainError::Internal("Database not initialized".to_string())
}

/// Open the database at `db_path` (":memory:" allowed) and run migrations
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = if db_path.as_os_str() == ":memory:" {
        Connection::open_in_memory()
    } else {
        Connection::open(db_path)
    }
    .map_err(|e| DomainError::Internal(format!("Failed to open db: {}", e)))?;

    run_migrations(&conn)?;
    tracing::debug!(path = %db_path.display(), "database ready");

    let state = DbState::new(db_path.to_path_buf());
    *state.conn.lock().await = Some(conn);
    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", table))
        .map_err(db_err)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(db_err)?;
    for name in names {
        if name.map_err(db_err)? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            city TEXT NOT NULL,
            category TEXT NOT NULL,
            subcategory TEXT,
            name TEXT NOT NULL,
            details TEXT NOT NULL DEFAULT '',
            location TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'pending',
            priority TEXT,
            rating INTEGER,
            user_notes TEXT NOT NULL DEFAULT '',
            sort_order INTEGER NOT NULL DEFAULT 0,
            is_admin_added INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(db_err)?;

    // Pinning arrived after the first schema
    if !column_exists(conn, "items", "is_pinned")? {
        conn.execute(
            "ALTER TABLE items ADD COLUMN is_pinned INTEGER NOT NULL DEFAULT 0",
            [],
        )
        .map_err(|e| DomainError::Internal(format!("Failed to add is_pinned: {}", e)))?;
    }

    conn.execute("CREATE INDEX IF NOT EXISTS idx_items_city ON items(city)", [])
        .map_err(db_err)?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_items_city_category ON items(city, category)",
        [],
    )
    .map_err(db_err)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            admin_pin TEXT NOT NULL,
            theme TEXT NOT NULL DEFAULT 'auto',
            last_sync INTEGER,
            sort_preference TEXT NOT NULL DEFAULT '{}'
        )",
        [],
    )
    .map_err(db_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert!(column_exists(&conn, "items", "is_pinned").unwrap());
    }

    #[tokio::test]
    async fn test_pinned_column_added_to_old_schema() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE items (
                id TEXT PRIMARY KEY,
                city TEXT NOT NULL,
                category TEXT NOT NULL,
                subcategory TEXT,
                name TEXT NOT NULL,
                details TEXT NOT NULL DEFAULT '',
                location TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'pending',
                priority TEXT,
                rating INTEGER,
                user_notes TEXT NOT NULL DEFAULT '',
                sort_order INTEGER NOT NULL DEFAULT 0,
                is_admin_added INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO items (id, city, category, name, created_at, updated_at) VALUES ('a', 'Riyadh', 'places', 'Fort', 0, 0)",
            [],
        )
        .unwrap();

        run_migrations(&conn).unwrap();

        let pinned: i32 = conn
            .query_row("SELECT is_pinned FROM items WHERE id = 'a'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(pinned, 0);
    }

    #[tokio::test]
    async fn test_init_in_memory() {
        let state = init_db(Path::new(":memory:")).await.unwrap();
        assert!(state.is_ready().await);
        assert!(!DbState::new(PathBuf::from(":memory:")).is_ready().await);
    }
}
