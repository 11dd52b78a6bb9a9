//! Repository Layer
//!
//! SQLite-backed storage for items and settings.

mod traits;
mod db;
mod item;
mod settings_repo;

#[cfg(test)]
mod tests;

pub use traits::{Repository, SearchableRepository};
pub use db::{init_db, DbState, SharedConnection};
pub use item::{ItemCityOperations, ItemPositioningOperations, ItemRepository};
pub use settings_repo::SettingsRepository;
