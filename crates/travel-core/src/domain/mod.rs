//! Domain Layer
//!
//! Core entities and rules. No storage or IO concerns live here.

mod entity;
mod item;
mod settings;

pub use entity::{DomainError, DomainResult, Entity};
pub use item::{Category, ItemKey, Priority, Rating, Status, TravelItem, MAX_NOTES_LEN};
pub use settings::{AppSettings, SortPreference, SortType, Theme, DEFAULT_ADMIN_PIN};
