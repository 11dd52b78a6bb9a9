//! Core of the travel checklist: the local SQLite store, spreadsheet
//! import/export, view queries and admin operations. The Tauri shell in
//! `src-tauri` is a thin IPC layer over this crate.

pub mod domain;
pub mod repository;
pub mod sync;
pub mod export;
pub mod query;
pub mod admin;

pub use domain::{
    AppSettings, Category, DomainError, DomainResult, Entity, ItemKey, Priority, Rating, SortPreference,
    SortType, Status, Theme, TravelItem,
};
pub use repository::{init_db, DbState};
