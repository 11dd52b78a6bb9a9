//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use crate::models::{AppSettings, CitySummary, SortType, SyncStatus, Theme, Category};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// One entry per city for the home screen
    pub summaries: Vec<CitySummary>,
    /// Distinct city names, for the admin city picker
    pub cities: Vec<String>,
    /// Persisted settings (PIN blanked)
    pub settings: AppSettings,
    pub sync_status: Option<SyncStatus>,
    /// True while the first-run import is running
    pub syncing: bool,
    /// Last error shown in the banner
    pub error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            syncing: true,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_error(store: &AppStore, message: impl Into<String>) {
    store.error().set(Some(message.into()));
}

pub fn store_clear_error(store: &AppStore) {
    store.error().set(None);
}

pub fn store_set_theme(store: &AppStore, theme: Theme) {
    store.settings().write().theme = theme;
}

/// Remember a category's sort locally; the backend copy is saved separately
pub fn store_set_sort(store: &AppStore, category: Category, sort: SortType) {
    let settings_field = store.settings();
    let mut settings = settings_field.write();
    match category {
        Category::Places => settings.sort_preference.places = sort,
        Category::Shopping => settings.sort_preference.shopping = sort,
        Category::Food => settings.sort_preference.food = sort,
    }
}
