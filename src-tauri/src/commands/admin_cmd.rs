//! Tauri Commands for admin mode
//!
//! The PIN is checked by the UI gate; these commands trust their caller
//! like every other local command.

use std::path::PathBuf;
use tauri::State;
use travel_core::admin::{self, AdminForm};
use travel_core::domain::{Category, TravelItem};
use travel_core::export;
use travel_core::repository::{ItemCityOperations, Repository};
use crate::AppState;

#[tauri::command]
pub async fn verify_admin_pin(state: State<'_, AppState>, pin: String) -> Result<bool, String> {
    let settings = state.ready().await?.settings_repo().load().await.map_err(|e| e.to_string())?;
    Ok(admin::verify_pin(&settings, &pin))
}

#[tauri::command]
pub async fn change_admin_pin(state: State<'_, AppState>, current: String, new_pin: String) -> Result<(), String> {
    let settings_repo = state.ready().await?.settings_repo();
    admin::change_pin(&settings_repo, &current, &new_pin)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_admin_item(state: State<'_, AppState>, form: AdminForm) -> Result<TravelItem, String> {
    let repo = state.ready().await?.item_repo();
    admin::create_admin_item(&repo, form).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn edit_item(state: State<'_, AppState>, id: String, form: AdminForm) -> Result<TravelItem, String> {
    let repo = state.ready().await?.item_repo();
    admin::edit_item(&repo, &id, form).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_admin_item(state: State<'_, AppState>, id: String) -> Result<(), String> {
    let repo = state.ready().await?.item_repo();
    admin::delete_admin_item(&repo, &id).await.map_err(|e| e.to_string())
}

/// Custom entries, optionally for one city
#[tauri::command]
pub async fn list_admin_items(state: State<'_, AppState>, city: Option<String>) -> Result<Vec<TravelItem>, String> {
    let repo = state.ready().await?.item_repo();
    repo.list_admin_added(city.as_deref().filter(|c| !c.is_empty()))
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn admin_search(
    state: State<'_, AppState>,
    city: Option<String>,
    category: Option<Category>,
    query: String,
) -> Result<Vec<TravelItem>, String> {
    let repo = state.ready().await?.item_repo();
    let items = repo.list().await.map_err(|e| e.to_string())?;
    Ok(admin::admin_search(&items, city.as_deref(), category, &query)
        .into_iter()
        .cloned()
        .collect())
}

/// Write every item to `exports/travel_data_<date>.xlsx`; returns the path
#[tauri::command]
pub async fn export_spreadsheet(state: State<'_, AppState>) -> Result<String, String> {
    let repo = state.ready().await?.item_repo();
    let items = repo.list().await.map_err(|e| e.to_string())?;

    let file_name = export::default_export_file_name(chrono::Local::now().date_naive());
    let path: PathBuf = state.export_dir.join(file_name);
    export::export_to_file(&items, &path).map_err(|e| e.to_string())?;
    Ok(path.display().to_string())
}
