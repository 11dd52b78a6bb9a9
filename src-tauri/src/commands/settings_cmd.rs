//! Tauri Commands for persisted settings

use tauri::State;
use travel_core::domain::{AppSettings, Category, SortType, Theme};
use crate::AppState;

/// Settings with the PIN blanked out
#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<AppSettings, String> {
    let mut settings = state
        .ready()
        .await?
        .settings_repo()
        .load()
        .await
        .map_err(|e| e.to_string())?;
    settings.admin_pin.clear();
    Ok(settings)
}

#[tauri::command]
pub async fn set_theme(state: State<'_, AppState>, theme: Theme) -> Result<(), String> {
    let repo = state.ready().await?.settings_repo();
    let mut settings = repo.load().await.map_err(|e| e.to_string())?;
    settings.theme = theme;
    repo.save(&settings).await.map_err(|e| e.to_string())
}

/// Remember the sort chosen for a category
#[tauri::command]
pub async fn set_sort_preference(state: State<'_, AppState>, category: Category, sort: SortType) -> Result<(), String> {
    let repo = state.ready().await?.settings_repo();
    let mut settings = repo.load().await.map_err(|e| e.to_string())?;
    settings.sort_preference.set(category, sort);
    repo.save(&settings).await.map_err(|e| e.to_string())
}
