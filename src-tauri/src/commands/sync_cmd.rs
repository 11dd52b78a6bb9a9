//! Tauri Commands for spreadsheet sync

use tauri::State;
use travel_core::sync::{self, MergeStrategy, SyncReport, SyncStatus};
use crate::AppState;

/// Seed the store on first launch; a no-op once items exist
#[tauri::command]
pub async fn ensure_initial_sync(state: State<'_, AppState>) -> Result<SyncReport, String> {
    let db = state.ready().await?;
    let report = sync::sync_from_spreadsheet(&db.item_repo(), &db.settings_repo(), &state.data_path)
        .await
        .map_err(|e| {
            tracing::error!("initial sync failed: {}", e);
            e.to_string()
        })?;
    Ok(report)
}

/// Re-read the seed spreadsheet. Defaults to keeping user data.
#[tauri::command]
pub async fn reimport_data(
    state: State<'_, AppState>,
    strategy: Option<MergeStrategy>,
) -> Result<SyncReport, String> {
    let db = state.ready().await?;
    sync::reimport(
        &db.item_repo(),
        &db.settings_repo(),
        &state.data_path,
        strategy.unwrap_or_default(),
    )
    .await
    .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_sync_status(state: State<'_, AppState>) -> Result<SyncStatus, String> {
    let db = state.ready().await?;
    sync::sync_status(&db.item_repo(), &db.settings_repo())
        .await
        .map_err(|e| e.to_string())
}
