//! Travel Checklist Backend
//!
//! Tauri shell around `travel-core`:
//! - state: database handle and resolved data locations
//! - commands: Tauri command handlers

use std::path::PathBuf;
use std::time::Duration;
use tauri::{Emitter, Manager};

use travel_core::{init_db, DbState};

mod commands;

/// Environment override for the seed spreadsheet
pub const DATA_PATH_ENV: &str = "TRAVEL_CHECKLIST_DATA";

/// Application state shared across commands
pub struct AppState {
    pub db: DbState,
    /// Seed spreadsheet used by initial sync and re-import
    pub data_path: PathBuf,
    /// Where exported workbooks are written
    pub export_dir: PathBuf,
}

impl AppState {
    /// Wait for the background database init before touching the store
    pub async fn ready(&self) -> Result<&DbState, String> {
        for _ in 0..100 {
            if self.db.is_ready().await {
                return Ok(&self.db);
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        Err("Database not initialized".to_string())
    }
}

fn app_data_dir(app_handle: &tauri::AppHandle) -> tauri::Result<PathBuf> {
    let app_dir = app_handle.path().app_data_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

/// Seed spreadsheet: env override first, then the bundled resource
fn resolve_data_path(app_handle: &tauri::AppHandle) -> PathBuf {
    if let Ok(path) = std::env::var(DATA_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    app_handle
        .path()
        .resource_dir()
        .map(|dir| dir.join("data").join("travel_data.xlsx"))
        .unwrap_or_else(|_| PathBuf::from("data").join("travel_data.xlsx"))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            let log_path = rolling_logger::init_logger(app_handle.path().app_log_dir()?, "TravelChecklist")?;

            let data_dir = app_data_dir(&app_handle)?;
            let db_path = data_dir.join("travel_checklist.db");
            let data_path = resolve_data_path(&app_handle);
            tracing::info!(
                db = %db_path.display(),
                data = %data_path.display(),
                log = %log_path.display(),
                "app setup starting"
            );

            // Manage an empty state now; the connection arrives from the background task
            let db = DbState::new(db_path.clone());
            app.manage(AppState {
                db: db.clone(),
                data_path,
                export_dir: data_dir.join("exports"),
            });

            tauri::async_runtime::spawn(async move {
                match init_db(&db_path).await {
                    Ok(initialized) => {
                        db.adopt(initialized).await;
                        let _ = rolling_logger::info("Async DB init success");
                        if let Err(e) = app_handle.emit("db-initialized", ()) {
                            tracing::warn!("failed to emit db-initialized: {}", e);
                        }
                    }
                    Err(e) => {
                        let _ = rolling_logger::error(&format!("Async DB init failed: {}", e));
                    }
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Items
            commands::list_cities,
            commands::city_summaries,
            commands::city_view,
            commands::get_item,
            commands::toggle_status,
            commands::set_priority,
            commands::set_rating,
            commands::update_notes,
            commands::toggle_pinned,
            commands::reorder_items,
            // Spreadsheet sync
            commands::ensure_initial_sync,
            commands::reimport_data,
            commands::get_sync_status,
            // Admin
            commands::verify_admin_pin,
            commands::change_admin_pin,
            commands::create_admin_item,
            commands::edit_item,
            commands::delete_admin_item,
            commands::list_admin_items,
            commands::admin_search,
            commands::export_spreadsheet,
            // Settings
            commands::get_settings,
            commands::set_theme,
            commands::set_sort_preference,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
