//! Tauri Commands for the checklist screens
//!
//! City listings, the composed city view and per-item user state.

use tauri::State;
use travel_core::domain::{Category, Priority, Rating, TravelItem};
use travel_core::query::{self, CitySummary, CityView, FilterState};
use travel_core::repository::{ItemCityOperations, ItemPositioningOperations, ItemRepository, Repository};
use crate::AppState;

async fn load_item(repo: &ItemRepository, id: &str) -> Result<TravelItem, String> {
    repo.find_by_id(&id.to_string())
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Item {} not found", id))
}

/// Distinct city names, sorted
#[tauri::command]
pub async fn list_cities(state: State<'_, AppState>) -> Result<Vec<String>, String> {
    let repo = state.ready().await?.item_repo();
    repo.list_cities().await.map_err(|e| e.to_string())
}

/// Progress summary of every city for the home screen
#[tauri::command]
pub async fn city_summaries(state: State<'_, AppState>) -> Result<Vec<CitySummary>, String> {
    let repo = state.ready().await?.item_repo();
    let items = repo.list().await.map_err(|e| e.to_string())?;
    Ok(query::city_summaries(&items))
}

/// Filtered, sorted and grouped items of one category tab
#[tauri::command]
pub async fn city_view(
    state: State<'_, AppState>,
    city: String,
    category: Category,
    filter: FilterState,
) -> Result<CityView, String> {
    let repo = state.ready().await?.item_repo();
    let items = repo.list_by_city(&city).await.map_err(|e| e.to_string())?;
    Ok(query::city_view(&items, &city, category, &filter))
}

#[tauri::command]
pub async fn get_item(state: State<'_, AppState>, id: String) -> Result<Option<TravelItem>, String> {
    let repo = state.ready().await?.item_repo();
    repo.find_by_id(&id).await.map_err(|e| e.to_string())
}

/// Flip between pending and the category's completed status
#[tauri::command]
pub async fn toggle_status(state: State<'_, AppState>, id: String) -> Result<TravelItem, String> {
    let repo = state.ready().await?.item_repo();
    let mut item = load_item(&repo, &id).await?;
    item.toggle_status();
    repo.update(&item).await.map_err(|e| e.to_string())
}

/// Press a priority button; pressing the active one clears it, `None` always clears
#[tauri::command]
pub async fn set_priority(
    state: State<'_, AppState>,
    id: String,
    priority: Option<Priority>,
) -> Result<TravelItem, String> {
    let repo = state.ready().await?.item_repo();
    let mut item = load_item(&repo, &id).await?;
    item.priority = match priority {
        Some(pressed) => Priority::toggle(item.priority, pressed),
        None => None,
    };
    repo.update(&item).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn set_rating(state: State<'_, AppState>, id: String, rating: Option<u8>) -> Result<TravelItem, String> {
    let repo = state.ready().await?.item_repo();
    let mut item = load_item(&repo, &id).await?;
    item.rating = rating.map(Rating::new).transpose().map_err(|e| e.to_string())?;
    repo.update(&item).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_notes(state: State<'_, AppState>, id: String, notes: String) -> Result<TravelItem, String> {
    let repo = state.ready().await?.item_repo();
    let mut item = load_item(&repo, &id).await?;
    item.set_notes(&notes).map_err(|e| e.to_string())?;
    repo.update(&item).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn toggle_pinned(state: State<'_, AppState>, id: String) -> Result<TravelItem, String> {
    let repo = state.ready().await?.item_repo();
    let mut item = load_item(&repo, &id).await?;
    item.is_pinned = !item.is_pinned;
    repo.update(&item).await.map_err(|e| e.to_string())
}

/// Persist a drag reorder: the row at `from` in the displayed list `ids`
/// moves to `to`
#[tauri::command]
pub async fn reorder_items(
    state: State<'_, AppState>,
    ids: Vec<String>,
    from: usize,
    to: usize,
) -> Result<Vec<String>, String> {
    let repo = state.ready().await?.item_repo();
    repo.move_in_list(&ids, from, to).await.map_err(|e| e.to_string())
}
