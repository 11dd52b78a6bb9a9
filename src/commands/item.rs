//! Item Commands
//!
//! Frontend bindings for the checklist screens.

use serde::Serialize;
use crate::models::{Category, CitySummary, CityView, FilterState, Priority, TravelItem};
use super::{call, call_no_args};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct CityViewArgs<'a> {
    city: &'a str,
    category: Category,
    filter: &'a FilterState,
}

#[derive(Serialize)]
struct PriorityArgs<'a> {
    id: &'a str,
    priority: Option<Priority>,
}

#[derive(Serialize)]
struct RatingArgs<'a> {
    id: &'a str,
    rating: Option<u8>,
}

#[derive(Serialize)]
struct NotesArgs<'a> {
    id: &'a str,
    notes: &'a str,
}

#[derive(Serialize)]
struct ReorderArgs<'a> {
    ids: &'a [String],
    from: usize,
    to: usize,
}

// ========================
// Commands
// ========================

pub async fn list_cities() -> Result<Vec<String>, String> {
    call_no_args("list_cities").await
}

pub async fn city_summaries() -> Result<Vec<CitySummary>, String> {
    call_no_args("city_summaries").await
}

pub async fn city_view(city: &str, category: Category, filter: &FilterState) -> Result<CityView, String> {
    call("city_view", &CityViewArgs { city, category, filter }).await
}

pub async fn get_item(id: &str) -> Result<Option<TravelItem>, String> {
    call("get_item", &IdArgs { id }).await
}

pub async fn toggle_status(id: &str) -> Result<TravelItem, String> {
    call("toggle_status", &IdArgs { id }).await
}

/// Press a priority button; `None` clears
pub async fn set_priority(id: &str, priority: Option<Priority>) -> Result<TravelItem, String> {
    call("set_priority", &PriorityArgs { id, priority }).await
}

pub async fn set_rating(id: &str, rating: Option<u8>) -> Result<TravelItem, String> {
    call("set_rating", &RatingArgs { id, rating }).await
}

pub async fn update_notes(id: &str, notes: &str) -> Result<TravelItem, String> {
    call("update_notes", &NotesArgs { id, notes }).await
}

pub async fn toggle_pinned(id: &str) -> Result<TravelItem, String> {
    call("toggle_pinned", &IdArgs { id }).await
}

/// Move the row at `from` to `to` within `ids`; returns the new order
pub async fn reorder_items(ids: &[String], from: usize, to: usize) -> Result<Vec<String>, String> {
    call("reorder_items", &ReorderArgs { ids, from, to }).await
}
