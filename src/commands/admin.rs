//! Admin Command Wrappers

use serde::Serialize;
use crate::models::{AdminForm, Category, TravelItem};
use super::{call, call_no_args};

#[derive(Serialize)]
struct PinArgs<'a> {
    pin: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePinArgs<'a> {
    current: &'a str,
    new_pin: &'a str,
}

#[derive(Serialize)]
struct FormArgs<'a> {
    form: &'a AdminForm,
}

#[derive(Serialize)]
struct EditArgs<'a> {
    id: &'a str,
    form: &'a AdminForm,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct CityArgs<'a> {
    city: Option<&'a str>,
}

#[derive(Serialize)]
struct SearchArgs<'a> {
    city: Option<&'a str>,
    category: Option<Category>,
    query: &'a str,
}

pub async fn verify_admin_pin(pin: &str) -> Result<bool, String> {
    call("verify_admin_pin", &PinArgs { pin }).await
}

pub async fn change_admin_pin(current: &str, new_pin: &str) -> Result<(), String> {
    call("change_admin_pin", &ChangePinArgs { current, new_pin }).await
}

pub async fn create_admin_item(form: &AdminForm) -> Result<TravelItem, String> {
    call("create_admin_item", &FormArgs { form }).await
}

pub async fn edit_item(id: &str, form: &AdminForm) -> Result<TravelItem, String> {
    call("edit_item", &EditArgs { id, form }).await
}

pub async fn delete_admin_item(id: &str) -> Result<(), String> {
    call("delete_admin_item", &IdArgs { id }).await
}

pub async fn list_admin_items(city: Option<&str>) -> Result<Vec<TravelItem>, String> {
    call("list_admin_items", &CityArgs { city }).await
}

pub async fn admin_search(city: Option<&str>, category: Option<Category>, query: &str) -> Result<Vec<TravelItem>, String> {
    call("admin_search", &SearchArgs { city, category, query }).await
}

/// Returns the path of the written workbook
pub async fn export_spreadsheet() -> Result<String, String> {
    call_no_args("export_spreadsheet").await
}
