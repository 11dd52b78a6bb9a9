//! Settings Command Wrappers

use serde::Serialize;
use crate::models::{AppSettings, Category, SortType, Theme};
use super::{call, call_no_args};

#[derive(Serialize)]
struct ThemeArgs {
    theme: Theme,
}

#[derive(Serialize)]
struct SortPreferenceArgs {
    category: Category,
    sort: SortType,
}

pub async fn get_settings() -> Result<AppSettings, String> {
    call_no_args("get_settings").await
}

pub async fn set_theme(theme: Theme) -> Result<(), String> {
    call("set_theme", &ThemeArgs { theme }).await
}

pub async fn set_sort_preference(category: Category, sort: SortType) -> Result<(), String> {
    call("set_sort_preference", &SortPreferenceArgs { category, sort }).await
}
