//! Frontend Models
//!
//! Data structures matching the backend's serialized types.

use serde::{Deserialize, Serialize};

/// Notes are capped at this many characters
pub const MAX_NOTES_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Places,
    Shopping,
    Food,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Places, Category::Shopping, Category::Food];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Places => "Places to Visit",
            Category::Shopping => "Shopping",
            Category::Food => "Food Spots",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Places => "🏛️",
            Category::Shopping => "🛍️",
            Category::Food => "🍽️",
        }
    }

    /// Verb shown on the completion toggle
    pub fn done_label(&self) -> &'static str {
        match self {
            Category::Places => "Visited",
            Category::Shopping => "Purchased",
            Category::Food => "Tasted",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Places => "places",
            Category::Shopping => "shopping",
            Category::Food => "food",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Visited,
    Purchased,
    Tasted,
}

impl Status {
    pub fn is_completed(&self) -> bool {
        !matches!(self, Status::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Must,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelItem {
    pub id: String,
    pub city: String,
    pub category: Category,
    pub subcategory: Option<String>,
    pub name: String,
    pub details: String,
    pub location: String,
    pub status: Status,
    pub priority: Option<Priority>,
    pub rating: Option<u8>,
    pub user_notes: String,
    pub sort_order: i32,
    pub is_pinned: bool,
    pub is_admin_added: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl TravelItem {
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    pub fn has_location(&self) -> bool {
        !self.location.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    #[default]
    Manual,
    Name,
    Rating,
    Status,
    Priority,
}

impl SortType {
    pub const ALL: [SortType; 5] = [
        SortType::Manual,
        SortType::Name,
        SortType::Rating,
        SortType::Status,
        SortType::Priority,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortType::Manual => "manual",
            SortType::Name => "name",
            SortType::Rating => "rating",
            SortType::Status => "status",
            SortType::Priority => "priority",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortType::Manual => "Manual order",
            SortType::Name => "Name (A-Z)",
            SortType::Rating => "Rating",
            SortType::Status => "Status",
            SortType::Priority => "Priority",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        SortType::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl Theme {
    /// Cycle order of the header toggle
    pub fn next(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Auto,
            Theme::Auto => Theme::Light,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "☀️",
            Theme::Dark => "🌙",
            Theme::Auto => "🌓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SortPreference {
    pub places: SortType,
    pub shopping: SortType,
    pub food: SortType,
}

impl SortPreference {
    pub fn get(&self, category: Category) -> SortType {
        match category {
            Category::Places => self.places,
            Category::Shopping => self.shopping,
            Category::Food => self.food,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppSettings {
    pub admin_pin: String,
    pub theme: Theme,
    pub last_sync: Option<String>,
    pub sort_preference: SortPreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    Must,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterState {
    pub search: String,
    pub priority: PriorityFilter,
    pub status: StatusFilter,
    pub sort: SortType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryCounts {
    pub places: usize,
    pub shopping: usize,
    pub food: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Places => self.places,
            Category::Shopping => self.shopping,
            Category::Food => self.food,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryProgress {
    pub total: usize,
    pub completed: usize,
    pub percentage: u32,
    pub with_location: usize,
    pub without_location: usize,
    pub location_percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySummary {
    pub city: String,
    pub total_items: usize,
    pub completed_items: usize,
    pub category_counts: CategoryCounts,
}

impl CitySummary {
    pub fn percentage(&self) -> u32 {
        if self.total_items == 0 {
            return 0;
        }
        ((self.completed_items as f64 / self.total_items as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryGroup {
    pub name: String,
    pub items: Vec<TravelItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterChipKind {
    Search,
    Sort,
    Priority,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChip {
    pub kind: FilterChipKind,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityView {
    pub city: String,
    pub category: Category,
    pub counts: CategoryCounts,
    pub search_results: Option<usize>,
    pub progress: CategoryProgress,
    pub regular: Vec<TravelItem>,
    pub groups: Vec<SubcategoryGroup>,
    pub can_reorder: bool,
    pub active_filters: Vec<FilterChip>,
}

impl CityView {
    /// The ordered id list containing `id`, if any
    pub fn list_containing(&self, id: &str) -> Option<Vec<String>> {
        std::iter::once(&self.regular)
            .chain(self.groups.iter().map(|g| &g.items))
            .find(|list| list.iter().any(|item| item.id == id))
            .map(|list| list.iter().map(|item| item.id.clone()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.groups.iter().all(|g| g.items.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub item_count: usize,
    pub merged: usize,
    pub skipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub is_initialized: bool,
    pub item_count: u32,
    pub last_sync: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    #[default]
    KeepUserData,
    ReplaceAll,
}

/// Admin add / edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AdminForm {
    pub city: String,
    pub category: Category,
    pub subcategory: Option<String>,
    pub name: String,
    pub details: String,
    pub location: String,
}

impl AdminForm {
    pub fn from_item(item: &TravelItem) -> Self {
        Self {
            city: item.city.clone(),
            category: item.category,
            subcategory: item.subcategory.clone(),
            name: item.name.clone(),
            details: item.details.clone(),
            location: item.location.clone(),
        }
    }
}

/// True when `city` is non-blank and not one of the known cities
pub fn is_new_city(cities: &[String], city: &str) -> bool {
    let city = city.trim();
    !city.is_empty() && !cities.iter().any(|known| known == city)
}

/// Star rating caption
pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        5 => "Excellent",
        4 => "Very Good",
        3 => "Good",
        2 => "Fair",
        1 => "Okay",
        _ => "",
    }
}
