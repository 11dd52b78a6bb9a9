//! Application Settings
//!
//! Singleton row holding the admin PIN, theme and per-category sort choice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};
use super::item::Category;

pub const DEFAULT_ADMIN_PIN: &str = "1234";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "auto" => Ok(Theme::Auto),
            other => Err(DomainError::InvalidInput(format!("unknown theme '{}'", other))),
        }
    }
}

/// Ordering applied to a category list
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
    pub fn as_str(&self) -> &'static str {
        match self {
            SortType::Manual => "manual",
            SortType::Name => "name",
            SortType::Rating => "rating",
            SortType::Status => "status",
            SortType::Priority => "priority",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "manual" => Ok(SortType::Manual),
            "name" => Ok(SortType::Name),
            "rating" => Ok(SortType::Rating),
            "status" => Ok(SortType::Status),
            "priority" => Ok(SortType::Priority),
            other => Err(DomainError::InvalidInput(format!("unknown sort '{}'", other))),
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

    pub fn set(&mut self, category: Category, sort: SortType) {
        match category {
            Category::Places => self.places = sort,
            Category::Shopping => self.shopping = sort,
            Category::Food => self.food = sort,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Local placeholder PIN gating admin mode
    pub admin_pin: String,
    pub theme: Theme,
    pub last_sync: Option<DateTime<Utc>>,
    pub sort_preference: SortPreference,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            admin_pin: DEFAULT_ADMIN_PIN.to_string(),
            theme: Theme::Auto,
            last_sync: None,
            sort_preference: SortPreference::default(),
        }
    }
}
