//! Travel Item Entity
//!
//! A single place / shop / food entry in a city checklist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Maximum length of the free-text notes attached to an item
pub const MAX_NOTES_LEN: usize = 500;

/// Category determines the completion vocabulary of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Places,
    Shopping,
    Food,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Places, Category::Shopping, Category::Food];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Places => "places",
            Category::Shopping => "shopping",
            Category::Food => "food",
        }
    }

    /// Parse a stored category value
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "places" => Ok(Category::Places),
            "shopping" => Ok(Category::Shopping),
            "food" => Ok(Category::Food),
            other => Err(DomainError::InvalidInput(format!("unknown category '{}'", other))),
        }
    }

    /// Map a free-form spreadsheet label ("Places to visit", "Shops", ...)
    /// to a category. Unrecognised labels fall back to places.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        if normalized.contains("place") || normalized.contains("visit") {
            Category::Places
        } else if normalized.contains("shop") {
            Category::Shopping
        } else if normalized.contains("food") {
            Category::Food
        } else {
            Category::Places
        }
    }

    /// The status an item of this category takes once done
    pub fn completed_status(&self) -> Status {
        match self {
            Category::Places => Status::Visited,
            Category::Shopping => Status::Purchased,
            Category::Food => Status::Tasted,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Places => "Places to Visit",
            Category::Shopping => "Shopping",
            Category::Food => "Food Spots",
        }
    }
}

/// Completion status of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Visited,
    Purchased,
    Tasted,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Visited => "visited",
            Status::Purchased => "purchased",
            Status::Tasted => "tasted",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "pending" => Ok(Status::Pending),
            "visited" => Ok(Status::Visited),
            "purchased" => Ok(Status::Purchased),
            "tasted" => Ok(Status::Tasted),
            other => Err(DomainError::InvalidInput(format!("unknown status '{}'", other))),
        }
    }

    pub fn is_completed(&self) -> bool {
        !matches!(self, Status::Pending)
    }
}

/// User priority flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Must,
    Optional,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Must => "must",
            Priority::Optional => "optional",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "must" => Ok(Priority::Must),
            "optional" => Ok(Priority::Optional),
            other => Err(DomainError::InvalidInput(format!("unknown priority '{}'", other))),
        }
    }

    /// Pressing the active priority clears it, pressing the other one switches.
    pub fn toggle(current: Option<Priority>, pressed: Priority) -> Option<Priority> {
        if current == Some(pressed) {
            None
        } else {
            Some(pressed)
        }
    }

    /// Ordering weight used by priority sort (higher first)
    pub fn weight(priority: Option<Priority>) -> u8 {
        match priority {
            Some(Priority::Must) => 3,
            Some(Priority::Optional) => 2,
            None => 1,
        }
    }
}

/// Star rating, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> DomainResult<Self> {
        if (1..=5).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(DomainError::InvalidInput(format!(
                "rating must be between 1 and 5, got {}",
                value
            )))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            5 => "Excellent",
            4 => "Very Good",
            3 => "Good",
            2 => "Fair",
            _ => "Okay",
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> u8 {
        r.0
    }
}

/// De-duplication key used when reconciling re-imports
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub city: String,
    pub category: Category,
    pub name: String,
}

/// A travel checklist entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelItem {
    pub id: String,
    pub city: String,
    pub category: Category,
    pub subcategory: Option<String>,
    pub name: String,
    pub details: String,
    /// Maps link
    pub location: String,

    // User state
    pub status: Status,
    pub priority: Option<Priority>,
    pub rating: Option<Rating>,
    pub user_notes: String,
    pub sort_order: i32,
    pub is_pinned: bool,

    // Provenance
    pub is_admin_added: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TravelItem {
    /// Create a pending item with a fresh id and no user state
    pub fn new(city: impl Into<String>, category: Category, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            city: city.into(),
            category,
            subcategory: None,
            name: name.into(),
            details: String::new(),
            location: String::new(),
            status: Status::Pending,
            priority: None,
            rating: None,
            user_notes: String::new(),
            sort_order: 0,
            is_pinned: false,
            is_admin_added: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey {
            city: self.city.clone(),
            category: self.category,
            name: self.name.clone(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Flip between pending and the category's completed status
    pub fn toggle_status(&mut self) {
        self.status = if self.status.is_completed() {
            Status::Pending
        } else {
            self.category.completed_status()
        };
    }

    /// Set a status, rejecting completed values of another category
    pub fn set_status(&mut self, status: Status) -> DomainResult<()> {
        if status.is_completed() && status != self.category.completed_status() {
            return Err(DomainError::InvalidInput(format!(
                "status '{}' does not apply to {}",
                status.as_str(),
                self.category.as_str()
            )));
        }
        self.status = status;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: &str) -> DomainResult<()> {
        if notes.chars().count() > MAX_NOTES_LEN {
            return Err(DomainError::InvalidInput(format!(
                "notes are limited to {} characters",
                MAX_NOTES_LEN
            )));
        }
        self.user_notes = notes.to_string();
        Ok(())
    }

    pub fn has_location(&self) -> bool {
        !self.location.trim().is_empty()
    }
}

impl Entity for TravelItem {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Places to Visit", Category::Places)]
    #[case("  must VISIT ", Category::Places)]
    #[case("Shopping", Category::Shopping)]
    #[case("shops", Category::Shopping)]
    #[case("Food", Category::Food)]
    #[case("Street food", Category::Food)]
    #[case("misc", Category::Places)]
    #[case("", Category::Places)]
    fn test_category_from_label(#[case] label: &str, #[case] expected: Category) {
        assert_eq!(Category::from_label(label), expected);
    }

    #[test]
    fn test_toggle_status_uses_category_vocabulary() {
        let mut item = TravelItem::new("Riyadh", Category::Shopping, "Souq");
        item.toggle_status();
        assert_eq!(item.status, Status::Purchased);
        item.toggle_status();
        assert_eq!(item.status, Status::Pending);

        let mut food = TravelItem::new("Riyadh", Category::Food, "Kabsa");
        food.toggle_status();
        assert_eq!(food.status, Status::Tasted);
    }

    #[test]
    fn test_set_status_rejects_foreign_completion() {
        let mut item = TravelItem::new("Jeddah", Category::Places, "Corniche");
        assert!(item.set_status(Status::Tasted).is_err());
        assert!(item.set_status(Status::Visited).is_ok());
        assert!(item.set_status(Status::Pending).is_ok());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(5).unwrap().label(), "Excellent");
        assert_eq!(Rating::new(1).unwrap().label(), "Okay");
    }

    #[test]
    fn test_rating_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("3").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn test_priority_toggle() {
        assert_eq!(Priority::toggle(None, Priority::Must), Some(Priority::Must));
        assert_eq!(Priority::toggle(Some(Priority::Must), Priority::Must), None);
        assert_eq!(Priority::toggle(Some(Priority::Must), Priority::Optional), Some(Priority::Optional));
    }

    #[test]
    fn test_notes_limit() {
        let mut item = TravelItem::new("Jeddah", Category::Places, "Corniche");
        assert!(item.set_notes(&"x".repeat(MAX_NOTES_LEN)).is_ok());
        assert!(item.set_notes(&"x".repeat(MAX_NOTES_LEN + 1)).is_err());
    }

    #[test]
    fn test_key_identity() {
        let a = TravelItem::new("Riyadh", Category::Food, "Kabsa");
        let b = TravelItem::new("Riyadh", Category::Food, "Kabsa");
        assert_ne!(a.id, b.id);
        assert_eq!(a.key(), b.key());
    }
}
