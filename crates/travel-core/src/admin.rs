//! Admin Mode
//!
//! PIN gate plus creation, editing and removal of custom entries.

use serde::{Deserialize, Serialize};

use crate::domain::{AppSettings, Category, DomainError, DomainResult, TravelItem};
use crate::query;
use crate::repository::{
    ItemCityOperations, ItemPositioningOperations, ItemRepository, Repository, SettingsRepository,
};

/// Upper bound on rows returned by the admin item finder
pub const ADMIN_SEARCH_LIMIT: usize = 50;

pub fn verify_pin(settings: &AppSettings, pin: &str) -> bool {
    settings.admin_pin == pin.trim()
}

/// Replace the admin PIN. The current PIN must match and the new one must
/// be 4 to 8 digits.
pub async fn change_pin(settings_repo: &SettingsRepository, current: &str, new_pin: &str) -> DomainResult<()> {
    let mut settings = settings_repo.load().await?;
    if !verify_pin(&settings, current) {
        return Err(DomainError::InvalidInput("Current PIN is incorrect".to_string()));
    }

    let new_pin = new_pin.trim();
    if !(4..=8).contains(&new_pin.len()) || !new_pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidInput("PIN must be 4 to 8 digits".to_string()));
    }

    settings.admin_pin = new_pin.to_string();
    settings_repo.save(&settings).await?;
    tracing::info!("admin PIN changed");
    Ok(())
}

/// Fields editable from the admin form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdminForm {
    pub city: String,
    pub category: Category,
    pub subcategory: Option<String>,
    pub name: String,
    pub details: String,
    pub location: String,
}

impl AdminForm {
    /// Trim every field; city and name are required
    pub fn validate(self) -> DomainResult<AdminForm> {
        let city = self.city.trim().to_string();
        let name = self.name.trim().to_string();
        if city.is_empty() || name.is_empty() {
            return Err(DomainError::InvalidInput("City and Name are required".to_string()));
        }

        Ok(AdminForm {
            city,
            category: self.category,
            subcategory: self
                .subcategory
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            name,
            details: self.details.trim().to_string(),
            location: self.location.trim().to_string(),
        })
    }

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

async fn ensure_unique(repo: &ItemRepository, form: &AdminForm, except_id: Option<&str>) -> DomainResult<()> {
    let siblings = repo.list_by_city_and_category(&form.city, form.category).await?;
    let taken = siblings
        .iter()
        .any(|other| other.name == form.name && Some(other.id.as_str()) != except_id);
    if taken {
        return Err(DomainError::Conflict(format!(
            "\"{}\" already exists in {} / {}",
            form.name,
            form.city,
            form.category.as_str()
        )));
    }
    Ok(())
}

/// Add a custom entry at the end of its (city, category) list
pub async fn create_admin_item(repo: &ItemRepository, form: AdminForm) -> DomainResult<TravelItem> {
    let form = form.validate()?;
    ensure_unique(repo, &form, None).await?;
    if is_new_city(&repo.list_cities().await?, &form.city) {
        tracing::info!(city = %form.city, "admin entry starts a new city");
    }

    let mut item = TravelItem::new(form.city, form.category, form.name);
    item.subcategory = form.subcategory;
    item.details = form.details;
    item.location = form.location;
    item.is_admin_added = true;
    item.sort_order = repo.next_sort_order(&item.city, item.category).await?;

    let created = repo.create(&item).await?;
    tracing::info!(id = %created.id, city = %created.city, "admin item created");
    Ok(created)
}

/// Edit the base fields of any item, keeping its user state
pub async fn edit_item(repo: &ItemRepository, id: &str, form: AdminForm) -> DomainResult<TravelItem> {
    let form = form.validate()?;
    let mut item = repo
        .find_by_id(&id.to_string())
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("item {}", id)))?;
    ensure_unique(repo, &form, Some(id)).await?;

    // A done item stays done under its new category's vocabulary
    if item.category != form.category && item.is_completed() {
        item.status = form.category.completed_status();
    }
    item.city = form.city;
    item.category = form.category;
    item.subcategory = form.subcategory;
    item.name = form.name;
    item.details = form.details;
    item.location = form.location;

    repo.update(&item).await
}

/// Delete a custom entry. Imported items cannot be deleted.
pub async fn delete_admin_item(repo: &ItemRepository, id: &str) -> DomainResult<()> {
    let id = id.to_string();
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("item {}", id)))?;
    if !item.is_admin_added {
        return Err(DomainError::InvalidInput(
            "Only admin-added items can be deleted".to_string(),
        ));
    }
    repo.delete(&id).await?;
    tracing::info!(%id, "admin item deleted");
    Ok(())
}

/// Item finder of the admin screen, capped at `ADMIN_SEARCH_LIMIT`
pub fn admin_search<'a>(
    items: &'a [TravelItem],
    city: Option<&str>,
    category: Option<Category>,
    query_text: &str,
) -> Vec<&'a TravelItem> {
    query::search(items, query_text)
        .into_iter()
        .filter(|item| city.map_or(true, |c| c.is_empty() || item.city == c))
        .filter(|item| category.map_or(true, |c| item.category == c))
        .take(ADMIN_SEARCH_LIMIT)
        .collect()
}

/// True when `city` is non-blank and not one of the known cities
pub fn is_new_city(cities: &[String], city: &str) -> bool {
    let city = city.trim();
    !city.is_empty() && !cities.iter().any(|known| known == city)
}
