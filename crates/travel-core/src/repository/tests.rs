//! Repository Integration Tests
//!
//! Tests for ItemRepository and SettingsRepository with in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::domain::{AppSettings, Category, DomainError, Priority, Rating, SortType, Status, Theme, TravelItem};
    use crate::repository::{
        init_db, ItemCityOperations, ItemPositioningOperations, ItemRepository, Repository,
        SearchableRepository, SettingsRepository,
    };
    use chrono::Utc;
    use std::path::Path;

    async fn setup_test_db() -> (ItemRepository, SettingsRepository) {
        // Use in-memory database for tests
        let db_state = init_db(Path::new(":memory:")).await.expect("Failed to init test DB");
        (db_state.item_repo(), db_state.settings_repo())
    }

    fn item(city: &str, category: Category, name: &str, sort_order: i32) -> TravelItem {
        let mut item = TravelItem::new(city, category, name);
        item.sort_order = sort_order;
        item
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (repo, _) = setup_test_db().await;

        let mut original = item("Riyadh", Category::Places, "Masmak Fort", 0);
        original.subcategory = Some("historical".to_string());
        original.rating = Some(Rating::new(4).unwrap());
        original.priority = Some(Priority::Must);
        let created = repo.create(&original).await.expect("Failed to create");

        let found = repo.find_by_id(&created.id).await.expect("Find failed").expect("missing");
        assert_eq!(found.name, "Masmak Fort");
        assert_eq!(found.subcategory.as_deref(), Some("historical"));
        assert_eq!(found.rating, Some(Rating::new(4).unwrap()));
        assert_eq!(found.priority, Some(Priority::Must));
        assert_eq!(found.created_at.timestamp_millis(), original.created_at.timestamp_millis());
    }

    #[tokio::test]
    async fn test_create_duplicate_id_conflicts() {
        let (repo, _) = setup_test_db().await;

        let original = item("Riyadh", Category::Places, "Fort", 0);
        repo.create(&original).await.unwrap();
        let err = repo.create(&original).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_touches_timestamp() {
        let (repo, _) = setup_test_db().await;

        let mut created = repo.create(&item("Jeddah", Category::Food, "Al Baik", 0)).await.unwrap();
        let before = created.updated_at;
        created.toggle_status();
        created.user_notes = "Spicy!".to_string();
        created.is_pinned = true;

        let updated = repo.update(&created).await.expect("Update failed");
        assert!(updated.updated_at >= before);

        let found = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.status, Status::Tasted);
        assert_eq!(found.user_notes, "Spicy!");
        assert!(found.is_pinned);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (repo, _) = setup_test_db().await;
        let ghost = item("Nowhere", Category::Places, "Ghost", 0);
        assert!(matches!(repo.update(&ghost).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_item() {
        let (repo, _) = setup_test_db().await;

        let created = repo.create(&item("Jeddah", Category::Places, "To delete", 0)).await.unwrap();
        repo.delete(&created.id).await.expect("Delete failed");

        assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
        assert!(repo.delete(&created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let (repo, _) = setup_test_db().await;

        let mut museum = item("Riyadh", Category::Places, "National Museum", 0);
        museum.details = "History of the Kingdom".to_string();
        repo.create(&museum).await.unwrap();
        repo.create(&item("Riyadh", Category::Food, "Najd Village", 1)).await.unwrap();

        assert_eq!(repo.search("museum").await.unwrap().len(), 1);
        assert_eq!(repo.search("HISTORY").await.unwrap().len(), 1);
        assert_eq!(repo.search("   ").await.unwrap().len(), 2);
        assert!(repo.search("%").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let (repo, _) = setup_test_db().await;

        let mut cafe = item("Jeddah", Category::Food, "Café Élysée", 0);
        cafe.details = "Crêpes near the CORNICHE".to_string();
        repo.create(&cafe).await.unwrap();
        repo.create(&item("Jeddah", Category::Food, "Al Baik", 1)).await.unwrap();

        let found = repo.search("ÉLYSÉE").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Café Élysée");
        assert_eq!(repo.search("crêpes").await.unwrap().len(), 1);
        assert_eq!(repo.search("élysée").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_city_listing() {
        let (repo, _) = setup_test_db().await;

        repo.bulk_insert(&[
            item("Riyadh", Category::Places, "B", 1),
            item("Riyadh", Category::Places, "A", 0),
            item("Riyadh", Category::Food, "Kabsa", 0),
            item("AlUla", Category::Places, "Hegra", 0),
        ])
        .await
        .unwrap();

        assert_eq!(repo.list_cities().await.unwrap(), vec!["AlUla", "Riyadh"]);
        assert_eq!(repo.list_by_city("Riyadh").await.unwrap().len(), 3);

        let places = repo.list_by_city_and_category("Riyadh", Category::Places).await.unwrap();
        let names: Vec<_> = places.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_replace_all_swaps_contents() {
        let (repo, _) = setup_test_db().await;

        repo.bulk_insert(&[item("Riyadh", Category::Places, "Old", 0)]).await.unwrap();
        repo.replace_all(&[
            item("Jeddah", Category::Places, "New 1", 0),
            item("Jeddah", Category::Places, "New 2", 1),
        ])
        .await
        .unwrap();

        assert_eq!(repo.list_cities().await.unwrap(), vec!["Jeddah"]);
        assert_eq!(repo.count().await.unwrap(), 2);

        repo.clear_all().await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_admin_added() {
        let (repo, _) = setup_test_db().await;

        let mut custom = item("Riyadh", Category::Food, "Hidden cafe", 1);
        custom.is_admin_added = true;
        let mut other = item("Jeddah", Category::Food, "Fish market", 1);
        other.is_admin_added = true;
        repo.bulk_insert(&[custom, other, item("Riyadh", Category::Food, "Kabsa", 0)])
            .await
            .unwrap();

        assert_eq!(repo.list_admin_added(None).await.unwrap().len(), 2);
        let riyadh = repo.list_admin_added(Some("Riyadh")).await.unwrap();
        assert_eq!(riyadh.len(), 1);
        assert_eq!(riyadh[0].name, "Hidden cafe");
    }

    #[tokio::test]
    async fn test_next_sort_order() {
        let (repo, _) = setup_test_db().await;

        assert_eq!(repo.next_sort_order("Riyadh", Category::Places).await.unwrap(), 1);
        repo.bulk_insert(&[
            item("Riyadh", Category::Places, "A", 0),
            item("Riyadh", Category::Places, "B", 7),
            item("Riyadh", Category::Food, "C", 20),
        ])
        .await
        .unwrap();
        assert_eq!(repo.next_sort_order("Riyadh", Category::Places).await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_apply_order() {
        let (repo, _) = setup_test_db().await;

        let a = item("Riyadh", Category::Places, "A", 0);
        let b = item("Riyadh", Category::Places, "B", 1);
        let c = item("Riyadh", Category::Places, "C", 2);
        repo.bulk_insert(&[a.clone(), b.clone(), c.clone()]).await.unwrap();

        repo.apply_order(&[c.id.clone(), a.id.clone(), b.id.clone()]).await.unwrap();

        let names: Vec<_> = repo
            .list_by_city_and_category("Riyadh", Category::Places)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_move_in_list() {
        let (repo, _) = setup_test_db().await;

        let a = item("Riyadh", Category::Places, "A", 0);
        let b = item("Riyadh", Category::Places, "B", 1);
        let c = item("Riyadh", Category::Places, "C", 2);
        repo.bulk_insert(&[a.clone(), b.clone(), c.clone()]).await.unwrap();
        let ids = vec![a.id.clone(), b.id.clone(), c.id.clone()];

        let order = repo.move_in_list(&ids, 0, 2).await.unwrap();
        assert_eq!(order, vec![b.id.clone(), c.id.clone(), a.id.clone()]);

        let names: Vec<_> = repo
            .list_by_city_and_category("Riyadh", Category::Places)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["B", "C", "A"]);

        let result = repo.move_in_list(&ids, 0, 3).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_apply_order_unknown_id_rolls_back() {
        let (repo, _) = setup_test_db().await;

        let a = item("Riyadh", Category::Places, "A", 0);
        let b = item("Riyadh", Category::Places, "B", 1);
        repo.bulk_insert(&[a.clone(), b.clone()]).await.unwrap();

        let result = repo.apply_order(&[b.id.clone(), "missing".to_string(), a.id.clone()]).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));

        let found = repo.find_by_id(&b.id).await.unwrap().unwrap();
        assert_eq!(found.sort_order, 1);
    }

    #[tokio::test]
    async fn test_settings_defaults_and_save() {
        let (_, settings_repo) = setup_test_db().await;

        let settings = settings_repo.load().await.unwrap();
        assert_eq!(settings, AppSettings::default());

        let mut changed = settings.clone();
        changed.theme = Theme::Dark;
        changed.sort_preference.set(Category::Food, SortType::Rating);
        settings_repo.save(&changed).await.unwrap();

        let reloaded = settings_repo.load().await.unwrap();
        assert_eq!(reloaded.theme, Theme::Dark);
        assert_eq!(reloaded.sort_preference.get(Category::Food), SortType::Rating);
        assert_eq!(reloaded.sort_preference.get(Category::Places), SortType::Manual);

        let now = Utc::now();
        let synced = settings_repo.touch_last_sync(now).await.unwrap();
        assert_eq!(
            synced.last_sync.map(|t| t.timestamp_millis()),
            Some(now.timestamp_millis())
        );
    }
}
