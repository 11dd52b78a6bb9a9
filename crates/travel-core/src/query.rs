//! View Queries
//!
//! Search, filtering, sorting, grouping and progress figures for the city
//! and home screens. Everything here is pure and works on loaded items.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{Category, Priority, SortType, TravelItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    Must,
    Optional,
}

impl PriorityFilter {
    fn matches(&self, priority: Option<Priority>) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Must => priority == Some(Priority::Must),
            PriorityFilter::Optional => priority == Some(Priority::Optional),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    fn matches(&self, item: &TravelItem) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !item.is_completed(),
            StatusFilter::Completed => item.is_completed(),
        }
    }
}

/// Filter and sort state of the city screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterState {
    pub search: String,
    pub priority: PriorityFilter,
    pub status: StatusFilter,
    pub sort: SortType,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        self.search.trim().is_empty()
            && self.priority == PriorityFilter::All
            && self.status == StatusFilter::All
            && self.sort == SortType::Manual
    }

    /// Drag reordering only makes sense while the list shows manual order
    pub fn allows_reorder(&self) -> bool {
        self.sort == SortType::Manual
    }
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

    fn bump(&mut self, category: Category) {
        match category {
            Category::Places => self.places += 1,
            Category::Shopping => self.shopping += 1,
            Category::Food => self.food += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.places + self.shopping + self.food
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
        percent(self.completed_items, self.total_items)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryGroup {
    pub name: String,
    pub items: Vec<TravelItem>,
}

/// Everything the city screen renders for one category tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityView {
    pub city: String,
    pub category: Category,
    /// Per-category counts after the search, before priority/status filters
    pub counts: CategoryCounts,
    /// Number of search hits across all categories, when searching
    pub search_results: Option<usize>,
    pub progress: CategoryProgress,
    pub regular: Vec<TravelItem>,
    pub groups: Vec<SubcategoryGroup>,
    pub can_reorder: bool,
    pub active_filters: Vec<FilterChip>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterChipKind {
    Search,
    Sort,
    Priority,
    Status,
}

/// A removable "active filter" chip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChip {
    pub kind: FilterChipKind,
    pub label: String,
}

/// Rounded percentage, 0 for an empty total
fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// Case-insensitive substring match on name or details
pub fn search<'a>(items: &'a [TravelItem], query: &str) -> Vec<&'a TravelItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&query) || item.details.to_lowercase().contains(&query)
        })
        .collect()
}

pub fn category_counts<'a>(items: impl IntoIterator<Item = &'a TravelItem>) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for item in items {
        counts.bump(item.category);
    }
    counts
}

/// Narrow to one category, then apply the priority and status filters
pub fn filter_category<'a>(
    items: &[&'a TravelItem],
    category: Category,
    filter: &FilterState,
) -> Vec<&'a TravelItem> {
    items
        .iter()
        .copied()
        .filter(|item| item.category == category)
        .filter(|item| filter.priority.matches(item.priority))
        .filter(|item| filter.status.matches(item))
        .collect()
}

/// Split into items without a subcategory and groups keyed by subcategory
pub fn split_by_subcategory<'a>(
    items: &[&'a TravelItem],
) -> (Vec<&'a TravelItem>, BTreeMap<String, Vec<&'a TravelItem>>) {
    let mut regular = Vec::new();
    let mut groups: BTreeMap<String, Vec<&TravelItem>> = BTreeMap::new();
    for item in items.iter().copied() {
        match item.subcategory.as_deref().map(str::trim) {
            Some(sub) if !sub.is_empty() => groups.entry(sub.to_string()).or_default().push(item),
            _ => regular.push(item),
        }
    }
    (regular, groups)
}

fn compare(a: &TravelItem, b: &TravelItem, sort: SortType) -> Ordering {
    let primary = match sort {
        SortType::Manual => Ordering::Equal,
        SortType::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        // Descending; unrated sorts after every rating
        SortType::Rating => b
            .rating
            .map(|r| r.value())
            .unwrap_or(0)
            .cmp(&a.rating.map(|r| r.value()).unwrap_or(0)),
        SortType::Status => a.is_completed().cmp(&b.is_completed()),
        SortType::Priority => Priority::weight(b.priority).cmp(&Priority::weight(a.priority)),
    };
    primary.then(a.sort_order.cmp(&b.sort_order))
}

/// Pinned items first, each partition ordered by `sort`. With no status
/// filter, unpinned pending items come before unpinned completed ones.
pub fn sort_items<'a>(items: &[&'a TravelItem], sort: SortType, status: StatusFilter) -> Vec<&'a TravelItem> {
    let (mut pinned, mut unpinned): (Vec<&TravelItem>, Vec<&TravelItem>) =
        items.iter().copied().partition(|item| item.is_pinned);
    pinned.sort_by(|a, b| compare(a, b, sort));
    unpinned.sort_by(|a, b| compare(a, b, sort));

    if status == StatusFilter::All {
        let (pending, completed): (Vec<&TravelItem>, Vec<&TravelItem>) =
            unpinned.into_iter().partition(|item| !item.is_completed());
        pinned.extend(pending);
        pinned.extend(completed);
    } else {
        pinned.extend(unpinned);
    }
    pinned
}

pub fn category_progress(items: &[&TravelItem]) -> CategoryProgress {
    let total = items.len();
    let completed = items.iter().filter(|item| item.is_completed()).count();
    let with_location = items.iter().filter(|item| item.has_location()).count();
    CategoryProgress {
        total,
        completed,
        percentage: percent(completed, total),
        with_location,
        without_location: total - with_location,
        location_percentage: percent(with_location, total),
    }
}

/// One summary per city, sorted by city name
pub fn city_summaries(items: &[TravelItem]) -> Vec<CitySummary> {
    let mut by_city: BTreeMap<&str, CitySummary> = BTreeMap::new();
    for item in items {
        let summary = by_city.entry(item.city.as_str()).or_insert_with(|| CitySummary {
            city: item.city.clone(),
            total_items: 0,
            completed_items: 0,
            category_counts: CategoryCounts::default(),
        });
        summary.total_items += 1;
        if item.is_completed() {
            summary.completed_items += 1;
        }
        summary.category_counts.bump(item.category);
    }
    by_city.into_values().collect()
}

/// Compose the city screen for one category tab. `items` are the city's items.
pub fn city_view(items: &[TravelItem], city: &str, category: Category, filter: &FilterState) -> CityView {
    let in_city: Vec<TravelItem> = items.iter().filter(|item| item.city == city).cloned().collect();
    let hits = search(&in_city, &filter.search);
    let counts = category_counts(hits.iter().copied());
    let search_results = (!filter.search.trim().is_empty()).then_some(hits.len());

    let visible = filter_category(&hits, category, filter);
    let progress = category_progress(&visible);
    let (regular, groups) = split_by_subcategory(&visible);

    let owned = |list: Vec<&TravelItem>| list.into_iter().cloned().collect::<Vec<_>>();
    CityView {
        city: city.to_string(),
        category,
        counts,
        search_results,
        progress,
        regular: owned(sort_items(&regular, filter.sort, filter.status)),
        groups: groups
            .into_iter()
            .map(|(name, group)| SubcategoryGroup {
                name,
                items: owned(sort_items(&group, filter.sort, filter.status)),
            })
            .collect(),
        can_reorder: filter.allows_reorder(),
        active_filters: active_filter_labels(filter),
    }
}

/// Move the element at `from` to `to`, shifting the others. Out-of-range
/// indices leave the list unchanged.
pub fn move_item<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = list.to_vec();
    if from >= moved.len() || to >= moved.len() || from == to {
        return moved;
    }
    let element = moved.remove(from);
    moved.insert(to, element);
    moved
}

fn sort_label(sort: SortType) -> Option<&'static str> {
    match sort {
        SortType::Manual => None,
        SortType::Name => Some("Sort: A-Z"),
        SortType::Rating => Some("Sort: Rating"),
        SortType::Status => Some("Sort: Status"),
        SortType::Priority => Some("Sort: Priority"),
    }
}

/// Chips for every non-default filter value
pub fn active_filter_labels(filter: &FilterState) -> Vec<FilterChip> {
    if filter.is_default() {
        return Vec::new();
    }
    let mut chips = Vec::new();
    let query = filter.search.trim();
    if !query.is_empty() {
        chips.push(FilterChip {
            kind: FilterChipKind::Search,
            label: format!("\"{}\"", query),
        });
    }
    if let Some(label) = sort_label(filter.sort) {
        chips.push(FilterChip {
            kind: FilterChipKind::Sort,
            label: label.to_string(),
        });
    }
    match filter.priority {
        PriorityFilter::All => {}
        PriorityFilter::Must => chips.push(FilterChip {
            kind: FilterChipKind::Priority,
            label: "Must".to_string(),
        }),
        PriorityFilter::Optional => chips.push(FilterChip {
            kind: FilterChipKind::Priority,
            label: "Optional".to_string(),
        }),
    }
    match filter.status {
        StatusFilter::All => {}
        StatusFilter::Pending => chips.push(FilterChip {
            kind: FilterChipKind::Status,
            label: "Pending".to_string(),
        }),
        StatusFilter::Completed => chips.push(FilterChip {
            kind: FilterChipKind::Status,
            label: "Completed".to_string(),
        }),
    }
    chips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rating;
    use pretty_assertions::assert_eq;

    fn item(category: Category, name: &str, sort_order: i32) -> TravelItem {
        let mut item = TravelItem::new("Riyadh", category, name);
        item.sort_order = sort_order;
        item
    }

    fn names(items: &[&TravelItem]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_search_matches_name_or_details() {
        let mut a = item(Category::Places, "Masmak Fort", 0);
        a.details = "Clay citadel".to_string();
        let b = item(Category::Food, "Kabsa", 1);
        let items = vec![a, b];

        assert_eq!(search(&items, "fort").len(), 1);
        assert_eq!(search(&items, "CITADEL").len(), 1);
        assert_eq!(search(&items, "  ").len(), 2);
        assert!(search(&items, "sushi").is_empty());
    }

    #[test]
    fn test_filter_category_priority_and_status() {
        let mut must = item(Category::Places, "Must", 0);
        must.priority = Some(Priority::Must);
        let mut done = item(Category::Places, "Done", 1);
        done.toggle_status();
        done.priority = Some(Priority::Optional);
        let food = item(Category::Food, "Food", 2);
        let items = [must, done, food];
        let refs: Vec<&TravelItem> = items.iter().collect();

        let all = filter_category(&refs, Category::Places, &FilterState::default());
        assert_eq!(names(&all), vec!["Must", "Done"]);

        let filter = FilterState {
            priority: PriorityFilter::Must,
            ..Default::default()
        };
        assert_eq!(names(&filter_category(&refs, Category::Places, &filter)), vec!["Must"]);

        let filter = FilterState {
            status: StatusFilter::Completed,
            ..Default::default()
        };
        assert_eq!(names(&filter_category(&refs, Category::Places, &filter)), vec!["Done"]);
    }

    #[test]
    fn test_sort_pinned_then_pending_then_completed() {
        let first = item(Category::Places, "First", 0);
        let mut done = item(Category::Places, "Done", 1);
        done.toggle_status();
        let mut pinned_done = item(Category::Places, "Pinned", 5);
        pinned_done.is_pinned = true;
        pinned_done.toggle_status();
        let last = item(Category::Places, "Last", 3);
        let items = [first, done, pinned_done, last];
        let refs: Vec<&TravelItem> = items.iter().collect();

        let sorted = sort_items(&refs, SortType::Manual, StatusFilter::All);
        assert_eq!(names(&sorted), vec!["Pinned", "First", "Last", "Done"]);

        let sorted = sort_items(&refs, SortType::Manual, StatusFilter::Completed);
        assert_eq!(names(&sorted), vec!["Pinned", "First", "Done", "Last"]);
    }

    #[test]
    fn test_sort_by_rating_puts_unrated_last() {
        let mut good = item(Category::Food, "Good", 2);
        good.rating = Some(Rating::new(3).unwrap());
        let mut best = item(Category::Food, "Best", 1);
        best.rating = Some(Rating::new(5).unwrap());
        let unrated = item(Category::Food, "Unrated", 0);
        let items = [good, best, unrated];
        let refs: Vec<&TravelItem> = items.iter().collect();

        let sorted = sort_items(&refs, SortType::Rating, StatusFilter::Pending);
        assert_eq!(names(&sorted), vec!["Best", "Good", "Unrated"]);
    }

    #[test]
    fn test_sort_by_name_and_priority() {
        let mut b = item(Category::Shopping, "banana stall", 0);
        b.priority = Some(Priority::Optional);
        let mut a = item(Category::Shopping, "Abaya shop", 1);
        a.priority = Some(Priority::Must);
        let c = item(Category::Shopping, "Carpets", 2);
        let items = [c, b, a];
        let refs: Vec<&TravelItem> = items.iter().collect();

        let by_name = sort_items(&refs, SortType::Name, StatusFilter::All);
        assert_eq!(names(&by_name), vec!["Abaya shop", "banana stall", "Carpets"]);

        let by_priority = sort_items(&refs, SortType::Priority, StatusFilter::All);
        assert_eq!(names(&by_priority), vec!["Abaya shop", "banana stall", "Carpets"]);
    }

    #[test]
    fn test_split_by_subcategory() {
        let mut modern = item(Category::Places, "Kingdom Centre", 0);
        modern.subcategory = Some("modern".to_string());
        let mut old = item(Category::Places, "Diriyah", 1);
        old.subcategory = Some("historical".to_string());
        let mut blank = item(Category::Places, "Park", 2);
        blank.subcategory = Some("  ".to_string());
        let items = [modern, old, blank];
        let refs: Vec<&TravelItem> = items.iter().collect();

        let (regular, groups) = split_by_subcategory(&refs);
        assert_eq!(names(&regular), vec!["Park"]);
        assert_eq!(groups.keys().cloned().collect::<Vec<_>>(), vec!["historical", "modern"]);
    }

    #[test]
    fn test_category_progress_rounds() {
        let mut done = item(Category::Places, "Done", 0);
        done.toggle_status();
        done.location = "https://maps.example".to_string();
        let items = [done, item(Category::Places, "A", 1), item(Category::Places, "B", 2)];
        let refs: Vec<&TravelItem> = items.iter().collect();

        let progress = category_progress(&refs);
        assert_eq!(
            progress,
            CategoryProgress {
                total: 3,
                completed: 1,
                percentage: 33,
                with_location: 1,
                without_location: 2,
                location_percentage: 33,
            }
        );
        assert_eq!(category_progress(&[]).percentage, 0);
    }

    #[test]
    fn test_city_summaries_sorted() {
        let mut done = TravelItem::new("Riyadh", Category::Food, "Kabsa");
        done.toggle_status();
        let items = vec![
            done,
            TravelItem::new("Riyadh", Category::Places, "Fort"),
            TravelItem::new("AlUla", Category::Places, "Hegra"),
        ];

        let summaries = city_summaries(&items);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].city, "AlUla");
        assert_eq!(summaries[1].total_items, 2);
        assert_eq!(summaries[1].completed_items, 1);
        assert_eq!(summaries[1].percentage(), 50);
        assert_eq!(summaries[1].category_counts.food, 1);
    }

    #[test]
    fn test_city_view_composes() {
        let mut museum = item(Category::Places, "National Museum", 1);
        museum.subcategory = Some("historical".to_string());
        let fort = item(Category::Places, "Fort museum", 0);
        let food = item(Category::Food, "Museum cafe", 0);
        let elsewhere = TravelItem::new("Jeddah", Category::Places, "Museum of Jeddah");
        let items = vec![museum, fort, food, elsewhere, item(Category::Places, "Park", 2)];

        let filter = FilterState {
            search: "museum".to_string(),
            ..Default::default()
        };
        let view = city_view(&items, "Riyadh", Category::Places, &filter);

        assert_eq!(view.search_results, Some(3));
        assert_eq!(view.counts, CategoryCounts { places: 2, shopping: 0, food: 1 });
        assert_eq!(view.progress.total, 2);
        assert_eq!(view.regular.len(), 1);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].name, "historical");
        assert!(view.can_reorder);
        assert_eq!(view.active_filters.len(), 1);
        assert_eq!(view.active_filters[0].kind, FilterChipKind::Search);

        let view = city_view(&items, "Riyadh", Category::Places, &FilterState::default());
        assert_eq!(view.search_results, None);
        assert_eq!(view.counts.places, 3);
    }

    #[test]
    fn test_move_item() {
        let ids = vec!["a", "b", "c", "d"];
        assert_eq!(move_item(&ids, 0, 2), vec!["b", "c", "a", "d"]);
        assert_eq!(move_item(&ids, 3, 0), vec!["d", "a", "b", "c"]);
        assert_eq!(move_item(&ids, 1, 9), ids);
    }

    #[test]
    fn test_active_filter_labels() {
        assert!(active_filter_labels(&FilterState::default()).is_empty());
        let blank_search = FilterState {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert!(active_filter_labels(&blank_search).is_empty());

        let filter = FilterState {
            search: " kabsa ".to_string(),
            priority: PriorityFilter::Must,
            status: StatusFilter::Completed,
            sort: SortType::Rating,
        };
        let labels: Vec<String> = active_filter_labels(&filter).into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["\"kabsa\"", "Sort: Rating", "Must", "Completed"]);
        assert!(!filter.allows_reorder());
        assert!(!filter.is_default());
    }
}
