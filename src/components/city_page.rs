//! City Page
//!
//! Category tabs, search, filters and the item lists of one city. All
//! filtering and grouping happens in the backend; this page only renders the
//! composed `CityView` it gets back.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::drop_positions;

use crate::commands;
use crate::components::{ActiveFilters, FilterPanel, LoadingSkeleton, SortableList};
use crate::context::{use_app_context, use_drag_context, Page};
use crate::models::{Category, CityView, FilterChipKind, FilterState, PriorityFilter, SortType, StatusFilter};
use crate::store::{store_set_error, store_set_sort, use_app_store, AppStateStoreFields};

#[component]
pub fn CityPage(city: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let initial_sort = store.settings().get_untracked().sort_preference.get(Category::Places);
    let (category, set_category) = signal(Category::Places);
    let (filter, set_filter) = signal(FilterState {
        sort: initial_sort,
        ..Default::default()
    });
    let (city_view, set_city_view) = signal(None::<CityView>);
    let (expanded, set_expanded) = signal(None::<String>);
    let (collapsed, set_collapsed) = signal(HashSet::<String>::new());
    // Responses can arrive out of order; only the newest request may land
    let request_seq = StoredValue::new(0u32);

    let city_name = StoredValue::new(city.clone());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let category = category.get();
        let filter = filter.get();
        let city = city_name.get_value();

        request_seq.update_value(|n| *n += 1);
        let seq = request_seq.get_value();
        spawn_local(async move {
            match commands::city_view(&city, category, &filter).await {
                Ok(loaded) => {
                    if request_seq.try_get_value() == Some(seq) {
                        let _ = set_city_view.try_set(Some(loaded));
                    }
                }
                Err(e) => store_set_error(&store, e),
            }
        });
    });

    // Drag reorder within the list that holds the dragged row
    let drag = use_drag_context();
    let dnd = drag.dnd;
    drag.set_drop_handler(Callback::new(move |(dragged, target): (String, String)| {
        let Some(current) = city_view.try_get_untracked().flatten() else {
            return;
        };
        if !current.can_reorder {
            return;
        }
        let Some(ids) = current.list_containing(&dragged) else {
            return;
        };
        let Some((from, to)) = drop_positions(&ids, &dragged, &target) else {
            return;
        };
        web_sys::console::log_1(&format!("[DND] Reorder: dragged={}, from={}, to={}", dragged, from, to).into());
        spawn_local(async move {
            match commands::reorder_items(&ids, from, to).await {
                Ok(_) => ctx.reload(),
                Err(e) => store_set_error(&store, e),
            }
        });
    }));
    on_cleanup(move || drag.clear_drop_handler());

    let select_category = move |next: Category| {
        if category.get_untracked() == next {
            return;
        }
        let sort = store.settings().get_untracked().sort_preference.get(next);
        set_expanded.set(None);
        set_category.set(next);
        set_filter.update(|f| f.sort = sort);
    };

    let on_sort_change = Callback::new(move |sort: SortType| {
        let category = category.get_untracked();
        set_filter.update(|f| f.sort = sort);
        store_set_sort(&store, category, sort);
        spawn_local(async move {
            if let Err(e) = commands::set_sort_preference(category, sort).await {
                store_set_error(&store, e);
            }
        });
    });

    let on_remove_chip = Callback::new(move |kind: FilterChipKind| match kind {
        FilterChipKind::Search => set_filter.update(|f| f.search.clear()),
        FilterChipKind::Sort => on_sort_change.run(SortType::Manual),
        FilterChipKind::Priority => set_filter.update(|f| f.priority = PriorityFilter::All),
        FilterChipKind::Status => set_filter.update(|f| f.status = StatusFilter::All),
    });

    let on_clear_all = Callback::new(move |_: ()| {
        set_filter.update(|f| {
            f.search.clear();
            f.priority = PriorityFilter::All;
            f.status = StatusFilter::All;
        });
        if filter.get_untracked().sort != SortType::Manual {
            on_sort_change.run(SortType::Manual);
        }
    });

    let on_changed = Callback::new(move |_: ()| ctx.reload());

    let chips = Signal::derive(move || city_view.get().map(|v| v.active_filters).unwrap_or_default());
    let can_reorder = Signal::derive(move || city_view.get().is_some_and(|v| v.can_reorder));
    let regular = Signal::derive(move || city_view.get().map(|v| v.regular).unwrap_or_default());
    let group_names = move || {
        city_view
            .get()
            .map(|v| v.groups.into_iter().map(|g| g.name).collect::<Vec<_>>())
            .unwrap_or_default()
    };

    view! {
        <section class="city-page">
            <div class="city-page-header">
                <button class="back-btn" on:click=move |_| ctx.navigate(Page::Home)>"← Cities"</button>
                <h2>{city}</h2>
            </div>

            <div class="category-tabs" role="tablist">
                {Category::ALL.into_iter().map(|cat| view! {
                    <button
                        class=move || if category.get() == cat { "category-tab active" } else { "category-tab" }
                        role="tab"
                        on:click=move |_| select_category(cat)
                    >
                        <span>{format!("{} {}", cat.icon(), cat.label())}</span>
                        <span class="tab-count">
                            {move || city_view.get().map(|v| v.counts.get(cat)).unwrap_or(0)}
                        </span>
                    </button>
                }).collect_view()}
            </div>

            <div class="search-row">
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search name or details…"
                    prop:value=move || filter.get().search
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_filter.update(|f| f.search = value);
                    }
                />
                {move || city_view.get().and_then(|v| v.search_results).map(|n| view! {
                    <span class="search-count">{format!("{} found", n)}</span>
                })}
            </div>

            <FilterPanel filter=filter set_filter=set_filter on_sort_change=on_sort_change />
            <ActiveFilters chips=chips on_remove=on_remove_chip on_clear_all=on_clear_all />

            {move || city_view.get().map(|v| {
                let progress = v.progress;
                let done_label = v.category.done_label();
                view! {
                    <div class="progress-section">
                        <div class="progress-line">
                            <span>{format!("{} {} of {}", done_label, progress.completed, progress.total)}</span>
                            <span>{format!("{}%", progress.percentage)}</span>
                        </div>
                        <div class="progress-bar">
                            <div class="progress-fill" style=format!("width: {}%", progress.percentage)></div>
                        </div>
                        <div class="progress-line secondary">
                            <span>{format!("📍 {} with location, {} without", progress.with_location, progress.without_location)}</span>
                            <span>{format!("{}%", progress.location_percentage)}</span>
                        </div>
                        <div class="progress-bar thin">
                            <div class="progress-fill location" style=format!("width: {}%", progress.location_percentage)></div>
                        </div>
                    </div>
                }
            })}

            <Show
                when=move || city_view.get().is_some()
                fallback=|| view! { <LoadingSkeleton rows=5 /> }
            >
                <Show
                    when=move || !city_view.get().is_some_and(|v| v.is_empty())
                    fallback=move || view! {
                        <p class="empty-state">
                            {move || if filter.get() == FilterState::default() {
                                "Nothing in this category yet."
                            } else {
                                "No items match the current filters."
                            }}
                        </p>
                    }
                >
                    <SortableList
                        items=regular
                        dnd=dnd
                        can_reorder=can_reorder
                        expanded=expanded
                        set_expanded=set_expanded
                        on_changed=on_changed
                    />
                    <For
                        each=group_names
                        key=|name| name.clone()
                        children=move |name| {
                            let group_items = {
                                let name = name.clone();
                                Signal::derive(move || {
                                    city_view
                                        .get()
                                        .and_then(|v| v.groups.into_iter().find(|g| g.name == name))
                                        .map(|g| g.items)
                                        .unwrap_or_default()
                                })
                            };
                            let is_collapsed = {
                                let name = name.clone();
                                move || collapsed.get().contains(&name)
                            };
                            let toggle = {
                                let name = name.clone();
                                move |_| set_collapsed.update(|set| {
                                    if !set.remove(&name) {
                                        set.insert(name.clone());
                                    }
                                })
                            };
                            let arrow = {
                                let is_collapsed = is_collapsed.clone();
                                move || if is_collapsed() { "▸" } else { "▾" }
                            };
                            view! {
                                <div class="subcategory-group">
                                    <button class="group-header" on:click=toggle>
                                        <span>{arrow}</span>
                                        <span class="group-name">{name.clone()}</span>
                                        <span class="group-count">{move || group_items.get().len()}</span>
                                    </button>
                                    <Show when=move || !is_collapsed()>
                                        <SortableList
                                            items=group_items
                                            dnd=dnd
                                            can_reorder=can_reorder
                                            expanded=expanded
                                            set_expanded=set_expanded
                                            on_changed=on_changed
                                        />
                                    </Show>
                                </div>
                            }
                        }
                    />
                </Show>
            </Show>
        </section>
    }
}
