//! Filter / Sort Panel
//!
//! Collapsible panel with sort choice and priority / status filters.

use leptos::prelude::*;

use crate::models::{FilterState, PriorityFilter, SortType, StatusFilter};

#[component]
pub fn FilterPanel(
    filter: ReadSignal<FilterState>,
    set_filter: WriteSignal<FilterState>,
    /// Sort changes are persisted per category by the page
    #[prop(into)] on_sort_change: Callback<SortType>,
) -> impl IntoView {
    let (open, set_open) = signal(false);

    let priority_btn = move |value: PriorityFilter, label: &'static str| {
        view! {
            <button
                class=move || if filter.get().priority == value { "filter-btn active" } else { "filter-btn" }
                on:click=move |_| set_filter.update(|f| f.priority = value)
            >
                {label}
            </button>
        }
    };

    let status_btn = move |value: StatusFilter, label: &'static str| {
        view! {
            <button
                class=move || if filter.get().status == value { "filter-btn active" } else { "filter-btn" }
                on:click=move |_| set_filter.update(|f| f.status = value)
            >
                {label}
            </button>
        }
    };

    let on_sort = move |ev: leptos::ev::Event| {
        if let Some(sort) = SortType::parse(&event_target_value(&ev)) {
            on_sort_change.run(sort);
        }
    };

    view! {
        <div class="filter-panel">
            <button class="filter-toggle" on:click=move |_| set_open.update(|o| *o = !*o)>
                {move || if open.get() { "▾ Filter & sort" } else { "▸ Filter & sort" }}
            </button>
            <Show when=move || open.get()>
                <div class="filter-body">
                    <label class="filter-row">
                        <span>"Sort by"</span>
                        <select on:change=on_sort prop:value=move || filter.get().sort.as_str()>
                            {SortType::ALL.into_iter().map(|sort| view! {
                                <option value=sort.as_str()>{sort.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>
                    <div class="filter-row">
                        <span>"Priority"</span>
                        {priority_btn(PriorityFilter::All, "All")}
                        {priority_btn(PriorityFilter::Must, "Must")}
                        {priority_btn(PriorityFilter::Optional, "Optional")}
                    </div>
                    <div class="filter-row">
                        <span>"Status"</span>
                        {status_btn(StatusFilter::All, "All")}
                        {status_btn(StatusFilter::Pending, "Pending")}
                        {status_btn(StatusFilter::Completed, "Completed")}
                    </div>
                </div>
            </Show>
        </div>
    }
}
