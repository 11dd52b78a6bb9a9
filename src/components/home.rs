//! Home Screen
//!
//! City list with overall progress per city.

use leptos::prelude::*;

use crate::context::{use_app_context, Page};
use crate::components::LoadingSkeleton;
use crate::models::{Category, CitySummary};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn HomePage() -> impl IntoView {
    let store = use_app_store();

    let summaries = move || store.summaries().get();

    view! {
        <section class="home">
            <h2>"Your Cities"</h2>
            <Show
                when=move || !store.syncing().get()
                fallback=|| view! {
                    <p class="sync-note">"Preparing your checklist…"</p>
                    <LoadingSkeleton rows=4 />
                }
            >
                <Show
                    when=move || !summaries().is_empty()
                    fallback=|| view! {
                        <p class="empty-state">"No destinations yet. Ask an admin to import travel data."</p>
                    }
                >
                    <div class="city-grid">
                        <For
                            each=summaries
                            key=|summary| (summary.city.clone(), summary.completed_items, summary.total_items)
                            children=move |summary| view! { <CityCard summary=summary /> }
                        />
                    </div>
                </Show>
                <p class="sync-note">
                    {move || match store.sync_status().get() {
                        Some(status) => format!(
                            "{} items stored on this device{}",
                            status.item_count,
                            status.last_sync.map(|t| format!(" · last import {}", t)).unwrap_or_default()
                        ),
                        None => String::new(),
                    }}
                </p>
            </Show>
        </section>
    }
}

#[component]
fn CityCard(summary: CitySummary) -> impl IntoView {
    let ctx = use_app_context();
    let city = summary.city.clone();
    let percentage = summary.percentage();

    view! {
        <button class="city-card" on:click=move |_| ctx.navigate(Page::City(city.clone()))>
            <div class="city-card-header">
                <span class="city-name">{summary.city.clone()}</span>
                <span class="city-percent">{format!("{}%", percentage)}</span>
            </div>
            <div class="progress-bar">
                <div class="progress-fill" style=format!("width: {}%", percentage)></div>
            </div>
            <div class="city-card-meta">
                <span>{format!("{} / {} done", summary.completed_items, summary.total_items)}</span>
                <span class="city-counts">
                    {Category::ALL.into_iter().map(|category| view! {
                        <span class="count-chip" title=category.label()>
                            {format!("{} {}", category.icon(), summary.category_counts.get(category))}
                        </span>
                    }).collect_view()}
                </span>
            </div>
        </button>
    }
}
