//! App Header
//!
//! Title, navigation, theme toggle and offline badge.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{use_app_context, Page};
use crate::store::{store_clear_error, store_set_error, store_set_theme, use_app_store, AppStateStoreFields};

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let theme = move || store.settings().get().theme;

    let on_theme_click = move |_| {
        let next = theme().next();
        store_set_theme(&store, next);
        spawn_local(async move {
            if let Err(e) = commands::set_theme(next).await {
                store_set_error(&store, e);
            }
        });
    };

    let nav_class = move |target: Page| {
        move || {
            let current = ctx.page.get();
            let active = match (&current, &target) {
                (Page::City(_), Page::Home) => true,
                (a, b) => a == b,
            };
            if active { "nav-btn active" } else { "nav-btn" }
        }
    };

    view! {
        <header class="app-header">
            <button class="app-title" on:click=move |_| ctx.navigate(Page::Home)>
                "✈️ Travel Checklist"
            </button>
            <nav class="app-nav">
                <button class=nav_class(Page::Home) on:click=move |_| ctx.navigate(Page::Home)>"Cities"</button>
                <button class=nav_class(Page::Admin) on:click=move |_| ctx.navigate(Page::Admin)>"Admin"</button>
                <Show when=move || ctx.admin_unlocked.get()>
                    <button class=nav_class(Page::Manage) on:click=move |_| ctx.navigate(Page::Manage)>"Manage"</button>
                </Show>
                <button class=nav_class(Page::About) on:click=move |_| ctx.navigate(Page::About)>"About"</button>
            </nav>
            <div class="header-actions">
                <Show when=move || !ctx.online.get()>
                    <span class="offline-badge" title="Everything keeps working offline">"Offline"</span>
                </Show>
                <button
                    class="theme-toggle"
                    title=move || format!("Theme: {:?}", theme())
                    on:click=on_theme_click
                >
                    {move || theme().icon()}
                </button>
            </div>
        </header>
        <Show when=move || store.error().get().is_some()>
            <div class="error-banner">
                <span>{move || store.error().get().unwrap_or_default()}</span>
                <button class="cancel-btn" on:click=move |_| store_clear_error(&store)>"✗"</button>
            </div>
        </Show>
    }
}
