//! Travel Checklist App
//!
//! Root component: provides context and store, seeds the local database on
//! first launch and switches between screens.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals};
use reactive_stores::Store;

use crate::commands;
use crate::components::{AboutPage, AdminPage, CityPage, Header, HomePage, ManagePage};
use crate::context::{AppContext, DragContext, Page};
use crate::store::{store_set_error, AppState, AppStateStoreFields};
use crate::theme::{apply_theme, online_signal};

#[component]
pub fn App() -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (page, set_page) = signal(Page::Home);
    let admin_unlocked = signal(false);
    let online = online_signal();

    let ctx = AppContext::new((reload_trigger, set_reload_trigger), (page, set_page), admin_unlocked, online);
    provide_context(ctx);

    let store = Store::new(AppState::new());
    provide_context(store);

    let drag = DragContext::new(create_dnd_signals());
    bind_global_mouseup(drag.dnd, move |dragged, target| drag.dispatch(dragged, target));
    provide_context(drag);

    // First launch: import the bundled spreadsheet, then load everything
    spawn_local(async move {
        match commands::ensure_initial_sync().await {
            Ok(report) => {
                web_sys::console::log_1(
                    &format!("[APP] Initial sync: {} items, skipped={}", report.item_count, report.skipped).into(),
                );
            }
            Err(e) => store_set_error(&store, format!("Could not load travel data: {}", e)),
        }
        store.syncing().set(false);
        ctx.reload();
    });

    // Reload summaries, cities and settings whenever the trigger fires
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        if store.syncing().get_untracked() {
            return;
        }
        web_sys::console::log_1(&format!("[APP] Loading summaries, trigger={}", trigger).into());
        spawn_local(async move {
            match commands::city_summaries().await {
                Ok(loaded) => store.summaries().set(loaded),
                Err(e) => store_set_error(&store, e),
            }
            if let Ok(loaded) = commands::list_cities().await {
                store.cities().set(loaded);
            }
            if let Ok(settings) = commands::get_settings().await {
                store.settings().set(settings);
            }
            if let Ok(status) = commands::get_sync_status().await {
                store.sync_status().set(Some(status));
            }
        });
    });

    Effect::new(move |_| {
        apply_theme(store.settings().get().theme);
    });

    view! {
        <div class="app-layout">
            <Header />
            <main class="main-content">
                {move || match page.get() {
                    Page::Home => view! { <HomePage /> }.into_any(),
                    Page::City(city) => view! { <CityPage city=city /> }.into_any(),
                    Page::Admin => view! { <AdminPage /> }.into_any(),
                    Page::Manage => view! { <ManagePage /> }.into_any(),
                    Page::About => view! { <AboutPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}
