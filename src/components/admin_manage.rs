//! Manage Custom Entries
//!
//! Lists admin-added entries with a city filter and inline delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, Page};
use crate::models::TravelItem;
use crate::store::{store_set_error, use_app_store, AppStateStoreFields};

#[component]
pub fn ManagePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (city, set_city) = signal(None::<String>);
    let (items, set_items) = signal(Vec::<TravelItem>::new());
    let (loaded, set_loaded) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        if !ctx.admin_unlocked.get() {
            return;
        }
        let city = city.get();
        spawn_local(async move {
            match commands::list_admin_items(city.as_deref()).await {
                Ok(found) => {
                    let _ = set_items.try_set(found);
                    let _ = set_loaded.try_set(true);
                }
                Err(e) => store_set_error(&store, e),
            }
        });
    });

    view! {
        <section class="manage">
            <Show
                when=move || ctx.admin_unlocked.get()
                fallback=move || view! {
                    <p class="empty-state">"Admin access is required."</p>
                    <button class="primary-btn" on:click=move |_| ctx.navigate(Page::Admin)>"Enter PIN"</button>
                }
            >
                <div class="admin-header">
                    <h2>"Custom entries"</h2>
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        set_city.set((!value.is_empty()).then_some(value));
                    }>
                        <option value="">"All cities"</option>
                        <For
                            each=move || store.cities().get()
                            key=|c| c.clone()
                            children=|c| view! { <option value=c.clone()>{c.clone()}</option> }
                        />
                    </select>
                </div>
                <Show when=move || loaded.get() && items.get().is_empty()>
                    <p class="empty-state">"No custom entries yet. Add one from the Admin page."</p>
                </Show>
                <ul class="admin-results">
                    <For
                        each=move || items.get()
                        key=|item| (item.id.clone(), item.updated_at.clone())
                        children=move |item| {
                            let id = item.id.clone();
                            let on_delete = Callback::new(move |_: ()| {
                                let id = id.clone();
                                spawn_local(async move {
                                    match commands::delete_admin_item(&id).await {
                                        Ok(()) => ctx.reload(),
                                        Err(e) => store_set_error(&store, e),
                                    }
                                });
                            });
                            view! {
                                <li class="admin-result">
                                    <span class="item-name">{item.name.clone()}</span>
                                    <span class="item-meta">
                                        {format!("{} · {}", item.city, item.category.label())}
                                        {item.subcategory.clone().map(|s| format!(" · {}", s))}
                                    </span>
                                    <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}
