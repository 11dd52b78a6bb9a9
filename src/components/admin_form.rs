//! Admin entry form and item finder

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;
use crate::models::{is_new_city, AdminForm, Category, TravelItem};
use crate::store::{store_set_error, use_app_store, AppStateStoreFields};

/// Add a new entry, or edit the one loaded from the finder
#[component]
pub fn AdminItemForm(form: RwSignal<AdminForm>, editing_id: RwSignal<Option<String>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (status, set_status) = signal(None::<Result<String, String>>);

    let reset = move || {
        form.set(AdminForm::default());
        editing_id.set(None);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        let editing = editing_id.get_untracked();
        spawn_local(async move {
            let result = match &editing {
                Some(id) => commands::edit_item(id, &current).await,
                None => commands::create_admin_item(&current).await,
            };
            match result {
                Ok(item) => {
                    let verb = if editing.is_some() { "Updated" } else { "Added" };
                    set_status.set(Some(Ok(format!("{} \"{}\" in {}", verb, item.name, item.city))));
                    reset();
                    ctx.reload();
                }
                Err(e) => set_status.set(Some(Err(e))),
            }
        });
    };

    let new_city_hint = move || {
        let city = form.get().city;
        is_new_city(&store.cities().get(), &city)
            .then(|| view! { <p class="form-hint">{format!("\"{}\" will be added as a new city", city.trim())}</p> })
    };

    let text_field = move |label: &'static str, get: fn(&AdminForm) -> String, set: fn(&mut AdminForm, String)| {
        view! {
            <label class="form-field">
                <span>{label}</span>
                <input
                    type="text"
                    prop:value=move || get(&form.get())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <form class="admin-section admin-form" on:submit=on_submit>
            <h3>{move || if editing_id.get().is_some() { "Edit entry" } else { "Add entry" }}</h3>

            <label class="form-field">
                <span>"City"</span>
                <input
                    type="text"
                    list="known-cities"
                    prop:value=move || form.get().city
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.city = value);
                    }
                />
                <datalist id="known-cities">
                    <For
                        each=move || store.cities().get()
                        key=|city| city.clone()
                        children=|city| view! { <option value=city></option> }
                    />
                </datalist>
            </label>
            {new_city_hint}

            <label class="form-field">
                <span>"Category"</span>
                <select
                    prop:value=move || form.get().category.as_str()
                    on:change=move |ev| {
                        if let Some(category) = Category::parse(&event_target_value(&ev)) {
                            form.update(|f| f.category = category);
                        }
                    }
                >
                    {Category::ALL.into_iter().map(|c| view! { <option value=c.as_str()>{c.label()}</option> }).collect_view()}
                </select>
            </label>

            <label class="form-field">
                <span>"Subcategory (optional)"</span>
                <input
                    type="text"
                    prop:value=move || form.get().subcategory.unwrap_or_default()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.subcategory = (!value.trim().is_empty()).then_some(value));
                    }
                />
            </label>

            {text_field("Name", |f| f.name.clone(), |f, v| f.name = v)}
            {text_field("Details", |f| f.details.clone(), |f, v| f.details = v)}
            {text_field("Location (maps link)", |f| f.location.clone(), |f, v| f.location = v)}

            <div class="button-row">
                <button type="submit" class="primary-btn">
                    {move || if editing_id.get().is_some() { "Save changes" } else { "Add entry" }}
                </button>
                <Show when=move || editing_id.get().is_some()>
                    <button type="button" class="secondary-btn" on:click=move |_| reset()>"Cancel"</button>
                </Show>
            </div>
            {move || status.get().map(|s| match s {
                Ok(msg) => view! { <p class="form-success">{msg}</p> }.into_any(),
                Err(e) => view! { <p class="form-error">{e}</p> }.into_any(),
            })}
        </form>
    }
}

/// Find any item (seeded or custom) to load it into the form
#[component]
pub fn AdminSearch(form: RwSignal<AdminForm>, editing_id: RwSignal<Option<String>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (city, set_city) = signal(None::<String>);
    let (category, set_category) = signal(None::<Category>);
    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(Vec::<TravelItem>::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let (city, category, query) = (city.get(), category.get(), query.get());
        spawn_local(async move {
            if let Ok(found) = commands::admin_search(city.as_deref(), category, &query).await {
                let _ = set_results.try_set(found);
            }
        });
    });

    view! {
        <div class="admin-section admin-search">
            <h3>"Find entries"</h3>
            <div class="filter-row">
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
                <select on:change=move |ev| set_category.set(Category::parse(&event_target_value(&ev)))>
                    <option value="">"All categories"</option>
                    {Category::ALL.into_iter().map(|c| view! { <option value=c.as_str()>{c.label()}</option> }).collect_view()}
                </select>
                <input
                    type="search"
                    placeholder="Search…"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
            </div>
            <ul class="admin-results">
                <For
                    each=move || results.get()
                    key=|item| (item.id.clone(), item.updated_at.clone())
                    children=move |item| {
                        let label = format!("{} · {} · {}", item.name, item.city, item.category.label());
                        let is_custom = item.is_admin_added;
                        let id = item.id.clone();
                        // Load the stored row so the form never edits a stale result
                        let on_edit = move |_| {
                            let id = id.clone();
                            spawn_local(async move {
                                match commands::get_item(&id).await {
                                    Ok(Some(fresh)) => {
                                        let _ = form.try_set(AdminForm::from_item(&fresh));
                                        let _ = editing_id.try_set(Some(fresh.id));
                                    }
                                    Ok(None) => store_set_error(&store, "That entry no longer exists"),
                                    Err(e) => store_set_error(&store, e),
                                }
                            });
                        };
                        view! {
                            <li class="admin-result">
                                <span>{label}</span>
                                {is_custom.then(|| view! { <span class="custom-badge">"custom"</span> })}
                                <button class="secondary-btn" on:click=on_edit>"Edit"</button>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
