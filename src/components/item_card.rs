//! Item Card
//!
//! One checklist row: status toggle, name and badges, with an expandable
//! body holding details, priority, rating, notes and the maps link.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{PriorityBadge, PriorityButtons, StarRating, UserNotes};
use crate::models::{Priority, TravelItem};
use crate::store::{store_set_error, use_app_store};

/// Link opened for an item's location: URLs as-is, anything else as a maps search
pub fn maps_url(location: &str) -> Option<String> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }
    if location.starts_with("http://") || location.starts_with("https://") {
        return Some(location.to_string());
    }
    let query: String = js_sys::encode_uri_component(location).into();
    Some(format!("https://www.google.com/maps/search/?api=1&query={}", query))
}

#[component]
pub fn ItemCard(
    item: TravelItem,
    expanded: ReadSignal<Option<String>>,
    set_expanded: WriteSignal<Option<String>>,
    /// Called after any change that affects ordering or counts
    #[prop(into)] on_changed: Callback<()>,
) -> impl IntoView {
    let store = use_app_store();
    let id = item.id.clone();

    // After a mutating command: refetch on success, banner on failure
    let finish = move |result: Result<TravelItem, String>| match result {
        Ok(_) => on_changed.run(()),
        Err(e) => store_set_error(&store, e),
    };

    let is_open = {
        let id = id.clone();
        move || expanded.get().as_deref() == Some(id.as_str())
    };

    let on_toggle_status = {
        let id = id.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.stop_propagation();
            let id = id.clone();
            spawn_local(async move { finish(commands::toggle_status(&id).await) });
        }
    };

    let on_toggle_pin = {
        let id = id.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.stop_propagation();
            let id = id.clone();
            spawn_local(async move { finish(commands::toggle_pinned(&id).await) });
        }
    };

    let on_priority = {
        let id = id.clone();
        Callback::new(move |pressed: Priority| {
            let id = id.clone();
            spawn_local(async move { finish(commands::set_priority(&id, Some(pressed)).await) });
        })
    };

    let on_rating = {
        let id = id.clone();
        Callback::new(move |rating: Option<u8>| {
            let id = id.clone();
            spawn_local(async move { finish(commands::set_rating(&id, rating).await) });
        })
    };

    let on_header_click = {
        let id = id.clone();
        let is_open = is_open.clone();
        move |_| {
            if is_open() {
                set_expanded.set(None);
            } else {
                set_expanded.set(Some(id.clone()));
            }
        }
    };

    let completed = item.is_completed();
    let done_label = item.category.done_label();
    let priority = item.priority;
    let rating = item.rating;
    let has_notes = !item.user_notes.trim().is_empty();
    let details = item.details.clone();
    let notes = item.user_notes.clone();
    let link = maps_url(&item.location);
    let card_class = format!(
        "item-card{}{}",
        if completed { " completed" } else { "" },
        if item.is_pinned { " pinned" } else { "" }
    );

    view! {
        <div class=card_class>
            <div class="item-header" on:click=on_header_click>
                <button
                    class=if completed { "status-toggle done" } else { "status-toggle" }
                    title=if completed { "Mark as pending".to_string() } else { format!("Mark as {}", done_label.to_lowercase()) }
                    on:click=on_toggle_status
                >
                    {if completed { "✓" } else { "" }}
                </button>
                <span class="item-name">{item.name.clone()}</span>
                <PriorityBadge priority=priority />
                {rating.map(|r| view! { <span class="rating-mini">{format!("★{}", r)}</span> })}
                {has_notes.then(|| view! { <span class="notes-mark" title="Has notes">"📝"</span> })}
                <button
                    class=if item.is_pinned { "pin-btn active" } else { "pin-btn" }
                    title=if item.is_pinned { "Unpin" } else { "Pin to top" }
                    on:click=on_toggle_pin
                >
                    "📌"
                </button>
            </div>
            <Show when=is_open>
                <div class="item-body">
                    {(!details.is_empty()).then(|| view! { <p class="item-details">{details.clone()}</p> })}
                    <div class="item-controls">
                        <PriorityButtons priority=priority on_press=on_priority />
                        <StarRating rating=rating on_change=on_rating />
                    </div>
                    <UserNotes item_id=id.clone() notes=notes.clone() />
                    {link.clone().map(|url| view! {
                        <button
                            class="maps-link"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                let url = url.clone();
                                spawn_local(async move {
                                    if let Err(e) = commands::open_external(&url).await {
                                        store_set_error(&store, e);
                                    }
                                });
                            }
                        >
                            "📍 Open in Maps"
                        </button>
                    })}
                </div>
            </Show>
        </div>
    }
}
