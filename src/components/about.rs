use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

/// Static help screen
#[component]
pub fn AboutPage() -> impl IntoView {
    let store = use_app_store();

    view! {
        <section class="about">
            <h2>"About"</h2>
            <p>
                "Travel Checklist keeps places to visit, shops and food spots for each city "
                "on this device. Nothing needs a connection once the data is imported."
            </p>
            <ul>
                <li>"Tap the circle on an item to mark it visited, purchased or tasted."</li>
                <li>"Mark must-do items, rate them and keep notes."</li>
                <li>"Pin favourites to the top; drag rows to reorder when sorting manually."</li>
                <li>"Admins can add entries, re-import the spreadsheet and export everything."</li>
            </ul>
            <p class="sync-note">
                {move || {
                    let count = store.sync_status().get().map(|s| s.item_count).unwrap_or(0);
                    format!("{} items across {} cities", count, store.cities().get().len())
                }}
            </p>
            <p class="version">{concat!("Version ", env!("CARGO_PKG_VERSION"))}</p>
        </section>
    }
}
