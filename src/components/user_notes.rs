//! User Notes
//!
//! Textarea that saves itself one second after the last keystroke.

use leptos::prelude::*;
use leptos::task::spawn_local;
use gloo_timers::future::TimeoutFuture;

use crate::commands;
use crate::models::MAX_NOTES_LEN;
use crate::store::{store_set_error, use_app_store};

const SAVE_DELAY_MS: u32 = 1000;

/// Cut `text` to the notes limit, counting characters rather than bytes
pub fn clamp_notes(text: &str) -> String {
    text.chars().take(MAX_NOTES_LEN).collect()
}

pub fn chars_left(text: &str) -> usize {
    MAX_NOTES_LEN.saturating_sub(text.chars().count())
}

#[component]
pub fn UserNotes(item_id: String, notes: String) -> impl IntoView {
    let store = use_app_store();
    let (text, set_text) = signal(notes.clone());
    let (saved, set_saved) = signal(notes);
    // Bumped on every edit; a pending save only runs if still current
    let (generation, set_generation) = signal(0u32);

    let on_input = move |ev: leptos::ev::Event| {
        let value = clamp_notes(&event_target_value(&ev));
        set_text.set(value);
        set_generation.update(|g| *g += 1);
        let current = generation.get_untracked();
        let item_id = item_id.clone();

        spawn_local(async move {
            TimeoutFuture::new(SAVE_DELAY_MS).await;
            // The card may have been re-rendered while waiting
            if generation.try_get_untracked() != Some(current) {
                return;
            }
            let Some(value) = text.try_get_untracked() else {
                return;
            };
            if saved.try_get_untracked().as_ref() == Some(&value) {
                return;
            }
            match commands::update_notes(&item_id, &value).await {
                Ok(_) => {
                    let _ = set_saved.try_set(value);
                }
                Err(e) => store_set_error(&store, e),
            }
        });
    };

    view! {
        <div class="user-notes">
            <textarea
                class="notes-input"
                placeholder="Add your notes…"
                maxlength=MAX_NOTES_LEN.to_string()
                prop:value=move || text.get()
                on:input=on_input
                on:mousedown=|ev| ev.stop_propagation()
            />
            <div class="notes-footer">
                <span class="notes-counter">{move || format!("{} chars left", chars_left(&text.get()))}</span>
                <Show when=move || text.get() != saved.get()>
                    <span class="notes-saving">"Saving…"</span>
                </Show>
            </div>
        </div>
    }
}
