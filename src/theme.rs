//! Theme and connectivity helpers touching the document directly

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::models::Theme;

fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|win| win.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Resolve `Auto` against the system preference
pub fn is_dark(theme: Theme) -> bool {
    match theme {
        Theme::Light => false,
        Theme::Dark => true,
        Theme::Auto => prefers_dark(),
    }
}

/// Toggle the `dark` class on `<html>`
pub fn apply_theme(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.document_element())
    else {
        return;
    };
    let classes = root.class_list();
    let _ = if is_dark(theme) {
        classes.add_1("dark")
    } else {
        classes.remove_1("dark")
    };
}

/// Signal tracking `navigator.onLine`, updated by online/offline events
pub fn online_signal() -> ReadSignal<bool> {
    let initial = web_sys::window()
        .map(|win| win.navigator().on_line())
        .unwrap_or(true);
    let (online, set_online) = signal(initial);

    if let Some(win) = web_sys::window() {
        for (event, state) in [("online", true), ("offline", false)] {
            let cb = Closure::<dyn FnMut()>::new(move || set_online.set(state));
            let _ = win.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
            cb.forget();
        }
    }
    online
}
