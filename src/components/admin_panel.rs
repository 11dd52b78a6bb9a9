//! Admin Page
//!
//! PIN gate, then the entry form, item finder, data tools and PIN change.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{AdminItemForm, AdminSearch};
use crate::context::{use_app_context, Page};
use crate::models::{AdminForm, MergeStrategy};
use crate::store::{store_set_error, use_app_store, AppStateStoreFields};

#[component]
pub fn AdminPage() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <section class="admin">
            <Show
                when=move || ctx.admin_unlocked.get()
                fallback=|| view! { <PinGate /> }
            >
                <AdminTools />
            </Show>
        </section>
    }
}

#[component]
fn PinGate() -> impl IntoView {
    let ctx = use_app_context();
    let (pin, set_pin) = signal(String::new());
    let (failed, set_failed) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let value = pin.get_untracked();
        spawn_local(async move {
            match commands::verify_admin_pin(&value).await {
                Ok(true) => ctx.unlock_admin(),
                Ok(false) | Err(_) => {
                    set_failed.set(true);
                    set_pin.set(String::new());
                }
            }
        });
    };

    view! {
        <form class="pin-gate" on:submit=on_submit>
            <h2>"Admin"</h2>
            <p>"Enter the admin PIN to manage entries."</p>
            <input
                type="password"
                inputmode="numeric"
                class="pin-input"
                maxlength="8"
                placeholder="PIN"
                prop:value=move || pin.get()
                on:input=move |ev| {
                    set_failed.set(false);
                    set_pin.set(event_target_value(&ev));
                }
            />
            <button type="submit" class="primary-btn">"Unlock"</button>
            <Show when=move || failed.get()>
                <p class="form-error">"Incorrect PIN"</p>
            </Show>
        </form>
    }
}

#[component]
fn AdminTools() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(AdminForm::default());
    let editing_id = RwSignal::new(None::<String>);

    view! {
        <div class="admin-header">
            <h2>"Admin"</h2>
            <button class="secondary-btn" on:click=move |_| ctx.navigate(Page::Manage)>"Custom entries"</button>
            <button class="secondary-btn" on:click=move |_| {
                ctx.lock_admin();
                ctx.navigate(Page::Home);
            }>"Lock"</button>
        </div>
        <AdminItemForm form=form editing_id=editing_id />
        <AdminSearch form=form editing_id=editing_id />
        <DataTools />
        <ChangePin />
    }
}

/// Export and re-import of the spreadsheet
#[component]
fn DataTools() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (message, set_message) = signal(None::<String>);
    let (busy, set_busy) = signal(false);
    let (confirm_replace, set_confirm_replace) = signal(false);

    let on_export = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            match commands::export_spreadsheet().await {
                Ok(path) => set_message.set(Some(format!("Exported to {}", path))),
                Err(e) => store_set_error(&store, e),
            }
            set_busy.set(false);
        });
    };

    let reimport = move |strategy: MergeStrategy| {
        set_busy.set(true);
        set_confirm_replace.set(false);
        spawn_local(async move {
            match commands::reimport_data(strategy).await {
                Ok(report) => {
                    set_message.set(Some(format!(
                        "Imported {} items ({} matched existing entries)",
                        report.item_count, report.merged
                    )));
                    ctx.reload();
                }
                Err(e) => store_set_error(&store, e),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="admin-section">
            <h3>"Data"</h3>
            <p class="sync-note">
                {move || store.settings().get().last_sync
                    .map(|t| format!("Last import: {}", t))
                    .unwrap_or_else(|| "Not imported yet".to_string())}
            </p>
            <div class="button-row">
                <button class="primary-btn" disabled=move || busy.get() on:click=on_export>"Export spreadsheet"</button>
                <button class="secondary-btn" disabled=move || busy.get() on:click=move |_| reimport(MergeStrategy::KeepUserData)>
                    "Re-import (keep my progress)"
                </button>
                <Show
                    when=move || confirm_replace.get()
                    fallback=move || view! {
                        <button class="danger-btn" disabled=move || busy.get() on:click=move |_| set_confirm_replace.set(true)>
                            "Re-import (reset all)"
                        </button>
                    }
                >
                    <span class="delete-confirm">
                        <span class="delete-confirm-text">"Reset progress and custom entries?"</span>
                        <button class="confirm-btn" on:click=move |_| reimport(MergeStrategy::ReplaceAll)>"✓"</button>
                        <button class="cancel-btn" on:click=move |_| set_confirm_replace.set(false)>"✗"</button>
                    </span>
                </Show>
            </div>
            {move || message.get().map(|m| view! { <p class="form-success">{m}</p> })}
        </div>
    }
}

#[component]
fn ChangePin() -> impl IntoView {
    let (current, set_current) = signal(String::new());
    let (new_pin, set_new_pin) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (result, set_result) = signal(None::<Result<(), String>>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (cur, next) = (current.get_untracked(), new_pin.get_untracked());
        if next != confirm.get_untracked() {
            set_result.set(Some(Err("New PINs do not match".to_string())));
            return;
        }
        spawn_local(async move {
            let outcome = commands::change_admin_pin(&cur, &next).await;
            if outcome.is_ok() {
                set_current.set(String::new());
                set_new_pin.set(String::new());
                set_confirm.set(String::new());
            }
            set_result.set(Some(outcome));
        });
    };

    let pin_input = move |value: ReadSignal<String>, set_value: WriteSignal<String>, placeholder: &'static str| {
        view! {
            <input
                type="password"
                inputmode="numeric"
                maxlength="8"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <form class="admin-section change-pin" on:submit=on_submit>
            <h3>"Change PIN"</h3>
            {pin_input(current, set_current, "Current PIN")}
            {pin_input(new_pin, set_new_pin, "New PIN (4-8 digits)")}
            {pin_input(confirm, set_confirm, "Repeat new PIN")}
            <button type="submit" class="secondary-btn">"Update PIN"</button>
            {move || result.get().map(|r| match r {
                Ok(()) => view! { <p class="form-success">"PIN updated"</p> }.into_any(),
                Err(e) => view! { <p class="form-error">{e}</p> }.into_any(),
            })}
        </form>
    }
}
