//! Priority controls
//!
//! `PriorityBadge` is the read-only marker in the row header,
//! `PriorityButtons` the Must / Optional pair in the expanded card.

use leptos::prelude::*;

use crate::models::Priority;

#[component]
pub fn PriorityBadge(priority: Option<Priority>) -> impl IntoView {
    priority.map(|p| {
        let (class, label) = match p {
            Priority::Must => ("priority-badge must", "Must"),
            Priority::Optional => ("priority-badge optional", "Optional"),
        };
        view! { <span class=class>{label}</span> }
    })
}

/// Pressing the active button clears the priority (handled by the backend)
#[component]
pub fn PriorityButtons(
    priority: Option<Priority>,
    #[prop(into)] on_press: Callback<Priority>,
) -> impl IntoView {
    let button = move |p: Priority, label: &'static str, class: &'static str| {
        let active = priority == Some(p);
        view! {
            <button
                class=format!("priority-btn {}{}", class, if active { " active" } else { "" })
                aria-pressed=active.to_string()
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_press.run(p);
                }
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="priority-buttons">
            {button(Priority::Must, "Must do", "must")}
            {button(Priority::Optional, "Optional", "optional")}
        </div>
    }
}
