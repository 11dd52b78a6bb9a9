use leptos::prelude::*;

use crate::models::{FilterChip, FilterChipKind};

/// Removable chips for every non-default filter, plus "Clear all"
#[component]
pub fn ActiveFilters(
    #[prop(into)] chips: Signal<Vec<FilterChip>>,
    #[prop(into)] on_remove: Callback<FilterChipKind>,
    #[prop(into)] on_clear_all: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || !chips.get().is_empty()>
            <div class="active-filters">
                <For
                    each=move || chips.get()
                    key=|chip| chip.label.clone()
                    children=move |chip| {
                        let kind = chip.kind;
                        view! {
                            <span class="filter-chip">
                                {chip.label}
                                <button class="chip-remove" title="Remove filter" on:click=move |_| on_remove.run(kind)>"×"</button>
                            </span>
                        }
                    }
                />
                <button class="clear-filters" on:click=move |_| on_clear_all.run(())>"Clear all"</button>
            </div>
        </Show>
    }
}
