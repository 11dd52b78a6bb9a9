//! Sortable List
//!
//! Item cards wrapped as drag rows. Dragging is only armed when the page
//! allows manual reordering; the drop itself is handled by the page.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::ItemCard;
use crate::models::TravelItem;

#[component]
pub fn SortableList(
    #[prop(into)] items: Signal<Vec<TravelItem>>,
    dnd: DndSignals,
    #[prop(into)] can_reorder: Signal<bool>,
    expanded: ReadSignal<Option<String>>,
    set_expanded: WriteSignal<Option<String>>,
    #[prop(into)] on_changed: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="item-list" class:reorderable=move || can_reorder.get()>
            <For
                each=move || items.get()
                // updated_at changes on every write, so edited rows re-render
                key=|item| (item.id.clone(), item.updated_at.clone())
                children=move |item| {
                    let id = item.id.clone();
                    let on_mousedown = make_on_mousedown(dnd, id.clone());
                    let on_mouseenter = make_on_item_mouseenter(dnd, id.clone());
                    let on_mouseleave = make_on_mouseleave(dnd);

                    let row_class = {
                        let id = id.clone();
                        move || {
                            let mut c = String::from("sortable-row");
                            if dnd.is_dragging(&id) { c.push_str(" dragging"); }
                            if dnd.is_drop_target(&id) { c.push_str(" drop-target"); }
                            c
                        }
                    };

                    view! {
                        <div
                            class=row_class
                            on:mousedown=move |ev| {
                                if can_reorder.get_untracked() {
                                    on_mousedown(ev);
                                }
                            }
                            on:mouseenter=on_mouseenter
                            on:mouseleave=on_mouseleave
                        >
                            <Show when=move || can_reorder.get()>
                                <span class="drag-handle" title="Drag to reorder">"⠿"</span>
                            </Show>
                            <ItemCard
                                item=item.clone()
                                expanded=expanded
                                set_expanded=set_expanded
                                on_changed=on_changed
                            />
                        </div>
                    }
                }
            />
        </div>
    }
}
