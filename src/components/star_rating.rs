use leptos::prelude::*;

use crate::models::rating_label;

/// Five-star rating; clicking the current rating clears it
#[component]
pub fn StarRating(
    rating: Option<u8>,
    #[prop(into)] on_change: Callback<Option<u8>>,
) -> impl IntoView {
    let (hover, set_hover) = signal(None::<u8>);
    let shown = move || hover.get().or(rating).unwrap_or(0);

    view! {
        <div class="star-rating" on:mouseleave=move |_| set_hover.set(None)>
            {(1..=5u8).map(|star| {
                view! {
                    <button
                        class=move || if star <= shown() { "star filled" } else { "star" }
                        title=rating_label(star)
                        on:mouseenter=move |_| set_hover.set(Some(star))
                        on:click=move |ev| {
                            ev.stop_propagation();
                            let next = if rating == Some(star) { None } else { Some(star) };
                            on_change.run(next);
                        }
                    >
                        "★"
                    </button>
                }
            }).collect_view()}
            <span class="rating-label">{move || rating_label(shown())}</span>
        </div>
    }
}
