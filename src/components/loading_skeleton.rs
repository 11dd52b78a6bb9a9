use leptos::prelude::*;

/// Placeholder rows shown while data loads
#[component]
pub fn LoadingSkeleton(#[prop(default = 3)] rows: usize) -> impl IntoView {
    view! {
        <div class="skeleton-list" aria-busy="true">
            {(0..rows).map(|_| view! {
                <div class="skeleton-row">
                    <div class="skeleton-line wide"></div>
                    <div class="skeleton-line"></div>
                </div>
            }).collect_view()}
        </div>
    }
}
