//! Loading spinner and error banner

use heatmap_state::use_app_state;
use leptos::prelude::*;

#[component]
pub fn StatusBanner() -> impl IntoView {
    let state = use_app_state();
    let loading = state.loading;
    let error = state.error;

    view! {
        <div class="status-banner">
            <div
                id="loading-spinner"
                class="loading-spinner"
                role="status"
                hidden=move || !loading.get()
            >
                <span class="spinner-ring"></span>
                <span class="spinner-label">"Loading…"</span>
            </div>

            <div
                id="error-message"
                class="error-message"
                role="alert"
                hidden=move || error.with(|e| e.is_none())
            >
                {move || error.get().unwrap_or_default()}
            </div>
        </div>
    }
}
