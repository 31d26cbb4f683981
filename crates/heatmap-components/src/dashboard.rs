//! Main dashboard layout component

use crate::{DatePicker, DropdownFilters, IndexSelector, Navbar, StatusBanner, TreemapPanel};
use heatmap_charts::HeatmapLegend;
use heatmap_client::{use_heatmap_loader, Debouncer};
use heatmap_core::FilterParams;
use heatmap_state::{use_app_state, DEBOUNCE_MS};
use leptos::prelude::*;

fn window_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

#[component]
pub fn Dashboard(
    /// Render the `#test-load-btn` that loads with no filters
    #[prop(optional)]
    test_load: bool,
) -> impl IntoView {
    let state = use_app_state();
    let loader = use_heatmap_loader();

    if let Some(width) = window_width() {
        state.set_viewport_width(width);
    }
    let _resize = window_event_listener(leptos::ev::resize, move |_| {
        if let Some(width) = window_width() {
            state.set_viewport_width(width);
        }
    });

    let reload_loader = loader.clone();
    let reload = StoredValue::new_local(Debouncer::new(DEBOUNCE_MS, move |params: FilterParams| {
        reload_loader.spawn_refresh(params);
    }));

    // Initial load with the default index and sector
    loader.spawn_refresh(state.filters.index_sector());

    let test_button = test_load.then(|| {
        view! {
            <button
                id="test-load-btn"
                class="test-load-btn"
                type="button"
                on:click=move |_| loader.spawn_refresh(FilterParams::new())
            >
                "Load all"
            </button>
        }
    });

    view! {
        <div class=move || format!("dashboard {}", state.viewport().css_class())>
            <header class="dash-header">
                <Navbar />
            </header>

            <main class="dash-main">
                <section class="filter-bar">
                    <IndexSelector reload=reload />
                    <DropdownFilters reload=reload />
                    <DatePicker reload=reload />
                    {test_button}
                </section>

                <StatusBanner />
                <TreemapPanel reload=reload />
                <HeatmapLegend />
            </main>
        </div>
    }
}
