//! Market Heatmap Dashboard - WASM entry point

use heatmap_client::provide_heatmap_loader;
use heatmap_components::{Dashboard, APP_TITLE};
use heatmap_state::provide_app_state;
use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use tracing_wasm::WASMLayerConfigBuilder;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_wasm::set_as_global_default_with_config(
        WASMLayerConfigBuilder::new().set_max_level(level).build(),
    );

    tracing::info!("Starting Market Heatmap Dashboard");
    leptos::mount::mount_to_body(App);
}

#[component]
fn App() -> impl IntoView {
    provide_meta_context();
    let state = provide_app_state();
    provide_heatmap_loader(state);

    view! {
        <Title text=APP_TITLE />
        <Dashboard test_load=cfg!(debug_assertions) />
    }
}
