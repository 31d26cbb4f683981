//! Filter controls: index selector, dropdowns, date picker

use crate::ReloadDebouncer;
use heatmap_core::{index_label, SELECTOR_INDICES};
use heatmap_state::use_app_state;
use leptos::{html, prelude::*};
use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit};

/// DOM event fired on `#index-selector` when a segment is clicked
pub const INDEX_CHANGE_EVENT: &str = "indexchange";

fn dispatch_index_change(target: &web_sys::HtmlDivElement, index: &str) {
    let init = CustomEventInit::new();
    init.set_detail(&JsValue::from_str(index));
    let dispatched = CustomEvent::new_with_event_init_dict(INDEX_CHANGE_EVENT, &init)
        .and_then(|event| target.dispatch_event(&event));
    if let Err(e) = dispatched {
        tracing::warn!("Failed to dispatch {}: {:?}", INDEX_CHANGE_EVENT, e);
    }
}

// ============================================================================
// INDEX SELECTOR
// ============================================================================

/// Segmented control over the headline indices
#[component]
pub fn IndexSelector(
    reload: ReloadDebouncer,
    #[prop(optional)] indices: Option<Vec<String>>,
) -> impl IntoView {
    let filters = use_app_state().filters;
    let indices = indices
        .unwrap_or_else(|| SELECTOR_INDICES.iter().map(|s| s.to_string()).collect());
    let container = NodeRef::<html::Div>::new();

    let buttons = indices
        .into_iter()
        .map(|index| {
            let label = index_label(&index);
            let active_index = index.clone();
            let data_index = index.clone();
            let on_click = move |_| {
                filters.select_index(&index);
                if let Some(el) = container.get() {
                    dispatch_index_change(&el, &index);
                }
                reload.with_value(|d| d.call(filters.params()));
            };

            view! {
                <button
                    type="button"
                    data-index=data_index
                    class:active=move || filters.index.get() == active_index
                    on:click=on_click
                >
                    {label}
                </button>
            }
        })
        .collect_view();

    view! {
        <div id="index-selector" class="index-selector" node_ref=container>
            {buttons}
        </div>
    }
}

// ============================================================================
// DROPDOWN FILTERS
// ============================================================================

/// Index and sector `<select>` controls; changes reload with `{index, sector}`
#[component]
pub fn DropdownFilters(reload: ReloadDebouncer) -> impl IntoView {
    let filters = use_app_state().filters;

    let options = move |signal: RwSignal<Vec<String>>, selected: RwSignal<String>| {
        move || {
            signal
                .get()
                .into_iter()
                .map(|opt| {
                    let value = opt.clone();
                    let is_selected = opt.clone();
                    view! {
                        <option value=value selected=move || selected.get() == is_selected>
                            {opt}
                        </option>
                    }
                })
                .collect_view()
        }
    };

    view! {
        <div class="dropdown-filters">
            <label class="filter-label" for="index-dropdown">"Index"</label>
            <select
                id="index-dropdown"
                prop:value=move || filters.index.get()
                on:change=move |ev| {
                    filters.index.set(event_target_value(&ev));
                    reload.with_value(|d| d.call(filters.index_sector()));
                }
            >
                {options(filters.index_options, filters.index)}
            </select>

            <label class="filter-label" for="sector-dropdown">"Sector"</label>
            <select
                id="sector-dropdown"
                prop:value=move || filters.sector.get()
                on:change=move |ev| {
                    filters.sector.set(event_target_value(&ev));
                    reload.with_value(|d| d.call(filters.index_sector()));
                }
            >
                {options(filters.sector_options, filters.sector)}
            </select>
        </div>
    }
}

// ============================================================================
// DATE PICKER
// ============================================================================

#[component]
pub fn DatePicker(reload: ReloadDebouncer) -> impl IntoView {
    let filters = use_app_state().filters;
    let focused = RwSignal::new(false);

    view! {
        <input
            type="date"
            id="datepicker"
            class="datepicker"
            class:focus=move || focused.get()
            prop:value=move || filters.date.get()
            on:focus=move |_| focused.set(true)
            on:blur=move |_| focused.set(false)
            on:change=move |ev| {
                filters.set_date(&event_target_value(&ev));
                reload.with_value(|d| d.call(filters.params()));
            }
        />
    }
}
