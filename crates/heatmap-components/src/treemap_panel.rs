//! Treemap panel with hover tooltip, bottom-sheet modal and drilldown

use crate::{handle_sector_click, ReloadDebouncer};
use heatmap_charts::{CellEvent, ChartDimensions, Treemap};
use heatmap_client::use_heatmap_loader;
use heatmap_core::{modal_html, tooltip_html};
use heatmap_state::{use_app_state, CellAction, TooltipState};
use leptos::{html, prelude::*};

#[component]
pub fn TreemapPanel(reload: ReloadDebouncer) -> impl IntoView {
    let state = use_app_state();
    let loader = use_heatmap_loader();
    let container = NodeRef::<html::Div>::new();

    // Re-measure on mount and whenever the viewport changes size
    Effect::new(move |_| {
        let _ = state.ui.with(|ui| ui.viewport_width);
        if let Some(el) = container.get() {
            state.set_container_width(el.client_width() as f64);
        }
    });

    let dimensions = Signal::derive(move || {
        ChartDimensions::for_container(state.ui.with(|ui| ui.container_width))
    });
    let nodes = Signal::derive(move || state.heatmap.nodes.get());

    let on_hover = Callback::new(move |ev: CellEvent| {
        if state.viewport().is_desktop() {
            state.show_tooltip(TooltipState::at_pointer(ev.node, ev.client_x, ev.client_y));
        }
    });

    let on_leave = Callback::new(move |_: ()| {
        if state.viewport().is_desktop() {
            state.hide_tooltip();
        }
    });

    let on_select = Callback::new(move |ev: CellEvent| {
        match CellAction::for_click(state.viewport(), &ev.node) {
            CellAction::Drilldown(_) => {
                state.hide_tooltip();
                reload.with_value(|pending| {
                    handle_sector_click(&loader, &state.filters, pending, &ev.node)
                });
            }
            CellAction::ShowModal => state.show_modal(ev.node),
        }
    });

    let empty_note = move || {
        let note = state.heatmap.note.get();
        (state.heatmap.is_empty() && !state.is_loading())
            .then(|| note)
            .flatten()
            .map(|n| view! { <p class="treemap-note">{n}</p> })
    };

    view! {
        <div class="panel treemap-panel card">
            <div id="treemap" class="treemap" node_ref=container>
                <Treemap
                    nodes=nodes
                    dimensions=dimensions
                    on_hover=on_hover
                    on_leave=on_leave
                    on_select=on_select
                />
            </div>
            {empty_note}
        </div>
        <TreemapTooltip />
        <TreemapModal />
    }
}

/// Floating tooltip for the hovered cell
#[component]
pub fn TreemapTooltip() -> impl IntoView {
    let state = use_app_state();

    move || {
        state.ui.with(|ui| ui.tooltip.clone()).map(|tip| {
            view! {
                <div
                    class="treemap-tooltip"
                    style=format!("position: fixed; left: {}px; top: {}px;", tip.left, tip.top)
                    inner_html=tooltip_html(&tip.node)
                ></div>
            }
        })
    }
}

/// Bottom-sheet detail modal; any click closes it
#[component]
pub fn TreemapModal() -> impl IntoView {
    let state = use_app_state();

    move || {
        state.ui.with(|ui| ui.modal.clone()).map(|node| {
            view! {
                <div
                    class="treemap-modal"
                    role="dialog"
                    on:click=move |_| state.hide_modal()
                    inner_html=modal_html(&node)
                ></div>
            }
        })
    }
}
