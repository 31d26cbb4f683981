//! Colour legend for the heatmap change bands

use heatmap_core::ChangeBand;
use leptos::prelude::*;

#[component]
pub fn HeatmapLegend() -> impl IntoView {
    view! {
        <div class="heatmap-legend" data-testid="heatmap-legend">
            {ChangeBand::legend().iter().map(|band| {
                view! {
                    <div class="legend-item">
                        <span
                            class="legend-swatch"
                            style=format!("background-color: {}", band.color())
                        />
                        <span class="legend-label">{band.label()}</span>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
