//! Sector drilldown from a treemap cell click

use heatmap_client::{Debouncer, HeatmapLoader, HeatmapView, HttpTransport, Scheduler};
use heatmap_core::{FilterParams, TreemapNode};
use heatmap_state::FilterState;

/// Select the clicked node's sector and return the `{index, sector}` reload
/// parameters, or `None` when the node has no sector.
///
/// A pending debounced reload is cancelled so its older filters cannot land
/// after the drilldown.
pub fn drilldown_params<S: Scheduler>(
    filters: &FilterState,
    pending: &Debouncer<FilterParams, S>,
    node: &TreemapNode,
) -> Option<FilterParams> {
    let sector = node.drilldown_sector()?;
    pending.cancel();
    filters.select_sector(sector);
    Some(filters.index_sector())
}

/// Drill into the clicked sector and reload; returns whether a reload started
pub fn handle_sector_click<T, V, S>(
    loader: &HeatmapLoader<T, V>,
    filters: &FilterState,
    pending: &Debouncer<FilterParams, S>,
    node: &TreemapNode,
) -> bool
where
    T: HttpTransport + Clone + 'static,
    V: HeatmapView + Clone + 'static,
    S: Scheduler,
{
    match drilldown_params(filters, pending, node) {
        Some(params) => {
            tracing::info!("Drilling down: {}", params.query_string());
            loader.spawn_refresh(params);
            true
        }
        None => false,
    }
}
