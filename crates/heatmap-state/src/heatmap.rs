//! Reactive heatmap data and filter state

use heatmap_core::{parse_trade_date, FilterParams, TreemapNode, DEFAULT_INDICES, DEFAULT_SECTORS};
use leptos::prelude::*;

/// Current filter selections.
///
/// Each control writes its own signal; loads read a snapshot through
/// [`FilterState::params`].
#[derive(Clone, Copy)]
pub struct FilterState {
    pub index: RwSignal<String>,
    pub sector: RwSignal<String>,
    pub date: RwSignal<String>,
    pub category: RwSignal<String>,
    /// Options offered by the index dropdown
    pub index_options: RwSignal<Vec<String>>,
    /// Options offered by the sector dropdown
    pub sector_options: RwSignal<Vec<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        let indices: Vec<String> = DEFAULT_INDICES.iter().map(|s| s.to_string()).collect();
        let sectors: Vec<String> = DEFAULT_SECTORS.iter().map(|s| s.to_string()).collect();
        Self {
            index: RwSignal::new(indices.first().cloned().unwrap_or_default()),
            sector: RwSignal::new(sectors.first().cloned().unwrap_or_default()),
            date: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            index_options: RwSignal::new(indices),
            sector_options: RwSignal::new(sectors),
        }
    }

    /// Select an index, adding it to the dropdown options when missing
    pub fn select_index(&self, index: &str) {
        offer(self.index_options, index);
        self.index.set(index.to_string());
    }

    /// Select a sector, adding it to the dropdown options when missing
    pub fn select_sector(&self, sector: &str) {
        offer(self.sector_options, sector);
        self.sector.set(sector.to_string());
    }

    /// Set the date filter; anything but a valid `YYYY-MM-DD` clears it
    pub fn set_date(&self, value: &str) {
        let date = parse_trade_date(value).map(|_| value.to_string()).unwrap_or_default();
        self.date.set(date);
    }

    /// Index and sector selection, the pair sent on dropdown changes
    pub fn index_sector(&self) -> FilterParams {
        FilterParams {
            index: Some(self.index.get_untracked()),
            sector: Some(self.sector.get_untracked()),
            ..Default::default()
        }
    }

    /// Full snapshot of all filters
    pub fn params(&self) -> FilterParams {
        FilterParams {
            category: Some(self.category.get_untracked()),
            date: Some(self.date.get_untracked()),
            ..self.index_sector()
        }
    }
}

fn offer(options: RwSignal<Vec<String>>, value: &str) {
    options.update(|opts| {
        if !opts.iter().any(|o| o == value) {
            opts.push(value.to_string());
        }
    });
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

/// Rendered heatmap data
#[derive(Clone, Copy)]
pub struct HeatmapState {
    /// Nodes currently drawn by the treemap
    pub nodes: RwSignal<Vec<TreemapNode>>,
    /// Note attached to the last response (e.g. "No data available")
    pub note: RwSignal<Option<String>>,
    /// Ticket of the load whose result is on screen
    pub rendered_ticket: RwSignal<u64>,
}

impl HeatmapState {
    pub fn new() -> Self {
        Self {
            nodes: RwSignal::new(Vec::new()),
            note: RwSignal::new(None),
            rendered_ticket: RwSignal::new(0),
        }
    }

    /// Replace the rendered nodes
    pub fn render(&self, ticket: u64, nodes: Vec<TreemapNode>, note: Option<String>) {
        tracing::debug!(ticket, nodes = nodes.len(), "rendering heatmap");
        self.rendered_ticket.set(ticket);
        self.note.set(note);
        self.nodes.set(nodes);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.with(|n| n.is_empty())
    }

}

impl Default for HeatmapState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let filters = FilterState::new();
        assert_eq!(
            filters.index_sector(),
            FilterParams::new().index("NIFTY50").sector("FINANCE")
        );
    }

    #[test]
    fn test_params_skip_empty_filters() {
        let filters = FilterState::new();
        assert_eq!(filters.params().query_string(), "index=NIFTY50&sector=FINANCE");

        filters.set_date("2024-04-01");
        filters.category.set("LARGE_CAP".into());
        assert_eq!(
            filters.params().query_string(),
            "category=LARGE_CAP&index=NIFTY50&sector=FINANCE&date=2024-04-01"
        );
    }

    #[test]
    fn test_invalid_date_clears_filter() {
        let filters = FilterState::new();
        filters.set_date("2024-04-01");
        filters.set_date("not-a-date");
        assert_eq!(filters.date.get_untracked(), "");
    }

    #[test]
    fn test_select_index_offers_it_in_dropdown() {
        let filters = FilterState::new();
        filters.select_index("NIFTYIT");
        filters.select_index("NIFTYBANK");
        filters.select_index("NIFTYIT");
        assert_eq!(filters.index.get_untracked(), "NIFTYIT");
        assert_eq!(
            filters.index_options.get_untracked(),
            vec!["NIFTY50".to_string(), "NIFTYBANK".to_string(), "NIFTYIT".to_string()]
        );
    }

    #[test]
    fn test_select_sector_keeps_known_options() {
        let filters = FilterState::new();
        filters.select_sector("IT");
        assert_eq!(filters.sector.get_untracked(), "IT");
        assert_eq!(filters.sector_options.get_untracked().len(), 2);
    }

    #[test]
    fn test_render_replaces_nodes() {
        let heatmap = HeatmapState::new();
        heatmap.render(1, vec![TreemapNode::new("A", "A", 1.0)], None);
        heatmap.render(2, vec![], Some("No data available".into()));
        assert_eq!(heatmap.nodes.with_untracked(|n| n.len()), 0);
        assert_eq!(heatmap.rendered_ticket.get_untracked(), 2);
    }
}
