//! Treemap node model and API-record mapping

use crate::{color_for_change, HeatmapPayload, StockRecord};
use serde::{Deserialize, Serialize};

/// Quote figures carried alongside a node for tooltips
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteDetails {
    pub price: Option<f64>,
    pub volume: Option<f64>,
    pub pe: Option<f64>,
    pub market_cap: Option<f64>,
}

/// One leaf of the heatmap treemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapNode {
    pub name: String,
    pub symbol: String,
    /// Sizing metric, always > 0 for mapped nodes
    pub value: f64,
    pub change: Option<f64>,
    pub sector: Option<String>,
    #[serde(default)]
    pub details: QuoteDetails,
}

impl TreemapNode {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            value,
            change: None,
            sector: None,
            details: QuoteDetails::default(),
        }
    }

    pub fn with_change(mut self, change: f64) -> Self {
        self.change = Some(change);
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_details(mut self, details: QuoteDetails) -> Self {
        self.details = details;
        self
    }

    /// Identifier shown on the cell: symbol, or name when the symbol is empty
    pub fn label(&self) -> &str {
        if self.symbol.is_empty() {
            &self.name
        } else {
            &self.symbol
        }
    }

    /// Sector for drilldown, ignoring empty strings
    pub fn drilldown_sector(&self) -> Option<&str> {
        self.sector.as_deref().filter(|s| !s.is_empty())
    }

    pub fn color(&self) -> &'static str {
        color_for_change(self.change)
    }
}

/// Treemap sizing metric: log10 of a finite positive market cap, else 0
pub fn size_for_market_cap(market_cap: Option<f64>) -> f64 {
    match market_cap {
        Some(cap) if cap.is_finite() && cap > 0.0 => cap.log10(),
        _ => 0.0,
    }
}

/// Map one record to a node (the node may have a non-positive value)
pub fn map_record(record: &StockRecord) -> TreemapNode {
    let market_cap = record.resolved_market_cap();
    TreemapNode {
        name: record.name.clone(),
        symbol: record.symbol.clone(),
        value: size_for_market_cap(market_cap),
        change: record.change,
        sector: record.sector.clone(),
        details: QuoteDetails {
            price: record.price,
            volume: record.volume,
            pe: record.pe,
            market_cap,
        },
    }
}

/// Map API records to treemap nodes, dropping entries with `value <= 0`.
/// Input order is preserved.
pub fn map_records(records: &[StockRecord]) -> Vec<TreemapNode> {
    records
        .iter()
        .map(map_record)
        .filter(|node| node.value > 0.0)
        .collect()
}

/// Map whatever payload shape the API returned
pub fn map_payload(payload: &HeatmapPayload) -> Vec<TreemapNode> {
    map_records(payload.records())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<StockRecord> {
        vec![
            StockRecord::new("HDFCBANK", "HDFC Bank")
                .with_market_cap(1e12)
                .with_change(1.2)
                .with_sector("FINANCE"),
            StockRecord::new("ZERO", "Zero Cap").with_market_cap(0.0),
            StockRecord::new("NEG", "Negative Cap").with_market_cap(-5.0),
            StockRecord::new("NONE", "Missing Cap"),
            StockRecord::new("ONE", "Unit Cap").with_market_cap(1.0),
            StockRecord::new("TCS", "Tata Consultancy")
                .with_market_cap(1e6)
                .with_sector("IT"),
        ]
    }

    #[test]
    fn test_mapper_drops_non_positive_values() {
        let nodes = map_records(&sample());
        let symbols: Vec<_> = nodes.iter().map(|n| n.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["HDFCBANK", "TCS"]);
        assert!(nodes.iter().all(|n| n.value > 0.0));
    }

    #[test]
    fn test_mapper_copies_fields() {
        let nodes = map_records(&sample());
        assert_eq!(nodes[0].name, "HDFC Bank");
        assert_eq!(nodes[0].change, Some(1.2));
        assert_eq!(nodes[0].sector.as_deref(), Some("FINANCE"));
        assert!((nodes[0].value - 12.0).abs() < 1e-9);
        assert!((nodes[1].value - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_mapper_is_idempotent() {
        let records = sample();
        assert_eq!(map_records(&records), map_records(&records));
    }

    #[test]
    fn test_non_array_payload_maps_to_nothing() {
        let payload: HeatmapPayload = serde_json::from_str("42").unwrap();
        assert!(map_payload(&payload).is_empty());
    }

    #[test]
    fn test_malformed_record_drops_alone() {
        let payload: HeatmapPayload = serde_json::from_str(
            r#"[
                {"symbol":"TCS","name":"Tata Consultancy","market_cap":1e12},
                {"symbol":"WIPRO","name":"Wipro","market_cap":"2e11","change":"n/a"},
                {"symbol":"INFY","name":null,"market_cap":1e10,"pe":"N/A"}
            ]"#,
        )
        .unwrap();
        let nodes = map_payload(&payload);
        let symbols: Vec<_> = nodes.iter().map(|n| n.label()).collect();
        assert_eq!(symbols, vec!["TCS", "INFY"]);
        assert_eq!(nodes[1].name, "");
        assert!((nodes[1].value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_size_for_market_cap() {
        assert_eq!(size_for_market_cap(Some(f64::INFINITY)), 0.0);
        assert_eq!(size_for_market_cap(Some(f64::NAN)), 0.0);
        assert_eq!(size_for_market_cap(None), 0.0);
        assert!((size_for_market_cap(Some(1000.0)) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_node_label_falls_back_to_name() {
        let node = TreemapNode::new("Infosys", "", 5.0);
        assert_eq!(node.label(), "Infosys");
        assert_eq!(node.drilldown_sector(), None);
    }
}
