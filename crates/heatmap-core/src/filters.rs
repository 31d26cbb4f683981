//! Filter parameters and query-string construction

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Path of the heatmap data endpoint
pub const HEATMAP_PATH: &str = "/api/heatmap-data";

/// Wire format of trading dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Heatmap query filters. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Present (non-empty) pairs in wire order: category, index, sector, date
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("category", self.category.as_deref()),
            ("index", self.index.as_deref()),
            ("sector", self.sector.as_deref()),
            ("date", self.date.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect()
    }

    /// Percent-encoded query string without the leading `?`
    pub fn query_string(&self) -> String {
        self.pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full request URL for the heatmap endpoint under `base`
    pub fn url(&self, base: &str) -> String {
        format!("{}{}?{}", base, HEATMAP_PATH, self.query_string())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}

/// Parse a strict `YYYY-MM-DD` trading date
pub fn parse_trade_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}
