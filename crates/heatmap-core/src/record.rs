//! API record and response payload shapes

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Lenient field decoders: a malformed field reads as missing

fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(d)?.as_f64())
}

fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// One stock quote as delivered by the heatmap API.
///
/// Every field is optional on the wire. Market capitalisation may arrive as
/// either `market_cap` or `marketCap`. Non-numeric numbers read as `None`
/// and non-string names as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(default, deserialize_with = "text")]
    pub symbol: String,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(
        default,
        rename = "marketCap",
        deserialize_with = "number",
        skip_serializing_if = "Option::is_none"
    )]
    pub market_cap_alt: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, deserialize_with = "number", skip_serializing_if = "Option::is_none")]
    pub pe: Option<f64>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

impl StockRecord {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_change(mut self, change: f64) -> Self {
        self.change = Some(change);
        self
    }

    pub fn with_market_cap(mut self, cap: f64) -> Self {
        self.market_cap = Some(cap);
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Resolved market cap: `market_cap` unless it is zero or NaN, then `marketCap`
    pub fn resolved_market_cap(&self) -> Option<f64> {
        self.market_cap
            .filter(|c| *c != 0.0 && !c.is_nan())
            .or(self.market_cap_alt)
    }
}

/// Envelope form of the heatmap response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatmapEnvelope {
    #[serde(default)]
    pub data: Vec<StockRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Heatmap response body: a bare array, an envelope, or anything else
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeatmapPayload {
    Records(Vec<StockRecord>),
    Envelope(HeatmapEnvelope),
    Other(serde_json::Value),
}

impl HeatmapPayload {
    /// Records carried by the payload; non-array shapes carry none
    pub fn records(&self) -> &[StockRecord] {
        match self {
            Self::Records(records) => records,
            Self::Envelope(envelope) => &envelope.data,
            Self::Other(_) => &[],
        }
    }

    pub fn into_records(self) -> Vec<StockRecord> {
        match self {
            Self::Records(records) => records,
            Self::Envelope(envelope) => envelope.data,
            Self::Other(_) => Vec::new(),
        }
    }

    /// Server note, if the envelope carried one
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Envelope(envelope) => envelope.note.as_deref(),
            _ => None,
        }
    }
}
