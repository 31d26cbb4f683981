//! # heatmap-core
//!
//! Core domain types for the Market Heatmap Dashboard.
//! Implements Strategy pattern for number formatting and colour banding.

pub mod band;
pub mod filters;
pub mod format;
pub mod record;
pub mod tooltip;
pub mod treemap;

pub use band::*;
pub use filters::*;
pub use format::*;
pub use record::*;
pub use tooltip::*;
pub use treemap::*;

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for percentage change formatting
pub trait ChangeFormatter: Send + Sync {
    fn format(&self, change: Option<f64>) -> String;
}

/// Strategy trait for large number formatting (volume, market cap)
pub trait LargeNumberFormatter: Send + Sync {
    fn format(&self, num: Option<f64>) -> String;
}

/// Placeholder shown for missing figures
pub const MISSING: &str = "--";

// ============================================================================
// FILTER DEFAULTS
// ============================================================================

/// Index options offered by the index dropdown
pub const DEFAULT_INDICES: &[&str] = &["NIFTY50", "NIFTYBANK"];

/// Sector options offered by the sector dropdown
pub const DEFAULT_SECTORS: &[&str] = &["FINANCE", "IT"];

/// Indices shown in the segmented index selector
pub const SELECTOR_INDICES: &[&str] = &["NIFTY50", "NIFTYBANK", "NIFTYIT"];

/// Human label for an index code ("NIFTY50" -> "Nifty 50")
pub fn index_label(index: &str) -> String {
    index.replacen("NIFTY", "Nifty ", 1).replacen("BANK", "Bank", 1)
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const DEEP_RED: &str = "#E02424";
    pub const MID_RED: &str = "#EF4444";
    pub const LIGHT_RED: &str = "#F87171";
    pub const LIGHT_GREEN: &str = "#34D399";
    pub const MID_GREEN: &str = "#10B981";
    pub const DEEP_GREEN: &str = "#059669";
    pub const NEUTRAL: &str = "#F5F7FA";

    pub const ACCENT: &str = "#2563EB";
    pub const CELL_LABEL: &str = "#FFFFFF";
}
