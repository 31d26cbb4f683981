//! # heatmap-components
//!
//! Leptos UI components for the Market Heatmap Dashboard.

mod dashboard;
mod drilldown;
mod filters;
mod navbar;
mod status;
mod treemap_panel;

pub use dashboard::*;
pub use drilldown::*;
pub use filters::*;
pub use navbar::*;
pub use status::*;
pub use treemap_panel::*;

use heatmap_client::Debouncer;
use heatmap_core::FilterParams;
use leptos::prelude::*;

/// Debounced reload shared by the filter controls
pub type ReloadDebouncer = StoredValue<Debouncer<FilterParams>, LocalStorage>;
