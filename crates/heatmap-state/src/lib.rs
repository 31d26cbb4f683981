//! # heatmap-state
//!
//! Reactive state management for the Market Heatmap Dashboard.
//! Uses Leptos signals for surgical DOM updates when data or filters change.

pub mod heatmap;

pub use heatmap::*;

use heatmap_core::TreemapNode;
use leptos::prelude::*;

/// Configuration constants
pub const MOBILE_BREAKPOINT: f64 = 600.0;
pub const DEBOUNCE_MS: u32 = 300;

/// Fallback error text when a failure carries no message
pub const DEFAULT_ERROR: &str = "Failed to load data";

// ============================================================================
// UI STATE
// ============================================================================

/// Layout class derived from the viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewport {
    #[default]
    Desktop,
    Mobile,
}

impl Viewport {
    /// Desktop strictly above the breakpoint
    pub fn from_width(width: f64) -> Self {
        if width > MOBILE_BREAKPOINT {
            Self::Desktop
        } else {
            Self::Mobile
        }
    }

    pub fn is_desktop(&self) -> bool {
        matches!(self, Self::Desktop)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Desktop => "viewport-desktop",
            Self::Mobile => "viewport-mobile",
        }
    }
}

/// What a click on a treemap cell should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellAction {
    Drilldown(String),
    ShowModal,
}

impl CellAction {
    /// Desktop clicks on a cell with a sector drill down; everything else opens the modal
    pub fn for_click(viewport: Viewport, node: &TreemapNode) -> Self {
        match node.drilldown_sector() {
            Some(sector) if viewport.is_desktop() => Self::Drilldown(sector.to_string()),
            _ => Self::ShowModal,
        }
    }
}

/// Floating tooltip anchored near the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub node: TreemapNode,
    pub left: f64,
    pub top: f64,
}

impl TooltipState {
    /// Offset from the pointer so the tooltip does not sit under it
    pub const OFFSET: f64 = 18.0;

    pub fn at_pointer(node: TreemapNode, client_x: f64, client_y: f64) -> Self {
        Self {
            node,
            left: client_x + Self::OFFSET,
            top: client_y - Self::OFFSET,
        }
    }
}

/// Global UI state
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub viewport_width: f64,
    pub container_width: f64,
    pub tooltip: Option<TooltipState>,
    pub modal: Option<TreemapNode>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            viewport_width: 1024.0,
            container_width: 0.0,
            tooltip: None,
            modal: None,
        }
    }
}

impl UiState {
    pub fn viewport(&self) -> Viewport {
        Viewport::from_width(self.viewport_width)
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Global application state with reactive signals
#[derive(Clone, Copy)]
pub struct AppState {
    /// Heatmap data
    pub heatmap: HeatmapState,
    /// Filter selections (dropdowns, index selector, date picker)
    pub filters: FilterState,
    /// UI state (viewport, tooltip, modal)
    pub ui: RwSignal<UiState>,
    /// Current error message
    pub error: RwSignal<Option<String>>,
    /// Loading state
    pub loading: RwSignal<bool>,
}

impl AppState {
    /// Create new application state
    pub fn new() -> Self {
        Self {
            heatmap: HeatmapState::new(),
            filters: FilterState::new(),
            ui: RwSignal::new(UiState::default()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
        }
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Set error message, falling back to the default text when empty
    pub fn set_error(&self, msg: impl Into<String>) {
        let msg = msg.into();
        let msg = if msg.is_empty() { DEFAULT_ERROR.to_string() } else { msg };
        self.error.set(Some(msg));
    }

    /// Clear error
    pub fn clear_error(&self) {
        self.error.set(None);
    }

    // ========================================================================
    // Loading State
    // ========================================================================

    /// Set loading state
    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    /// Check if loading
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub fn set_viewport_width(&self, width: f64) {
        self.ui.update(|ui| ui.viewport_width = width);
    }

    pub fn set_container_width(&self, width: f64) {
        self.ui.update(|ui| ui.container_width = width);
    }

    pub fn viewport(&self) -> Viewport {
        self.ui.with(|ui| ui.viewport())
    }

    /// Show the tooltip, replacing any existing one
    pub fn show_tooltip(&self, tooltip: TooltipState) {
        self.ui.update(|ui| ui.tooltip = Some(tooltip));
    }

    pub fn hide_tooltip(&self) {
        self.ui.update(|ui| ui.tooltip = None);
    }

    /// Show the bottom-sheet modal, replacing any existing one
    pub fn show_modal(&self, node: TreemapNode) {
        self.ui.update(|ui| ui.modal = Some(node));
    }

    pub fn hide_modal(&self) {
        self.ui.update(|ui| ui.modal = None);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide app state context to component tree
pub fn provide_app_state() -> AppState {
    let state = AppState::new();
    provide_context(state);
    state
}

/// Use app state from context
pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

/// Try to get app state from context (returns None if not provided)
pub fn try_use_app_state() -> Option<AppState> {
    use_context::<AppState>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_breakpoint() {
        assert_eq!(Viewport::from_width(601.0), Viewport::Desktop);
        assert_eq!(Viewport::from_width(600.0), Viewport::Mobile);
        assert_eq!(Viewport::from_width(375.0), Viewport::Mobile);
    }

    #[test]
    fn test_cell_action() {
        let with_sector = TreemapNode::new("HDFC Bank", "HDFCBANK", 12.0).with_sector("FINANCE");
        let without_sector = TreemapNode::new("Infosys", "INFY", 11.0);

        assert_eq!(
            CellAction::for_click(Viewport::Desktop, &with_sector),
            CellAction::Drilldown("FINANCE".into())
        );
        assert_eq!(CellAction::for_click(Viewport::Mobile, &with_sector), CellAction::ShowModal);
        assert_eq!(CellAction::for_click(Viewport::Desktop, &without_sector), CellAction::ShowModal);
        assert_eq!(
            CellAction::for_click(Viewport::Desktop, &TreemapNode::new("X", "X", 1.0).with_sector("")),
            CellAction::ShowModal
        );
    }

    #[test]
    fn test_tooltip_offset() {
        let tip = TooltipState::at_pointer(TreemapNode::new("A", "A", 1.0), 100.0, 50.0);
        assert_eq!((tip.left, tip.top), (118.0, 32.0));
    }

    #[test]
    fn test_error_fallback_message() {
        let state = AppState::new();
        state.set_error("");
        assert_eq!(state.error.get_untracked().as_deref(), Some(DEFAULT_ERROR));
        state.set_error("API fail");
        assert_eq!(state.error.get_untracked().as_deref(), Some("API fail"));
        state.clear_error();
        assert!(state.error.get_untracked().is_none());
    }

    #[test]
    fn test_single_tooltip_and_modal() {
        let state = AppState::new();
        state.show_tooltip(TooltipState::at_pointer(TreemapNode::new("A", "A", 1.0), 0.0, 0.0));
        state.show_tooltip(TooltipState::at_pointer(TreemapNode::new("B", "B", 1.0), 0.0, 0.0));
        assert_eq!(
            state.ui.with_untracked(|ui| ui.tooltip.as_ref().map(|t| t.node.symbol.clone())),
            Some("B".to_string())
        );
        state.hide_tooltip();
        assert!(state.ui.with_untracked(|ui| ui.tooltip.is_none()));

        state.show_modal(TreemapNode::new("C", "C", 1.0));
        state.hide_modal();
        assert!(state.ui.with_untracked(|ui| ui.modal.is_none()));
    }
}
