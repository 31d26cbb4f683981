//! # heatmap-charts
//!
//! D3.js-style SVG charting for the Market Heatmap Dashboard, built with Leptos.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Treemap tiling (squarified, slice-dice)
//!
//! ## Modules
//!
//! - `layout` - Treemap layout primitives: rectangles, tiling, padding
//! - `heatmap` - Treemap SVG component with pointer events
//! - `legend` - Colour band legend

pub mod heatmap;
pub mod layout;
pub mod legend;

pub use heatmap::*;
pub use layout::*;
pub use legend::*;

// Re-export colors from heatmap-core for convenience
pub use heatmap_core::colors;

/// Treemap height in pixels
pub const TREEMAP_HEIGHT: f64 = 400.0;

/// Width used when the container reports none
pub const FALLBACK_WIDTH: f64 = 600.0;

/// Gap between treemap cells and around the root
pub const CELL_PADDING: f64 = 2.0;

/// Rendering failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("treemap layout not available")]
    MissingLayout,
    #[error("invalid treemap value: {0}")]
    InvalidValue(f64),
}

/// Chart dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Dimensions for a container of `container_width` pixels; a zero or
    /// unknown width falls back to `FALLBACK_WIDTH`
    pub fn for_container(container_width: f64) -> Self {
        let width = if container_width.is_finite() && container_width > 0.0 {
            container_width
        } else {
            FALLBACK_WIDTH
        };
        Self::new(width, TREEMAP_HEIGHT)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(FALLBACK_WIDTH, TREEMAP_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_width_fallback() {
        assert_eq!(ChartDimensions::for_container(0.0).width, 600.0);
        assert_eq!(ChartDimensions::for_container(f64::NAN).width, 600.0);
        assert_eq!(ChartDimensions::for_container(1024.0), ChartDimensions::new(1024.0, 400.0));
        assert_eq!(ChartDimensions::default().viewbox(), "0 0 600 400");
    }

    #[test]
    fn test_render_error_messages() {
        assert_eq!(RenderError::MissingLayout.to_string(), "treemap layout not available");
    }
}
