//! # layout
//!
//! D3-style treemap layout: a synthetic root whose children are the input
//! values, padded and partitioned by a pluggable tiling strategy.

use crate::RenderError;
use heatmap_core::TreemapNode;
use std::sync::Arc;

/// The golden ratio, D3's default target aspect ratio for squarified rows
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Axis-aligned rectangle in SVG user units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Shrink by `p` on every side, collapsing to the midpoint when inverted
    pub fn inset(&self, p: f64) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (self.x0 + p, self.y0 + p, self.x1 - p, self.y1 - p);
        if x1 < x0 {
            x0 = (x0 + x1) / 2.0;
            x1 = x0;
        }
        if y1 < y0 {
            y0 = (y0 + y1) / 2.0;
            y1 = y0;
        }
        Self { x0, y0, x1, y1 }
    }

    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-9;
        other.x0 >= self.x0 - EPS
            && other.y0 >= self.y0 - EPS
            && other.x1 <= self.x1 + EPS
            && other.y1 <= self.y1 + EPS
    }
}

// ============================================================================
// STRATEGY PATTERN: Tiling
// ============================================================================

/// Strategy trait for partitioning a rectangle among weighted children
pub trait TileStrategy: Send + Sync {
    /// One rectangle per value, in input order, covering `bounds` in
    /// proportion to the values
    fn tile(&self, values: &[f64], bounds: Rect) -> Vec<Rect>;

    fn name(&self) -> &'static str;
}

/// Lay `values` side by side horizontally across the full height
fn dice(values: &[f64], out: &mut [Rect], x0: f64, y0: f64, x1: f64, y1: f64) {
    let sum: f64 = values.iter().sum();
    let k = if sum > 0.0 { (x1 - x0) / sum } else { 0.0 };
    let mut x = x0;
    for (value, rect) in values.iter().zip(out.iter_mut()) {
        let next = x + value * k;
        *rect = Rect::new(x, y0, next, y1);
        x = next;
    }
}

/// Stack `values` vertically across the full width
fn slice(values: &[f64], out: &mut [Rect], x0: f64, y0: f64, x1: f64, y1: f64) {
    let sum: f64 = values.iter().sum();
    let k = if sum > 0.0 { (y1 - y0) / sum } else { 0.0 };
    let mut y = y0;
    for (value, rect) in values.iter().zip(out.iter_mut()) {
        let next = y + value * k;
        *rect = Rect::new(x0, y, x1, next);
        y = next;
    }
}

/// Squarified tiling (Bruls et al.), matching `d3.treemapSquarify`
#[derive(Debug, Clone, Copy)]
pub struct Squarify {
    pub ratio: f64,
}

impl Default for Squarify {
    fn default() -> Self {
        Self { ratio: GOLDEN_RATIO }
    }
}

impl TileStrategy for Squarify {
    fn tile(&self, values: &[f64], bounds: Rect) -> Vec<Rect> {
        let n = values.len();
        let mut out = vec![Rect::default(); n];
        let mut remaining: f64 = values.iter().sum();
        let Rect { mut x0, mut y0, x1, y1 } = bounds;
        let (mut i0, mut i1) = (0usize, 0usize);

        while i0 < n {
            let dx = x1 - x0;
            let dy = y1 - y0;

            // Find the next non-empty value
            let mut sum;
            loop {
                sum = values[i1];
                i1 += 1;
                if sum != 0.0 || i1 >= n {
                    break;
                }
            }

            let mut min_value = sum;
            let mut max_value = sum;
            let alpha = (dy / dx).max(dx / dy) / (remaining * self.ratio);
            let mut beta = sum * sum * alpha;
            let mut min_ratio = (max_value / beta).max(beta / min_value);

            // Keep adding values while the worst aspect ratio improves
            while i1 < n {
                let value = values[i1];
                sum += value;
                min_value = min_value.min(value);
                max_value = max_value.max(value);
                beta = sum * sum * alpha;
                let new_ratio = (max_value / beta).max(beta / min_value);
                if new_ratio > min_ratio {
                    sum -= value;
                    break;
                }
                min_ratio = new_ratio;
                i1 += 1;
            }

            let row = i0..i1;
            if dx < dy {
                let y_end = if remaining > 0.0 { y0 + dy * sum / remaining } else { y1 };
                dice(&values[row.clone()], &mut out[row], x0, y0, x1, y_end);
                y0 = y_end;
            } else {
                let x_end = if remaining > 0.0 { x0 + dx * sum / remaining } else { x1 };
                slice(&values[row.clone()], &mut out[row], x0, y0, x_end, y1);
                x0 = x_end;
            }

            remaining -= sum;
            i0 = i1;
        }

        out
    }

    fn name(&self) -> &'static str {
        "squarify"
    }
}

/// Single-row tiling: children side by side across the width
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceDice;

impl TileStrategy for SliceDice {
    fn tile(&self, values: &[f64], bounds: Rect) -> Vec<Rect> {
        let mut out = vec![Rect::default(); values.len()];
        dice(values, &mut out, bounds.x0, bounds.y0, bounds.x1, bounds.y1);
        out
    }

    fn name(&self) -> &'static str {
        "slice-dice"
    }
}

// ============================================================================
// TREEMAP LAYOUT
// ============================================================================

/// A node paired with its laid-out rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct CellLayout {
    pub node: TreemapNode,
    pub rect: Rect,
}

/// Treemap layout builder (d3.treemap equivalent for a two-level hierarchy)
#[derive(Clone)]
pub struct TreemapLayout {
    width: f64,
    height: f64,
    padding_inner: f64,
    padding_outer: f64,
    tile: Option<Arc<dyn TileStrategy>>,
}

impl TreemapLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding_inner: 0.0,
            padding_outer: 0.0,
            tile: Some(Arc::new(Squarify::default())),
        }
    }

    /// Set both inner and outer padding
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding;
        self.padding_outer = padding;
        self
    }

    pub fn tile(mut self, strategy: impl TileStrategy + 'static) -> Self {
        self.tile = Some(Arc::new(strategy));
        self
    }

    /// Remove the tiling strategy; layout then fails with `MissingLayout`
    pub fn without_tile(mut self) -> Self {
        self.tile = None;
        self
    }

    /// Lay out leaf values under a synthetic root
    pub fn layout(&self, values: &[f64]) -> Result<Vec<Rect>, RenderError> {
        let tile = self.tile.as_ref().ok_or(RenderError::MissingLayout)?;
        if values.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(RenderError::InvalidValue(*bad));
        }

        let root = Rect::new(0.0, 0.0, self.width.max(0.0), self.height.max(0.0));
        let half = self.padding_inner / 2.0;
        let inner = root.inset(self.padding_outer - half);

        let rects = tile
            .tile(values, inner)
            .into_iter()
            .map(|rect| rect.inset(half))
            .collect();

        tracing::trace!(strategy = tile.name(), leaves = values.len(), "treemap laid out");
        Ok(rects)
    }

    /// Lay out treemap nodes by their `value`
    pub fn cells(&self, nodes: &[TreemapNode]) -> Result<Vec<CellLayout>, RenderError> {
        let values: Vec<f64> = nodes.iter().map(|n| n.value).collect();
        let rects = self.layout(&values)?;
        Ok(nodes
            .iter()
            .cloned()
            .zip(rects)
            .map(|(node, rect)| CellLayout { node, rect })
            .collect())
    }
}

impl std::fmt::Debug for TreemapLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreemapLayout")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("padding_inner", &self.padding_inner)
            .field("padding_outer", &self.padding_outer)
            .field("tile", &self.tile.as_ref().map(|t| t.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_squarify_areas_are_proportional() {
        let values = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0];
        let bounds = Rect::new(0.0, 0.0, 600.0, 400.0);
        let rects = Squarify::default().tile(&values, bounds);
        let total: f64 = values.iter().sum();

        assert_eq!(rects.len(), values.len());
        for (value, rect) in values.iter().zip(&rects) {
            assert!(approx(rect.area(), value / total * bounds.area()));
            assert!(bounds.contains(rect));
        }
        let covered: f64 = rects.iter().map(Rect::area).sum();
        assert!(approx(covered, bounds.area()));
    }

    #[test]
    fn test_squarify_single_value_fills_bounds() {
        let bounds = Rect::new(0.0, 0.0, 300.0, 200.0);
        let rects = Squarify::default().tile(&[5.0], bounds);
        assert_eq!(rects, vec![bounds]);
    }

    #[test]
    fn test_squarify_tall_bounds_dices_rows() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 400.0);
        let rects = Squarify::default().tile(&[1.0, 1.0, 1.0, 1.0], bounds);
        for rect in &rects {
            assert!(approx(rect.area(), 10_000.0));
            assert!(bounds.contains(rect));
        }
    }

    #[test]
    fn test_slice_dice_lays_out_one_row() {
        let rects = SliceDice.tile(&[1.0, 3.0], Rect::new(0.0, 0.0, 400.0, 100.0));
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(rects[1], Rect::new(100.0, 0.0, 400.0, 100.0));
    }

    #[test]
    fn test_padding_insets_leaves() {
        let layout = TreemapLayout::new(600.0, 400.0).padding(2.0);
        let rects = layout.layout(&[10.0]).unwrap();
        assert_eq!(rects.len(), 1);
        let rect = rects[0];
        assert!(approx(rect.x0, 2.0) && approx(rect.y0, 2.0));
        assert!(approx(rect.x1, 598.0) && approx(rect.y1, 398.0));
    }

    #[test]
    fn test_padding_separates_neighbours() {
        let layout = TreemapLayout::new(400.0, 100.0).padding(2.0).tile(SliceDice);
        let rects = layout.layout(&[1.0, 1.0]).unwrap();
        assert!(approx(rects[1].x0 - rects[0].x1, 2.0));
    }

    #[test]
    fn test_missing_tile_strategy_is_an_error() {
        let layout = TreemapLayout::new(600.0, 400.0).without_tile();
        assert_eq!(layout.layout(&[1.0]), Err(RenderError::MissingLayout));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let layout = TreemapLayout::new(600.0, 400.0);
        assert!(matches!(layout.layout(&[1.0, -2.0]), Err(RenderError::InvalidValue(_))));
        assert!(layout.layout(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_cells_keep_node_order() {
        let nodes = vec![
            TreemapNode::new("A", "A", 12.0),
            TreemapNode::new("B", "B", 11.0),
            TreemapNode::new("C", "C", 10.0),
        ];
        let cells = TreemapLayout::new(600.0, 400.0).padding(2.0).cells(&nodes).unwrap();
        let symbols: Vec<_> = cells.iter().map(|c| c.node.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "B", "C"]);
        assert!(cells.iter().all(|c| c.rect.width() > 0.0 && c.rect.height() > 0.0));
    }
}
