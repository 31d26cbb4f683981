//! Treemap heatmap component
//!
//! Renders one coloured, labelled rectangle per node and reports pointer
//! events to the caller; deciding what a hover or click means is left to
//! the owner of the chart.

use crate::{colors, CellLayout, ChartDimensions, TreemapLayout, CELL_PADDING};
use heatmap_core::TreemapNode;
use leptos::prelude::*;
use web_sys::MouseEvent;

/// Pointer interaction on a treemap cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellEvent {
    pub node: TreemapNode,
    pub client_x: f64,
    pub client_y: f64,
}

impl CellEvent {
    pub fn new(node: TreemapNode, client_x: f64, client_y: f64) -> Self {
        Self { node, client_x, client_y }
    }

    fn from_mouse(node: TreemapNode, ev: &MouseEvent) -> Self {
        Self::new(node, ev.client_x() as f64, ev.client_y() as f64)
    }
}

/// Compute cells for the given dimensions; empty input yields no cells
pub fn layout_cells(nodes: &[TreemapNode], dims: ChartDimensions) -> Vec<CellLayout> {
    if nodes.is_empty() {
        return Vec::new();
    }
    match TreemapLayout::new(dims.width, dims.height)
        .padding(CELL_PADDING)
        .cells(nodes)
    {
        Ok(cells) => cells,
        Err(e) => {
            tracing::error!("Treemap layout failed: {}", e);
            Vec::new()
        }
    }
}

/// Treemap component
#[component]
pub fn Treemap(
    #[prop(into)] nodes: Signal<Vec<TreemapNode>>,
    #[prop(into)] dimensions: Signal<ChartDimensions>,
    #[prop(optional)] on_hover: Option<Callback<CellEvent>>,
    #[prop(optional)] on_leave: Option<Callback<()>>,
    #[prop(optional)] on_select: Option<Callback<CellEvent>>,
) -> impl IntoView {
    let chart = move || {
        let dims = dimensions.get();
        let cells = layout_cells(&nodes.get(), dims);
        if cells.is_empty() {
            return None;
        }

        Some(view! {
            <svg
                class="treemap-svg"
                width=dims.width
                height=dims.height
                viewBox=dims.viewbox()
            >
                {cells.into_iter().map(|cell| {
                    view! {
                        <TreemapTile
                            cell=cell
                            on_hover=on_hover.clone()
                            on_leave=on_leave.clone()
                            on_select=on_select.clone()
                        />
                    }
                }).collect_view()}
            </svg>
        })
    };

    view! { {chart} }
}

#[component]
fn TreemapTile(
    cell: CellLayout,
    on_hover: Option<Callback<CellEvent>>,
    on_leave: Option<Callback<()>>,
    on_select: Option<Callback<CellEvent>>,
) -> impl IntoView {
    let CellLayout { node, rect } = cell;
    let label = node.label().to_string();
    let fill = node.color();
    let sector = node.sector.clone().unwrap_or_default();

    let hover_node = node.clone();
    let select_node = node;

    view! {
        <g transform=format!("translate({},{})", rect.x0, rect.y0)>
            <rect
                width=rect.width()
                height=rect.height()
                fill=fill
                data-symbol=label.clone()
                data-sector=sector
                on:mouseover=move |ev: MouseEvent| {
                    if let Some(cb) = on_hover.as_ref() {
                        cb.run(CellEvent::from_mouse(hover_node.clone(), &ev));
                    }
                }
                on:mouseout=move |_| {
                    if let Some(cb) = on_leave.as_ref() {
                        cb.run(());
                    }
                }
                on:click=move |ev: MouseEvent| {
                    if let Some(cb) = on_select.as_ref() {
                        cb.run(CellEvent::from_mouse(select_node.clone(), &ev));
                    }
                }
            />
            <text
                x="4"
                y="14"
                font-size="10px"
                fill=colors::CELL_LABEL
                style="pointer-events: none"
            >
                {label}
            </text>
        </g>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_nodes_yield_no_cells() {
        assert!(layout_cells(&[], ChartDimensions::default()).is_empty());
    }

    #[test]
    fn test_cells_fit_inside_chart() {
        let nodes = vec![
            TreemapNode::new("HDFC Bank", "HDFCBANK", 12.0).with_change(1.2),
            TreemapNode::new("Infosys", "INFY", 11.7).with_change(-1.5),
        ];
        let dims = ChartDimensions::for_container(800.0);
        let cells = layout_cells(&nodes, dims);
        assert_eq!(cells.len(), 2);
        for cell in &cells {
            assert!(cell.rect.x0 >= 2.0 - 1e-9 && cell.rect.x1 <= 798.0 + 1e-9);
            assert!(cell.rect.y0 >= 2.0 - 1e-9 && cell.rect.y1 <= 398.0 + 1e-9);
        }
        assert_eq!(cells[0].node.color(), "#10B981");
        assert_eq!(cells[1].node.color(), "#EF4444");
    }
}
