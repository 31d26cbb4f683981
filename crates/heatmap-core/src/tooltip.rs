//! HTML fragments for the treemap tooltip and bottom-sheet modal

use crate::{colors, format_change, format_market_cap, format_plain, format_volume, TreemapNode};
use std::fmt::Write;

/// Escape text for interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn quote_body(node: &TreemapNode) -> String {
    let details = &node.details;
    let mut html = String::new();
    let _ = write!(
        html,
        "<div style='font-weight:700;font-size:1.1em;'>{}</div>\
         <div style='margin:6px 0 2px 0;font-size:0.97em;'>Price Change: <b>{}</b></div>\
         <div>Current Price: ₹{}</div>\
         <div>Volume: {}</div>\
         <div>P/E Ratio: {}</div>\
         <div>Market Cap: ₹{}</div>",
        escape_html(&node.name),
        format_change(node.change),
        format_plain(details.price),
        format_volume(details.volume),
        format_plain(details.pe),
        format_market_cap(details.market_cap),
    );
    html
}

/// Hover tooltip content
pub fn tooltip_html(node: &TreemapNode) -> String {
    quote_body(node)
}

/// Bottom-sheet modal content (tooltip body plus a Close button)
pub fn modal_html(node: &TreemapNode) -> String {
    let mut html = quote_body(node);
    let _ = write!(
        html,
        "<div style='margin-top:16px;text-align:center;'>\
         <button class='modal-close' style='padding:8px 24px;border-radius:8px;background:{};color:#fff;\
         border:none;font-weight:600;font-size:1em;'>Close</button></div>",
        colors::ACCENT,
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuoteDetails;

    fn hdfc() -> TreemapNode {
        TreemapNode::new("HDFC Bank", "HDFCBANK", 12.0)
            .with_change(1.23)
            .with_details(QuoteDetails {
                price: Some(1600.5),
                volume: Some(12_345_678.0),
                pe: Some(20.1),
                market_cap: Some(1e12),
            })
    }

    #[test]
    fn test_tooltip_html() {
        let html = tooltip_html(&hdfc());
        for needle in ["HDFC Bank", "Price Change", "+1.23%", "₹1600.5", "12.3 M", "20.1", "1.00 T"] {
            assert!(html.contains(needle), "missing {needle} in {html}");
        }
        assert!(!html.contains("button"));
    }

    #[test]
    fn test_modal_html_has_close_button() {
        let html = modal_html(&hdfc());
        assert!(html.contains("HDFC Bank"));
        assert!(html.contains("+1.23%"));
        assert!(html.contains("<button"));
        assert!(html.contains("Close"));
    }

    #[test]
    fn test_missing_details_render_placeholders() {
        let html = tooltip_html(&TreemapNode::new("Infosys", "INFY", 11.0));
        assert!(html.contains("Current Price: ₹--"));
        assert!(html.contains("Volume: --"));
        assert!(html.contains("P/E Ratio: --"));
    }

    #[test]
    fn test_names_are_escaped() {
        let html = tooltip_html(&TreemapNode::new("<b>M&M</b>", "M&M", 10.0));
        assert!(html.contains("&lt;b&gt;M&amp;M&lt;/b&gt;"));
    }
}
