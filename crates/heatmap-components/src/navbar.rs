//! Top navigation bar

use chrono::{Local, NaiveDate};
use heatmap_core::{index_label, DATE_FORMAT};
use heatmap_state::use_app_state;
use leptos::prelude::*;

pub const APP_TITLE: &str = "Indian Stock Market Heatmap";

/// Date shown in the navbar: the selected trading date, else today
pub fn display_date(selected: &str, today: NaiveDate) -> String {
    if selected.is_empty() {
        today.format(DATE_FORMAT).to_string()
    } else {
        selected.to_string()
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let filters = use_app_state().filters;
    let today = Local::now().date_naive();

    view! {
        <nav id="navbar" class="navbar">
            <span class="navbar-title">{APP_TITLE}</span>
            <span class="navbar-context">
                <span class="pill active">{move || index_label(&filters.index.get())}</span>
                <span class="pill">{move || filters.sector.get()}</span>
            </span>
            <span id="date" class="navbar-date">
                {move || display_date(&filters.date.get(), today)}
            </span>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 25).unwrap();
        assert_eq!(display_date("", today), "2025-04-25");
        assert_eq!(display_date("2024-04-01", today), "2024-04-01");
    }
}
