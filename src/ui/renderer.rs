//! Plain-text rendering of view models.
//!
//! The terminal shell prints what these functions return. Highlighted search
//! matches are wrapped in square brackets, pending rows are marked with `~`,
//! and the status line goes last.
//!
//! # Example
//!
//! ```rust
//! use countrydeck::app::StoreState;
//! use countrydeck::domain::sample::sample_countries;
//! use countrydeck::ui::render;
//!
//! let mut state = StoreState::new(sample_countries());
//! state.set_search_text("sing");
//! let text = render(&state.compute_viewmodel());
//! assert!(text.contains("[Sing]apore"));
//! ```

use crate::domain::DetailParams;
use crate::ui::viewmodel::{DisplayRow, ListViewModel, StatusInfo};
use std::fmt::Write as _;

/// Renders the list screen.
#[must_use]
pub fn render(vm: &ListViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", vm.header.title.trim());

    if let Some(search) = &vm.search_bar {
        let _ = writeln!(out, "Search: {}", search.query);
    }

    if let Some(empty) = &vm.empty_state {
        let _ = writeln!(out, "\n  {}\n  {}", empty.message, empty.subtitle);
    }

    for section in &vm.sections {
        if let Some(title) = &section.title {
            let _ = writeln!(out, "\n{title}");
        }
        for row in &section.rows {
            let _ = writeln!(out, "{}", render_row(row));
        }
    }

    match &vm.status {
        Some(StatusInfo::Loading) => {
            let _ = writeln!(out, "\nLoading…");
        }
        Some(StatusInfo::Error(message)) => {
            let _ = writeln!(out, "\nError: {message}");
        }
        None => {}
    }

    out
}

/// Renders the detail screen from its navigation parameters, verbatim.
#[must_use]
pub fn render_detail(detail: &DetailParams) -> String {
    format!(
        "{}\nID: {}\nCapital: {}\nContinent: {}\nFlag: {}\n",
        detail.name, detail.id, detail.capital, detail.continent, detail.flag
    )
}

fn render_row(row: &DisplayRow) -> String {
    let marker = if row.is_pending { '~' } else { ' ' };
    format!(
        "{marker} {} {}  ({})  #{}",
        row.flag,
        highlight(&row.name, &row.highlight_ranges),
        row.capital,
        row.id
    )
}

/// Wraps each char range of `text` in square brackets.
fn highlight(text: &str, ranges: &[(usize, usize)]) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + ranges.len() * 2);
    for (idx, c) in text.chars().enumerate() {
        if ranges.iter().any(|&(start, _)| start == idx) {
            out.push('[');
        }
        out.push(c);
        if ranges.iter().any(|&(_, end)| end == idx + 1) {
            out.push(']');
        }
    }
    out
}
