//! View model types representing renderable UI state.
//!
//! View models are computed from [`StoreState`](crate::app::StoreState) by
//! `compute_viewmodel()` and consumed by a renderer. They hold no business
//! logic, only display-ready data: section titles, row labels, highlight
//! ranges, and the status line.

/// Complete view model for the country list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    /// Header information (view name and count).
    pub header: HeaderInfo,

    /// Search input state; `None` in continent view, which has no search box.
    pub search_bar: Option<SearchBarInfo>,

    /// One untitled section in list view, one titled section per continent otherwise.
    pub sections: Vec<Section>,

    /// Shown instead of the sections when nothing is visible.
    pub empty_state: Option<EmptyState>,

    /// Loading indicator or last error.
    pub status: Option<StatusInfo>,
}

/// A run of rows under an optional heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: Option<String>,
    pub rows: Vec<DisplayRow>,
}

/// Display information for one country row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Record id, used as the selection key.
    pub id: String,
    pub flag: String,
    pub name: String,
    pub capital: String,

    /// `true` while the row is an optimistic add not yet confirmed by the server.
    pub is_pending: bool,

    /// Character ranges of `name` to highlight (search matches).
    ///
    /// Each tuple is `(start, end)` in char indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search text.
    pub query: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No countries yet").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Status line content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusInfo {
    Loading,
    Error(String),
}
