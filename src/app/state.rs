//! Store state and derived views.
//!
//! This module defines [`StoreState`], the container the store owns: the
//! working set of country records, UI selection state (search text, view
//! toggle), last-operation status, and the optimistic pending ledger. It also
//! computes the derived views (filtered list, continent groups) and the UI
//! view model.
//!
//! # Architecture
//!
//! `StoreState` separates core data (`countries`) from selection state and
//! derives everything else on demand; nothing derived is stored. Its
//! mutators are the only way records change:
//!
//! - [`insert`](StoreState::insert), [`remove`](StoreState::remove), and
//!   [`merge`](StoreState::merge) are the local (ephemeral) actions and apply
//!   synchronously with no remote call.
//! - The remaining `pub(crate)` mutators are used by
//!   [`CountryStore`](crate::app::CountryStore) to apply confirmed or
//!   optimistic remote results.
//!
//! # Example
//!
//! ```rust
//! use countrydeck::app::{StoreState, Toggle};
//! use countrydeck::domain::sample::sample_countries;
//!
//! let mut state = StoreState::new(sample_countries());
//! state.set_search_text("singapore");
//! assert_eq!(state.filtered().len(), 1);
//!
//! state.set_toggle(Toggle::Continent);
//! assert_eq!(state.grouped().len(), 5);
//! ```

use super::modes::Toggle;
use super::pending::{OpId, PendingLedger, PendingOp};
use crate::domain::error::{CountryDeckError, Result};
use crate::domain::{Country, CountryPatch};
use crate::ui::viewmodel::{
    DisplayRow, EmptyState, HeaderInfo, ListViewModel, SearchBarInfo, Section, StatusInfo,
};
use std::collections::HashSet;

/// One continent section of the grouped view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinentGroup<'a> {
    pub continent: &'a str,
    pub countries: Vec<&'a Country>,
}

/// The slice of records the current [`Toggle`] shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibleView<'a> {
    List(Vec<&'a Country>),
    Continents(Vec<ContinentGroup<'a>>),
}

/// Owned state of the country store.
///
/// Invariant: no two records share an `id`.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    countries: Vec<Country>,
    search_text: String,
    toggle: Toggle,
    is_loading: bool,
    error: Option<String>,
    pending: PendingLedger,
}

impl StoreState {
    /// Creates state holding `countries`, with an empty search and list view.
    ///
    /// Records repeating an earlier `id` are dropped.
    #[must_use]
    pub fn new(countries: Vec<Country>) -> Self {
        let mut state = Self::default();
        state.replace_all(countries);
        state
    }

    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub const fn toggle(&self) -> Toggle {
        self.toggle
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message of the last failed operation, cleared when the next one starts.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of optimistic changes still waiting on the remote store.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.countries.iter().position(|c| c.id == id)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn set_toggle(&mut self, toggle: Toggle) {
        self.toggle = toggle;
    }

    /// Appends a caller-built record.
    ///
    /// # Errors
    ///
    /// Returns [`CountryDeckError::DuplicateId`] and leaves state unchanged if
    /// a record with the same `id` already exists.
    pub fn insert(&mut self, country: Country) -> Result<()> {
        if self.position(&country.id).is_some() {
            return Err(CountryDeckError::DuplicateId(country.id));
        }
        self.countries.push(country);
        Ok(())
    }

    /// Removes and returns the record with `id`, if present.
    pub fn remove(&mut self, id: &str) -> Option<Country> {
        self.position(id).map(|index| self.countries.remove(index))
    }

    /// Shallow-merges `patch` into the record with `id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CountryDeckError::NotFound`] if no record has `id`.
    pub fn merge(&mut self, id: &str, patch: &CountryPatch) -> Result<&Country> {
        let index = self
            .position(id)
            .ok_or_else(|| CountryDeckError::NotFound(id.to_string()))?;
        let country = &mut self.countries[index];
        patch.apply_to(country);
        Ok(&*country)
    }

    /// Records with `name` or `capital` containing the search text, ignoring case.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Country> {
        let needle = self.search_text.to_lowercase();
        self.countries.iter().filter(|c| c.matches_lowercase(&needle)).collect()
    }

    /// All records grouped by continent.
    ///
    /// Groups appear in order of each continent's first record; members keep
    /// their order in `countries`. The search text is not applied.
    #[must_use]
    pub fn grouped(&self) -> Vec<ContinentGroup<'_>> {
        let mut groups: Vec<ContinentGroup<'_>> = Vec::new();
        for country in &self.countries {
            match groups.iter_mut().find(|g| g.continent == country.continent) {
                Some(group) => group.countries.push(country),
                None => groups.push(ContinentGroup {
                    continent: &country.continent,
                    countries: vec![country],
                }),
            }
        }
        groups
    }

    /// The view selected by the current toggle.
    #[must_use]
    pub fn visible(&self) -> VisibleView<'_> {
        match self.toggle {
            Toggle::List => VisibleView::List(self.filtered()),
            Toggle::Continent => VisibleView::Continents(self.grouped()),
        }
    }

    pub(crate) fn begin_request(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn finish_ok(&mut self) {
        self.is_loading = false;
    }

    pub(crate) fn finish_err(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    /// Replaces the working set wholesale, dropping repeated ids.
    pub(crate) fn replace_all(&mut self, rows: Vec<Country>) {
        let mut seen = HashSet::with_capacity(rows.len());
        let total = rows.len();
        self.countries = rows.into_iter().filter(|c| seen.insert(c.id.clone())).collect();
        if self.countries.len() != total {
            tracing::warn!(dropped = total - self.countries.len(), "dropped rows with repeated ids");
        }
    }

    /// Replaces the record with `row.id` in place, or appends `row`.
    pub(crate) fn upsert(&mut self, row: Country) {
        match self.position(&row.id) {
            Some(index) => self.countries[index] = row,
            None => self.countries.push(row),
        }
    }

    /// Replaces the record with `id` by `row` (whose id may differ).
    ///
    /// Falls back to [`upsert`](Self::upsert) if `id` is gone. Any other record
    /// already holding `row.id` is dropped so ids stay unique.
    pub(crate) fn replace(&mut self, id: &str, row: Country) {
        let Some(index) = self.position(id) else {
            self.upsert(row);
            return;
        };
        if row.id != id {
            if let Some(dup) = self.position(&row.id) {
                self.countries.remove(dup);
                let index = if dup < index { index - 1 } else { index };
                self.countries[index] = row;
                return;
            }
        }
        self.countries[index] = row;
    }

    pub(crate) fn record_pending(&mut self, op: PendingOp) -> OpId {
        self.pending.record(op)
    }

    pub(crate) fn settle_pending(&mut self, id: OpId) -> Option<PendingOp> {
        self.pending.settle(id)
    }

    /// Undoes an optimistic change that the remote store rejected.
    ///
    /// An update is undone field by field, and only where the field still
    /// holds the rejected value; a newer confirmed write is kept.
    pub(crate) fn roll_back(&mut self, op: PendingOp) {
        match op {
            PendingOp::Add { temp_id } => {
                self.remove(&temp_id);
            }
            PendingOp::Remove { index, country } => {
                if self.position(&country.id).is_none() {
                    let index = index.min(self.countries.len());
                    self.countries.insert(index, country);
                }
            }
            PendingOp::Update { id, applied, previous } => {
                let Some(index) = self.position(&id) else {
                    return;
                };
                let country = &mut self.countries[index];
                restore_field(&mut country.name, applied.name, previous.name);
                restore_field(&mut country.capital, applied.capital, previous.capital);
                restore_field(&mut country.continent, applied.continent, previous.continent);
                restore_field(&mut country.flag, applied.flag, previous.flag);
            }
        }
    }

    /// Computes a renderable view model from the current state.
    ///
    /// In list mode the rows carry highlight ranges for the part of the name
    /// matching the search text; in continent mode each group becomes a titled
    /// section and the search bar is hidden.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ListViewModel {
        let sections = match self.visible() {
            VisibleView::List(rows) => {
                if rows.is_empty() {
                    vec![]
                } else {
                    vec![Section {
                        title: None,
                        rows: rows.into_iter().map(|c| self.display_row(c, true)).collect(),
                    }]
                }
            }
            VisibleView::Continents(groups) => groups
                .into_iter()
                .map(|group| Section {
                    title: Some(group.continent.to_string()),
                    rows: group.countries.into_iter().map(|c| self.display_row(c, false)).collect(),
                })
                .collect(),
        };

        let count: usize = sections.iter().map(|s| s.rows.len()).sum();
        let empty_state = (count == 0).then(|| self.compute_empty_state());

        ListViewModel {
            header: HeaderInfo {
                title: match self.toggle {
                    Toggle::List => format!(" By List ({count}) "),
                    Toggle::Continent => format!(" By Continent ({}) ", sections.len()),
                },
            },
            search_bar: (self.toggle == Toggle::List).then(|| SearchBarInfo {
                query: self.search_text.clone(),
            }),
            sections,
            empty_state,
            status: self.compute_status(),
        }
    }

    fn display_row(&self, country: &Country, highlight: bool) -> DisplayRow {
        DisplayRow {
            id: country.id.clone(),
            flag: country.flag.clone(),
            name: country.name.clone(),
            capital: country.capital.clone(),
            is_pending: self.pending.is_unconfirmed_add(&country.id),
            highlight_ranges: if highlight {
                match_range(&country.name, &self.search_text).into_iter().collect()
            } else {
                vec![]
            },
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.countries.is_empty() {
            EmptyState {
                message: "No countries yet".to_string(),
                subtitle: "Add one or run `countrydeck seed`".to_string(),
            }
        } else {
            EmptyState {
                message: format!("No match for \"{}\"", self.search_text),
                subtitle: "Search looks at country names and capitals".to_string(),
            }
        }
    }

    fn compute_status(&self) -> Option<StatusInfo> {
        if let Some(error) = &self.error {
            Some(StatusInfo::Error(error.clone()))
        } else if self.is_loading {
            Some(StatusInfo::Loading)
        } else {
            None
        }
    }
}

/// Puts `previous` back into `field` if it still holds the `applied` value.
fn restore_field(field: &mut String, applied: Option<String>, previous: Option<String>) {
    if let (Some(applied), Some(previous)) = (applied, previous) {
        if *field == applied {
            *field = previous;
        }
    }
}

/// Character range of the first case-insensitive occurrence of `needle` in `text`.
fn match_range(text: &str, needle: &str) -> Option<(usize, usize)> {
    fn fold(c: char) -> char {
        c.to_lowercase().next().unwrap_or(c)
    }

    if needle.is_empty() {
        return None;
    }
    let haystack: Vec<char> = text.chars().map(fold).collect();
    let needle: Vec<char> = needle.chars().map(fold).collect();

    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
        .map(|start| (start, start + needle.len()))
}
