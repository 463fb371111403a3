//! Listing page controller.
//!
//! # Lifecycle
//! ```text
//! Idle ──mount──▶ Loading ──fetch settles──▶ Ready
//!                                             │
//!            every FilterState change ◀───────┘
//!            → filter::apply(all, state)
//!            → location.replace_query(to_query_string(state))
//! ```
//!
//! The dataset is fetched once. A failed fetch is logged and treated as an
//! empty list, so the page always ends up `Ready`. The address bar is a
//! mirror of the filter state: it is read once after the fetch (hydration)
//! and rewritten after every change.

use crate::directory::filter::{
    self, available_specialties, ConsultationMode, FilterState, SortKey,
};
use crate::directory::model::Doctor;
use crate::directory::query::{from_query_string, to_query_string};
use crate::upstream::DoctorSource;

/// Number of name suggestions shown under the search box.
pub const SUGGESTION_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
}

/// The page's address bar.
pub trait Location {
    /// Current query string, without the leading `?`.
    fn query(&self) -> &str;

    /// Replace the query string with `query`.
    fn replace_query(&mut self, query: String);
}

/// In-process address bar that remembers every write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    query: String,
    history: Vec<String>,
}

impl MemoryLocation {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let query = query.strip_prefix('?').map(str::to_string).unwrap_or(query);
        Self {
            query,
            history: Vec::new(),
        }
    }

    /// Every query string written since creation, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> &str {
        &self.query
    }

    fn replace_query(&mut self, query: String) {
        self.history.push(query.clone());
        self.query = query;
    }
}

/// Owns the filter state and the fetched dataset for one page instance.
#[derive(Debug)]
pub struct PageController<L = MemoryLocation> {
    location: L,
    phase: Phase,
    state: FilterState,
    all: Vec<Doctor>,
    filtered: Vec<Doctor>,
}

impl<L: Location> PageController<L> {
    pub fn new(location: L) -> Self {
        Self {
            location,
            phase: Phase::Idle,
            state: FilterState::default(),
            all: Vec::new(),
            filtered: Vec::new(),
        }
    }

    /// Fetch the dataset once and hydrate the filters from the location.
    ///
    /// Does nothing unless the controller is `Idle`.
    pub async fn mount<S>(&mut self, source: &S)
    where
        S: DoctorSource + ?Sized,
    {
        if self.phase != Phase::Idle {
            tracing::debug!(phase = ?self.phase, "Ignoring mount, page already mounted");
            return;
        }

        self.phase = Phase::Loading;
        let doctors = match source.fetch_doctors().await {
            Ok(doctors) => doctors,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load doctors, showing an empty list");
                Vec::new()
            }
        };
        self.finish_loading(doctors);
    }

    fn finish_loading(&mut self, doctors: Vec<Doctor>) {
        self.all = doctors;
        self.filtered = filter::apply(&self.all, &FilterState::default());
        self.phase = Phase::Ready;

        self.state = from_query_string(self.location.query());
        tracing::debug!(
            doctors = self.all.len(),
            state = ?self.state,
            "Page ready, filters hydrated from location"
        );
        self.refresh();
    }

    fn refresh(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        self.filtered = filter::apply(&self.all, &self.state);
        self.location.replace_query(to_query_string(&self.state));
    }

    /// Apply an arbitrary change to the filter state.
    ///
    /// Before the page is ready the change is kept but nothing is filtered
    /// or reflected; hydration will overwrite it.
    pub fn update(&mut self, change: impl FnOnce(&mut FilterState)) {
        change(&mut self.state);
        self.refresh();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.update(|s| s.search = term);
    }

    pub fn set_consultation_mode(&mut self, mode: ConsultationMode) {
        self.update(|s| s.mode = mode);
    }

    pub fn clear_consultation_mode(&mut self) {
        self.set_consultation_mode(ConsultationMode::Any);
    }

    /// Select `name` if it is not selected, deselect it otherwise.
    pub fn toggle_specialty(&mut self, name: &str) {
        self.update(|s| {
            s.specialties.toggle(name);
        });
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.update(|s| s.sort = sort);
    }

    pub fn clear_sort(&mut self) {
        self.set_sort(SortKey::Original);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn into_location(self) -> L {
        self.location
    }

    /// The full fetched dataset.
    pub fn doctors(&self) -> &[Doctor] {
        &self.all
    }

    /// The doctors to display, in display order.
    pub fn filtered(&self) -> &[Doctor] {
        &self.filtered
    }

    /// True when loading finished and nothing matches the filters.
    pub fn no_results(&self) -> bool {
        self.phase == Phase::Ready && self.filtered.is_empty()
    }

    pub fn heading(&self) -> String {
        match self.phase {
            Phase::Ready => format!("{} Doctors found", self.filtered.len()),
            Phase::Idle | Phase::Loading => "Loading doctors...".to_string(),
        }
    }

    /// Specialty names offered in the filter panel.
    pub fn specialties(&self) -> Vec<String> {
        available_specialties(&self.all)
    }

    /// Doctors whose names match the current search term.
    pub fn suggestions(&self) -> Vec<&Doctor> {
        filter::suggestions(&self.all, &self.state.search, SUGGESTION_LIMIT)
    }
}
