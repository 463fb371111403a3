//! Filter state and the filter engine.
//!
//! # Stages
//! ```text
//! all doctors
//!     → search        (case-insensitive substring of the name)
//!     → consultation  (video / in-clinic / any)
//!     → specialty     (OR across the selection)
//!     → sort          (stable; fees ascending or experience descending)
//!     → filtered doctors
//! ```
//!
//! `apply` is pure: the input slice is never touched and re-applying the
//! same state to its own output changes nothing.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::directory::extract::{numeric_experience, numeric_fees};
use crate::directory::model::Doctor;

/// Error for strictly parsed filter values (CLI flags).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFilterError {
    #[error("unknown consultation mode '{0}' (expected video_consult or in_clinic)")]
    Mode(String),

    #[error("unknown sort key '{0}' (expected fees or experience)")]
    Sort(String),
}

/// Single-select consultation filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConsultationMode {
    #[default]
    Any,
    VideoConsult,
    InClinic,
}

impl ConsultationMode {
    /// Query-string value, `None` for `Any`.
    pub fn as_query_value(self) -> Option<&'static str> {
        match self {
            ConsultationMode::Any => None,
            ConsultationMode::VideoConsult => Some("video_consult"),
            ConsultationMode::InClinic => Some("in_clinic"),
        }
    }

    /// Tolerant decoding: anything unrecognised means `Any`.
    pub fn from_query_value(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn admits(self, doctor: &Doctor) -> bool {
        match self {
            ConsultationMode::Any => true,
            ConsultationMode::VideoConsult => doctor.video_consult,
            ConsultationMode::InClinic => doctor.in_clinic,
        }
    }
}

impl FromStr for ConsultationMode {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video_consult" => Ok(ConsultationMode::VideoConsult),
            "in_clinic" => Ok(ConsultationMode::InClinic),
            other => Err(ParseFilterError::Mode(other.to_string())),
        }
    }
}

impl fmt::Display for ConsultationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value().unwrap_or("any"))
    }
}

/// Single-select ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Keep upstream order.
    #[default]
    Original,
    FeesAscending,
    ExperienceDescending,
}

impl SortKey {
    pub fn as_query_value(self) -> Option<&'static str> {
        match self {
            SortKey::Original => None,
            SortKey::FeesAscending => Some("fees"),
            SortKey::ExperienceDescending => Some("experience"),
        }
    }

    pub fn from_query_value(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SortKey {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fees" => Ok(SortKey::FeesAscending),
            "experience" => Ok(SortKey::ExperienceDescending),
            other => Err(ParseFilterError::Sort(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value().unwrap_or("original"))
    }
}

/// Joins selected specialty names in the query string.
pub const SPECIALTY_SEPARATOR: &str = ",";

/// True if `name` survives the comma-joined query encoding.
pub fn is_selectable_specialty(name: &str) -> bool {
    !name.is_empty() && !name.contains(SPECIALTY_SEPARATOR)
}

/// Multi-select specialty filter.
///
/// Names are kept in the order they were switched on so the encoded query
/// string is stable, but equality only looks at membership. Empty names and
/// names containing the separator are never selected.
#[derive(Debug, Clone, Default)]
pub struct SpecialtySelection(Vec<String>);

impl SpecialtySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` if absent, removes it if present. Returns whether the
    /// specialty is selected afterwards. Unselectable names are ignored.
    pub fn toggle(&mut self, name: &str) -> bool {
        if !is_selectable_specialty(name) {
            return false;
        }
        if let Some(pos) = self.0.iter().position(|s| s == name) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(name.to_string());
            true
        }
    }

    /// Adds `name` unless it is unselectable or already selected.
    pub fn insert(&mut self, name: impl Into<String>) {
        let name = name.into();
        if is_selectable_specialty(&name) && !self.contains(&name) {
            self.0.push(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|s| s == name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Selected names in toggle order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// True if no specialty is selected or the doctor has any selected one.
    pub fn admits(&self, doctor: &Doctor) -> bool {
        self.is_empty() || doctor.specialty_names().any(|name| self.contains(name))
    }
}

impl PartialEq for SpecialtySelection {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|name| other.contains(name))
    }
}

impl Eq for SpecialtySelection {}

impl<S: Into<String>> FromIterator<S> for SpecialtySelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for name in iter {
            selection.insert(name);
        }
        selection
    }
}

/// Everything the user has chosen on the listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub mode: ConsultationMode,
    pub specialties: SpecialtySelection,
    pub sort: SortKey,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Runs every stage over `doctors` and returns the surviving records in
/// display order.
pub fn apply(doctors: &[Doctor], state: &FilterState) -> Vec<Doctor> {
    let needle = state.search.to_lowercase();

    let mut filtered: Vec<Doctor> = doctors
        .iter()
        .filter(|d| needle.is_empty() || name_matches(d, &needle))
        .filter(|d| state.mode.admits(d))
        .filter(|d| state.specialties.admits(d))
        .cloned()
        .collect();

    // sort_by_key is stable, ties keep their input order.
    match state.sort {
        SortKey::Original => {}
        SortKey::FeesAscending => filtered.sort_by_key(|d| numeric_fees(&d.fees)),
        SortKey::ExperienceDescending => {
            filtered.sort_by_key(|d| Reverse(numeric_experience(&d.experience)))
        }
    }

    filtered
}

fn name_matches(doctor: &Doctor, needle_lowercase: &str) -> bool {
    doctor.name.to_lowercase().contains(needle_lowercase)
}

/// Distinct specialty names across `doctors`, sorted.
pub fn available_specialties(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(Doctor::specialty_names)
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// First `limit` doctors whose name contains `term`, in input order.
pub fn suggestions<'a>(doctors: &'a [Doctor], term: &str, limit: usize) -> Vec<&'a Doctor> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    doctors
        .iter()
        .filter(|d| name_matches(d, &needle))
        .take(limit)
        .collect()
}
