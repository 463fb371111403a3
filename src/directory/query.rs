//! Mapping between `FilterState` and the URL query string.
//!
//! Keys: `search`, `mode` (`video_consult` | `in_clinic`), `specialties`
//! (comma-joined names, in toggle order) and `sort` (`fees` | `experience`).
//! Default values are never written. Decoding never fails: unknown values
//! fall back to the defaults.

use url::form_urlencoded;

use crate::directory::filter::{
    ConsultationMode, FilterState, SortKey, SpecialtySelection, SPECIALTY_SEPARATOR,
};

pub const SEARCH_KEY: &str = "search";
pub const MODE_KEY: &str = "mode";
pub const SPECIALTIES_KEY: &str = "specialties";
pub const SORT_KEY: &str = "sort";

/// Query pairs for `state`, in canonical key order.
pub fn to_query(state: &FilterState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::with_capacity(4);

    if !state.search.is_empty() {
        pairs.push((SEARCH_KEY, state.search.clone()));
    }
    if let Some(mode) = state.mode.as_query_value() {
        pairs.push((MODE_KEY, mode.to_string()));
    }
    if !state.specialties.is_empty() {
        let joined = state
            .specialties
            .iter()
            .collect::<Vec<_>>()
            .join(SPECIALTY_SEPARATOR);
        pairs.push((SPECIALTIES_KEY, joined));
    }
    if let Some(sort) = state.sort.as_query_value() {
        pairs.push((SORT_KEY, sort.to_string()));
    }

    pairs
}

/// Form-urlencoded query string for `state`, without a leading `?`.
pub fn to_query_string(state: &FilterState) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(to_query(state))
        .finish()
}

/// Rebuilds a `FilterState` from key/value pairs.
///
/// The first occurrence of each key wins and unrelated keys are ignored.
pub fn from_query<I, K, V>(pairs: I) -> FilterState
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut search = None;
    let mut mode = None;
    let mut specialties = None;
    let mut sort = None;

    for (key, value) in pairs {
        let value = value.as_ref();
        let slot = match key.as_ref() {
            SEARCH_KEY => &mut search,
            MODE_KEY => &mut mode,
            SPECIALTIES_KEY => &mut specialties,
            SORT_KEY => &mut sort,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    FilterState {
        search: search.unwrap_or_default(),
        mode: mode
            .as_deref()
            .map(ConsultationMode::from_query_value)
            .unwrap_or_default(),
        specialties: specialties
            .as_deref()
            .map(split_specialties)
            .unwrap_or_default(),
        sort: sort
            .as_deref()
            .map(SortKey::from_query_value)
            .unwrap_or_default(),
    }
}

/// Parses a raw query string; a leading `?` is accepted.
pub fn from_query_string(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    from_query(form_urlencoded::parse(query.as_bytes()))
}

fn split_specialties(value: &str) -> SpecialtySelection {
    value
        .split(SPECIALTY_SEPARATOR)
        .filter(|name| !name.is_empty())
        .collect()
}
