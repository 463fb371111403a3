//! Response bodies and error mapping.
//!
//! # Responsibilities
//! - Forward the upstream dataset unchanged
//! - Map upstream failures to the fixed 500 payload
//! - Shape the listing page as JSON
//!
//! # Design Decisions
//! - The passthrough body is never re-serialized
//! - Listing responses are always 200: a failed fetch is an empty page

use axum::{
    body::Bytes,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::directory::controller::{Location, PageController};
use crate::directory::model::Doctor;
use crate::directory::query::to_query_string;

/// Error message returned when the dataset cannot be fetched.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch doctor data";

/// JSON error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// The fixed 500 answer for any upstream failure.
pub fn upstream_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: UPSTREAM_FAILURE_MESSAGE.to_string(),
        }),
    )
        .into_response()
}

/// A JSON body passed through byte-for-byte.
pub fn raw_json(body: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub upstream: String,
}

/// One doctor as shown on the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorCard {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub photo: Option<String>,
    pub specialties: Vec<String>,
    pub experience: String,
    pub fees: String,
    pub introduction: String,
    pub location: Option<String>,
    pub video_consult: bool,
    pub in_clinic: bool,
}

impl From<&Doctor> for DoctorCard {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
            initials: doctor.avatar_initials().to_string(),
            photo: doctor.photo.clone(),
            specialties: doctor.specialty_names().map(str::to_string).collect(),
            experience: doctor.experience.clone(),
            fees: doctor.fees.clone(),
            introduction: doctor.introduction().into_owned(),
            location: doctor.location_label(),
            video_consult: doctor.video_consult,
            in_clinic: doctor.in_clinic,
        }
    }
}

/// The active filters, in query-string vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiltersView {
    pub search: String,
    pub mode: Option<String>,
    pub specialties: Vec<String>,
    pub sort: Option<String>,
}

/// The whole listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingView {
    /// Query string reflecting the applied filters.
    pub query: String,
    pub heading: String,
    pub total: usize,
    pub count: usize,
    pub no_results: bool,
    pub filters: FiltersView,
    pub specialties: Vec<String>,
    pub suggestions: Vec<String>,
    pub doctors: Vec<DoctorCard>,
}

impl ListingView {
    pub fn from_page<L: Location>(page: &PageController<L>) -> Self {
        let state = page.state();
        Self {
            query: to_query_string(state),
            heading: page.heading(),
            total: page.doctors().len(),
            count: page.filtered().len(),
            no_results: page.no_results(),
            filters: FiltersView {
                search: state.search.clone(),
                mode: state.mode.as_query_value().map(str::to_string),
                specialties: state.specialties.iter().map(str::to_string).collect(),
                sort: state.sort.as_query_value().map(str::to_string),
            },
            specialties: page.specialties(),
            suggestions: page
                .suggestions()
                .into_iter()
                .map(|d| d.name.clone())
                .collect(),
            doctors: page.filtered().iter().map(DoctorCard::from).collect(),
        }
    }
}
