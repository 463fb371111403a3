use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    response::Response,
    Json,
};

use crate::directory::controller::{Location, MemoryLocation, PageController};
use crate::http::request::RequestIdExt;
use crate::http::response::{raw_json, upstream_failure, ListingView, SystemStatus};
use crate::upstream::DoctorClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<DoctorClient>,
}

/// `GET /api/doctors`: the upstream dataset, unchanged.
pub async fn doctors(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.upstream.fetch_raw().await {
        Ok(body) => raw_json(body),
        Err(e) => {
            tracing::error!(
                request_id = %headers.request_id(),
                error = %e,
                "Error fetching doctor data"
            );
            upstream_failure()
        }
    }
}

/// `GET /api/listing?search=..&mode=..&specialties=..&sort=..`
///
/// One page lifecycle per request: fetch, hydrate from the query, filter.
pub async fn listing(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<ListingView> {
    let mut page = PageController::new(MemoryLocation::new(query.unwrap_or_default()));
    page.mount(state.upstream.as_ref()).await;

    tracing::debug!(
        total = page.doctors().len(),
        shown = page.filtered().len(),
        query = %page.location().query(),
        "Listing rendered"
    );
    Json(ListingView::from_page(&page))
}

/// `GET /status`
pub async fn status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        upstream: state.upstream.endpoint().to_string(),
    })
}
