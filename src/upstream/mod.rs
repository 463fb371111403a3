//! Doctor dataset retrieval.
//!
//! # Data Flow
//! ```text
//! upstream JSON endpoint (or the /api/doctors proxy)
//!     → client.rs (one GET, no cache, no retry)
//!     → raw bytes        → proxied verbatim by the HTTP layer
//!     → Vec<Doctor>      → handed to the page controller
//! ```
//!
//! # Design Decisions
//! - A fetch is attempted exactly once; callers decide how to degrade
//! - `DoctorSource` is the seam the page controller depends on, so tests can
//!   feed it fixed data

pub mod client;
pub mod error;

use std::future::Future;

use crate::directory::model::Doctor;

pub use client::{DoctorClient, DEFAULT_UPSTREAM_URL};
pub use error::FetchError;

/// Anything that can produce the full doctor list in one shot.
pub trait DoctorSource: Send + Sync {
    fn fetch_doctors(&self) -> impl Future<Output = Result<Vec<Doctor>, FetchError>> + Send;
}
