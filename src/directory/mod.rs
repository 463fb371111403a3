//! Doctor directory core.
//!
//! # Data Flow
//! ```text
//! DoctorSource (fetched once)
//!     → controller.rs (owns FilterState + dataset)
//!     → filter.rs     (pure: doctors × state → filtered doctors)
//!     → query.rs      (state ⇄ URL query string)
//!
//! extract.rs turns fee / experience text into sort keys
//! model.rs   is the upstream record shape
//! ```
//!
//! # Design Decisions
//! - Everything below the controller is a pure, synchronous function
//! - The URL is a mirror of the state, never the source of truth after mount
//! - Malformed fields degrade to neutral values instead of failing

pub mod controller;
pub mod extract;
pub mod filter;
pub mod model;
pub mod query;

pub use controller::{Location, MemoryLocation, PageController, Phase};
pub use filter::{apply, ConsultationMode, FilterState, SortKey, SpecialtySelection};
pub use model::{Doctor, Specialty};
