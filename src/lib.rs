//! Doctor directory: listing, filtering and URL-state for a doctor dataset,
//! served behind a passthrough proxy.

pub mod config;
pub mod directory;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::DirectoryConfig;
pub use directory::{FilterState, PageController};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
