//! Metrics collection and exposition.
//!
//! # Metrics
//! - `directory_requests_total` (counter): inbound requests by method, route, status
//! - `directory_request_duration_seconds` (histogram): inbound latency
//! - `directory_upstream_fetches_total` (counter): dataset fetches by outcome
//! - `directory_upstream_fetch_duration_seconds` (histogram): dataset fetch latency
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exposition is opt-in via `observability.metrics_enabled`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    ::metrics::counter!(
        "directory_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!(
        "directory_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .record(elapsed);
}

/// Record one upstream dataset fetch. `outcome` is `"ok"` or an error kind.
pub fn record_upstream_fetch(outcome: &'static str, start: Instant) {
    ::metrics::counter!("directory_upstream_fetches_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("directory_upstream_fetch_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
