//! HTTP client for the doctor dataset.
//!
//! # Responsibilities
//! - GET the configured endpoint once per call
//! - Treat non-2xx answers and non-JSON bodies as failures
//! - Record fetch outcome and latency

use std::time::Instant;

use axum::body::Bytes;
use serde::de::IgnoredAny;
use url::Url;

use crate::config::UpstreamConfig;
use crate::directory::model::{decode_doctors, Doctor};
use crate::observability::metrics;
use crate::upstream::{DoctorSource, FetchError};

/// Public mock dataset the directory is built around.
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Client bound to one doctor-list endpoint.
#[derive(Debug, Clone)]
pub struct DoctorClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl DoctorClient {
    /// Create a client for `endpoint` (must be http or https).
    pub fn new(endpoint: &str) -> Result<Self, FetchError> {
        Self::build(endpoint, true)
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, FetchError> {
        Self::build(&config.url, config.use_system_proxy)
    }

    fn build(endpoint: &str, use_system_proxy: bool) -> Result<Self, FetchError> {
        let endpoint = parse_endpoint(endpoint)?;
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("doctor-directory/", env!("CARGO_PKG_VERSION")));
        if !use_system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            http: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the body verbatim.
    ///
    /// The body is only checked to be well-formed JSON; its shape is not
    /// inspected.
    pub async fn fetch_raw(&self) -> Result<Bytes, FetchError> {
        let start = Instant::now();
        let result = self.get_json_body().await;
        if let Ok(body) = &result {
            tracing::debug!(endpoint = %self.endpoint, bytes = body.len(), "Fetched doctor list");
        }
        self.record_fetch(&result, start);
        result
    }

    // Outcome is recorded once per call, after the last step that can fail.
    fn record_fetch<T>(&self, result: &Result<T, FetchError>, start: Instant) {
        match result {
            Ok(_) => metrics::record_upstream_fetch("ok", start),
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "Doctor list fetch failed");
                metrics::record_upstream_fetch(e.kind(), start);
            }
        }
    }

    async fn get_json_body(&self) -> Result<Bytes, FetchError> {
        let response = self.http.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<IgnoredAny>(&body)?;
        Ok(body)
    }
}

impl DoctorSource for DoctorClient {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, FetchError> {
        let start = Instant::now();
        let result = match self.get_json_body().await {
            Ok(body) => decode_doctors(&body).map_err(FetchError::from),
            Err(e) => Err(e),
        };
        if let Ok(doctors) = &result {
            tracing::debug!(endpoint = %self.endpoint, doctors = doctors.len(), "Decoded doctor list");
        }
        self.record_fetch(&result, start);
        result
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidEndpoint {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_must_be_http() {
        assert!(DoctorClient::new("http://127.0.0.1:3000/api/doctors").is_ok());
        assert!(DoctorClient::new(DEFAULT_UPSTREAM_URL).is_ok());

        let err = DoctorClient::new("ftp://example.org/doctors.json").unwrap_err();
        assert_eq!(err.kind(), "invalid_endpoint");

        let err = DoctorClient::new("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidEndpoint { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails() {
        // Port 9 (discard) is not expected to be listening locally.
        let client = DoctorClient::new("http://127.0.0.1:9/doctors.json").unwrap();
        assert!(client.fetch_doctors().await.is_err());
    }
}
