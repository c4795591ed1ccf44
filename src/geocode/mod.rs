//! Forward-geocoding client.
//!
//! Thin client for the Mapbox places API. One operation: turn a free-text
//! query into the best-matching [`Feature`], or `None` when the service has
//! no answer. Transport and HTTP failures surface as [`GeocodingError`] and
//! halt the pipeline.

use std::sync::Arc;

use log::debug;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::{GEOCODING_BASE_URL, GEOCODING_LANGUAGE};

/// Reasons a geocoding probe failed outright.
#[derive(Error, Debug)]
pub enum GeocodingError {
    /// The request could not be completed (DNS, connect, TLS, timeout, ...).
    #[error("geocoding request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("geocoding service returned {0}")]
    Status(StatusCode),

    /// The configured base URL could not be turned into a request URL.
    #[error("invalid geocoding base URL: {0}")]
    BaseUrl(String),
}

/// A single geocoding result.
///
/// Only `center` is interpreted by the pipeline; everything else the service
/// returns is carried through verbatim into the report.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Feature {
    /// Result coordinates as `[lng, lat]`.
    pub center: [f64; 2],
    /// Remaining feature fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

/// Client for the forward-geocoding service.
///
/// Holds an immutable access token and shares the HTTP transport with the
/// page fetcher; safe for concurrent use.
#[derive(Debug, Clone)]
pub struct GeocoderClient {
    client: Arc<reqwest::Client>,
    base_url: String,
    access_token: String,
}

impl GeocoderClient {
    /// Creates a client against the production geocoding endpoint.
    pub fn new(client: Arc<reqwest::Client>, access_token: String) -> Self {
        Self::with_base_url(client, access_token, GEOCODING_BASE_URL.to_string())
    }

    /// Creates a client against a custom base URL (e.g. a mock server in tests).
    pub fn with_base_url(
        client: Arc<reqwest::Client>,
        access_token: String,
        base_url: String,
    ) -> Self {
        Self {
            client,
            base_url,
            access_token,
        }
    }

    fn request_url(&self, query: &str, limit: u32) -> Result<Url, GeocodingError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GeocodingError::BaseUrl(format!("{}: {e}", self.base_url)))?;

        // The query is a single path segment; path_segments_mut percent-encodes
        // '#', '?', '/' and friends as required by the API.
        url.path_segments_mut()
            .map_err(|()| GeocodingError::BaseUrl(self.base_url.clone()))?
            .extend(["geocoding", "v5", "mapbox.places"])
            .push(&format!("{query}.json"));

        url.query_pairs_mut()
            .append_pair("language", GEOCODING_LANGUAGE)
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", &limit.to_string());

        Ok(url)
    }

    /// Forward-geocodes a free-text query.
    ///
    /// Returns the first feature of the response, or `None` when the service
    /// found nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`GeocodingError`] on transport failure or non-2xx status.
    pub async fn forward_geocode(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Option<Feature>, GeocodingError> {
        let url = self.request_url(query, limit)?;
        debug!("Geocoding query: {query:?}");

        let response = self.client.get(url).send().await.inspect_err(|e| {
            debug!("Geocoding request failed: {e}");
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!("Geocoding service returned {status}");
            return Err(GeocodingError::Status(status));
        }

        let body: GeocodingResponse = response.json().await.inspect_err(|e| {
            debug!("Geocoding response was not valid JSON: {e}");
        })?;

        Ok(body.features.into_iter().next())
    }
}
