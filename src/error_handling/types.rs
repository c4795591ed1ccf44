//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::fetch::FetchError;
use crate::geocode::GeocodingError;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    Logger(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClient(#[from] ReqwestError),
}

/// Failures that abort the validation pipeline.
///
/// The Display form of each variant is the `halted_msg` the caller sees in the
/// halted report, so the messages are deliberately short and user-facing.
#[derive(Error, Debug)]
pub enum ValidationHalt {
    /// The input was not a syntactically valid absolute http/https URL.
    #[error("Invalid url.")]
    InvalidUrl,

    /// The target URL could not be fetched (transport failure or non-2xx).
    #[error("Could not access URL.")]
    Fetch(#[source] FetchError),

    /// The target URL returned an empty body.
    #[error("HTML is empty.")]
    EmptyHtml,

    /// The geocoding probe failed (transport failure or non-2xx).
    #[error("Geocoding error.")]
    Geocoding(#[source] GeocodingError),

    /// The calling context was cancelled while a request was in flight.
    #[error("cancelled")]
    Cancelled,
}

impl From<FetchError> for ValidationHalt {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::EmptyBody => ValidationHalt::EmptyHtml,
            other => ValidationHalt::Fetch(other),
        }
    }
}

impl From<GeocodingError> for ValidationHalt {
    fn from(e: GeocodingError) -> Self {
        ValidationHalt::Geocoding(e)
    }
}
