//! Configuration types and constants.
//!
//! This module defines the library configuration struct, the logging enums used
//! by the CLI, and the operational constants of the validation pipeline.

mod constants;
mod types;

// Re-export public API
pub use constants::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, EARTH_RADIUS_METRES, GEOCODING_BASE_URL,
    GEOCODING_LANGUAGE, GEOCODING_LIMIT, MAPBOX_TOKEN_ENV, MAX_PLAUSIBLE_DISTANCE_KM,
};
pub use types::{Config, LogFormat, LogLevel};
