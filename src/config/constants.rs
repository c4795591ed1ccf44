//! Configuration constants.
//!
//! All operational constants of the validation pipeline: network timeouts, the
//! geocoding endpoint, and the plausibility distance threshold.

/// Per-request timeout in seconds, applied to both the page fetch and the
/// geocoder probe. Exceeding it surfaces as the corresponding halt.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via `Config::user_agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("geo_validator/", env!("CARGO_PKG_VERSION"));

/// Base URL of the forward-geocoding service.
///
/// The full request path is
/// `{base}/geocoding/v5/mapbox.places/{query}.json?language=…&access_token=…&limit=…`.
/// Overridable via `Config::geocoding_url` so tests can point at a mock server.
pub const GEOCODING_BASE_URL: &str = "https://api.mapbox.com";

/// Language preference sent with every geocoding request.
pub const GEOCODING_LANGUAGE: &str = "en-US";

/// Number of features requested from the geocoder.
pub const GEOCODING_LIMIT: u32 = 1;

/// Environment variable holding the geocoder access token.
pub const MAPBOX_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Earth radius in metres used by the haversine distance (WGS-84 equatorial).
pub const EARTH_RADIUS_METRES: f64 = 6_378_137.0;

/// Maximum distance in kilometres between the declared position and the
/// geocoded location before the plausibility check fails. Exactly this
/// distance is still plausible.
pub const MAX_PLAUSIBLE_DISTANCE_KM: f64 = 25.0;
