//! geo_validator library: HTML geo-metadata validation
//!
//! This library fetches an HTML page, extracts the geolocation meta tags from its
//! `<head>` (`geo.position`, `geo.region`, `geo.placename`, `ICBM`, `DC.title`),
//! validates each tag structurally and semantically, cross-checks them for mutual
//! consistency, and probes the declared location against a forward-geocoding
//! service to test real-world plausibility.
//!
//! # Example
//!
//! ```no_run
//! use geo_validator::{Config, Validator};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     access_token: std::env::var("MAPBOX_ACCESS_TOKEN")?,
//!     ..Default::default()
//! };
//!
//! let validator = Validator::new(&config)?;
//! let report = validator.validate("https://example.com").await;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
mod distance;
pub mod error_handling;
pub mod fetch;
pub mod geocode;
pub mod initialization;
pub mod metrics;
mod parse;
pub mod report;
pub mod shortcodes;
pub mod validator;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::ValidationHalt;
pub use metrics::{Metric, MetricMap, MetricRecord};
pub use report::Report;
pub use shortcodes::{EmbeddedShortcodeDirectory, ShortcodeDirectory};
pub use validator::Validator;
