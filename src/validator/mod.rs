//! The validation pipeline.
//!
//! One operation: [`Validator::validate`]. The pipeline runs as a linear
//! sequence of steps over a [`MetricMap`] owned by the call:
//!
//! 1. URL normalization
//! 2. fetch & head extraction
//! 3. the five tag validators (position, region, placename, ICBM, DC.title)
//! 4. the plausibility probe against the geocoder
//! 5. report assembly
//!
//! Cross-metric dependencies (ICBM ↔ position, plausibility ↔ position +
//! region) are explicit reads of already-finalized metric records. Transport
//! and structural failures short-circuit into a halted report; per-metric
//! validation errors never halt.

mod plausibility;
mod tags;

use std::sync::Arc;

use log::info;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::Config;
use crate::error_handling::{InitializationError, ValidationHalt};
use crate::fetch;
use crate::geocode::GeocoderClient;
use crate::initialization::init_client;
use crate::metrics::{MetricMap, MUST_BE_VALID};
use crate::parse::{self, HeadTags, TagHandle};
use crate::report::Report;
use crate::shortcodes::{EmbeddedShortcodeDirectory, ShortcodeDirectory};

/// Validates the geographic metadata of HTML pages.
///
/// Holds only shared, read-only resources (HTTP client, geocoder client,
/// shortcode directory); all per-request state lives inside each
/// [`validate`](Validator::validate) call, so one `Validator` can serve
/// concurrent calls.
pub struct Validator {
    client: Arc<reqwest::Client>,
    geocoder: GeocoderClient,
    shortcodes: Arc<dyn ShortcodeDirectory>,
}

impl Validator {
    /// Creates a validator from a config, using the embedded shortcode
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an [`InitializationError`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        Self::with_directory(config, Arc::new(EmbeddedShortcodeDirectory))
    }

    /// Creates a validator with a caller-provided shortcode directory.
    ///
    /// # Errors
    ///
    /// Returns an [`InitializationError`] if the HTTP client cannot be built.
    pub fn with_directory(
        config: &Config,
        shortcodes: Arc<dyn ShortcodeDirectory>,
    ) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        let geocoder = GeocoderClient::with_base_url(
            Arc::clone(&client),
            config.access_token.clone(),
            config.geocoding_url.clone(),
        );
        Ok(Self {
            client,
            geocoder,
            shortcodes,
        })
    }

    /// Validates the geo metadata of the page at `url`.
    ///
    /// Always returns a report: either completed (possibly with
    /// `is_successful = false`) or halted when fetch, URL parsing, or
    /// geocoding failed outright.
    pub async fn validate(&self, url: &str) -> Report {
        match self.run(url).await {
            Ok(report) => report,
            Err(halt) => {
                info!("Validation of {url} halted: {halt}");
                Report::halted(&halt)
            }
        }
    }

    /// Validates `url`, abandoning the call when `cancel` fires.
    ///
    /// On cancellation any in-flight request is dropped and the report is
    /// halted with message `cancelled`; no partial metric state is surfaced.
    pub async fn validate_with_cancel(&self, url: &str, cancel: &CancellationToken) -> Report {
        tokio::select! {
            report = self.validate(url) => report,
            () = cancel.cancelled() => Report::halted(&ValidationHalt::Cancelled),
        }
    }

    async fn run(&self, url: &str) -> Result<Report, ValidationHalt> {
        let url = parse_target_url(url)?;
        let html = fetch::fetch_html(&self.client, &url).await?;
        let head = parse::extract_head_tags(&html);

        let mut metrics = MetricMap::new();
        tags::validate_position(head.position.as_ref(), &mut metrics);
        tags::validate_region(head.region.as_ref(), self.shortcodes.as_ref(), &mut metrics);
        tags::validate_placename(head.placename.as_ref(), &mut metrics);
        tags::validate_icbm(head.icbm.as_ref(), &mut metrics);
        tags::validate_dc_title(head.dc_title.as_ref(), &mut metrics);
        plausibility::validate_plausibility(&self.geocoder, &mut metrics).await?;

        Ok(assemble_report(&url, &head, metrics))
    }
}

/// Parses and checks the input URL (Step A).
///
/// Only absolute http/https URLs are accepted.
fn parse_target_url(raw: &str) -> Result<Url, ValidationHalt> {
    let parsed = Url::parse(raw).map_err(|_| ValidationHalt::InvalidUrl)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ValidationHalt::InvalidUrl),
    }
}

/// Builds the completed report: title, resolved favicon, canonical URL,
/// frozen metric records, and the overall success flag.
fn assemble_report(url: &Url, head: &HeadTags, metrics: MetricMap) -> Report {
    let is_successful = MUST_BE_VALID.iter().all(|&metric| metrics.is_valid(metric));

    Report::Completed {
        title: head.title.clone().unwrap_or_default(),
        favicon: resolve_favicon(url, head.favicon.as_ref()),
        url: url.to_string(),
        metrics: metrics.into_records(),
        is_successful,
    }
}

/// Resolves the favicon `href` against the page URL (RFC 3986 reference
/// resolution). `None` when the link is absent or has an empty `href`.
fn resolve_favicon(url: &Url, favicon: Option<&TagHandle>) -> Option<String> {
    let href = favicon?.value.as_str();
    if href.is_empty() {
        return None;
    }
    url.join(href).ok().map(|resolved| resolved.to_string())
}
