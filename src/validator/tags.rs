//! The five tag validators.
//!
//! Each validator reads one head tag handle, records context/data/errors on
//! the metric map, and finalizes its metric. The four independent validators
//! (position, region, placename, DC.title) can run in any order; ICBM reads
//! the already-finalized position record for its equality cross-check.

use crate::metrics::{Metric, MetricMap};
use crate::parse::TagHandle;
use crate::shortcodes::ShortcodeDirectory;

/// A latitude string is valid when it parses to a finite number with
/// absolute value at most 90.
fn is_valid_lat(raw: &str) -> bool {
    raw.parse::<f64>()
        .map(|v| v.is_finite() && v.abs() <= 90.0)
        .unwrap_or(false)
}

/// A longitude string is valid when it parses to a finite number with
/// absolute value at most 180.
fn is_valid_lng(raw: &str) -> bool {
    raw.parse::<f64>()
        .map(|v| v.is_finite() && v.abs() <= 180.0)
        .unwrap_or(false)
}

fn missing_tag_error(metric: Metric) -> String {
    format!(r#"Could not find "{metric}" tag."#)
}

/// Validates `geo.position` (Step C): `"<lat>;<lng>"`.
pub(super) fn validate_position(tag: Option<&TagHandle>, metrics: &mut MetricMap) {
    const METRIC: Metric = Metric::Position;

    if let Some(handle) = tag {
        metrics.set_context(METRIC, handle.outer_html.clone());
        let parts: Vec<&str> = handle.value.split(';').map(str::trim).collect();

        match parts.first().copied().filter(|p| !p.is_empty()) {
            Some(lat) => {
                metrics.add_data(METRIC, "lat", lat);
                if !is_valid_lat(lat) {
                    metrics.add_error(METRIC, r#"Invalid "Latitude" value."#);
                }
            }
            None => metrics.add_error(METRIC, r#"No "Latitude" value."#),
        }

        match parts.get(1).copied().filter(|p| !p.is_empty()) {
            Some(lng) => {
                metrics.add_data(METRIC, "lng", lng);
                if !is_valid_lng(lng) {
                    metrics.add_error(METRIC, r#"Invalid "Longitude" value."#);
                }
            }
            None => metrics.add_error(METRIC, r#"No "Longitude" value."#),
        }
    } else {
        metrics.add_error(METRIC, missing_tag_error(METRIC));
    }

    metrics.finalize(METRIC);
}

/// Validates `geo.region` (Step D): `"<CC>-<SUB>"`.
///
/// Splits on every hyphen; region codes containing hyphens would misparse.
/// Known quirk, kept for compatibility with existing pages.
pub(super) fn validate_region(
    tag: Option<&TagHandle>,
    directory: &dyn ShortcodeDirectory,
    metrics: &mut MetricMap,
) {
    const METRIC: Metric = Metric::Region;

    if let Some(handle) = tag {
        metrics.set_context(METRIC, handle.outer_html.clone());
        let parts: Vec<&str> = handle.value.split('-').map(str::trim).collect();
        let country_code = parts.first().copied().unwrap_or("");

        if country_code.is_empty() {
            metrics.add_error(METRIC, r#"No "Country" value."#);
        } else {
            metrics.add_data(METRIC, "country_shortcode", country_code);
            let country_name = directory.country_name(country_code);
            metrics.add_data(METRIC, "country", serde_json::json!(country_name));
            if country_name.is_none() {
                metrics.add_error(METRIC, r#"Invalid "Country" value."#);
            }
        }

        match parts.get(1).copied().filter(|p| !p.is_empty()) {
            Some(region_code) => {
                metrics.add_data(METRIC, "region_shortcode", region_code);
                let region_name = directory.region_name(country_code, region_code);
                metrics.add_data(METRIC, "region", serde_json::json!(region_name));
                if region_name.is_none() {
                    metrics.add_error(METRIC, r#"Invalid "Region" value."#);
                }
            }
            None => metrics.add_error(METRIC, r#"No "Region" value."#),
        }
    } else {
        metrics.add_error(METRIC, missing_tag_error(METRIC));
    }

    metrics.finalize(METRIC);
}

/// Validates `geo.placename` (Step E): free text, must be non-empty.
pub(super) fn validate_placename(tag: Option<&TagHandle>, metrics: &mut MetricMap) {
    const METRIC: Metric = Metric::Placename;

    if let Some(handle) = tag {
        metrics.set_context(METRIC, handle.outer_html.clone());
        metrics.add_data(METRIC, "content", handle.value.as_str());
        if handle.value.is_empty() {
            metrics.add_error(METRIC, r#"No "Placename" value."#);
        }
    } else {
        metrics.add_error(METRIC, missing_tag_error(METRIC));
    }

    metrics.finalize(METRIC);
}

/// Validates `ICBM` (Step F): `"<lat>,<lng>"`, cross-checked against the
/// position record when that metric is valid.
///
/// The cross-check compares the raw trimmed strings, so `14.60` and `14.6000`
/// count as a mismatch even though they are numerically equal.
pub(super) fn validate_icbm(tag: Option<&TagHandle>, metrics: &mut MetricMap) {
    const METRIC: Metric = Metric::Icbm;

    if let Some(handle) = tag {
        metrics.set_context(METRIC, handle.outer_html.clone());
        let parts: Vec<&str> = handle.value.split(',').map(str::trim).collect();
        let position_is_valid = metrics.is_valid(Metric::Position);

        match parts.first().copied().filter(|p| !p.is_empty()) {
            Some(lat) => {
                metrics.add_data(METRIC, "lat", lat);
                if !is_valid_lat(lat) {
                    metrics.add_error(METRIC, r#"Invalid "Latitude" value."#);
                }
                if position_is_valid && metrics.data_str(Metric::Position, "lat") != Some(lat) {
                    metrics.add_error(METRIC, r#""Latitude" does not match "geo.position"."#);
                }
            }
            None => metrics.add_error(METRIC, r#"No "Latitude" value."#),
        }

        match parts.get(1).copied().filter(|p| !p.is_empty()) {
            Some(lng) => {
                metrics.add_data(METRIC, "lng", lng);
                if !is_valid_lng(lng) {
                    metrics.add_error(METRIC, r#"Invalid "Longitude" value."#);
                }
                if position_is_valid && metrics.data_str(Metric::Position, "lng") != Some(lng) {
                    metrics.add_error(METRIC, r#""Longitude" does not match "geo.position"."#);
                }
            }
            None => metrics.add_error(METRIC, r#"No "Longitude" value."#),
        }
    } else {
        metrics.add_error(METRIC, missing_tag_error(METRIC));
    }

    metrics.finalize(METRIC);
}

/// Validates `DC.title` (Step G): free text, must be non-empty.
pub(super) fn validate_dc_title(tag: Option<&TagHandle>, metrics: &mut MetricMap) {
    const METRIC: Metric = Metric::DcTitle;

    if let Some(handle) = tag {
        metrics.set_context(METRIC, handle.outer_html.clone());
        metrics.add_data(METRIC, "content", handle.value.as_str());
        if handle.value.is_empty() {
            metrics.add_error(METRIC, r#"No "DC.Title" value."#);
        }
    } else {
        metrics.add_error(METRIC, missing_tag_error(METRIC));
    }

    metrics.finalize(METRIC);
}
