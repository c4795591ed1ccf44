//! The plausibility probe (Step H).
//!
//! Forward-geocodes "placename region country" and compares the result's
//! center against the declared `geo.position`. Only runs when both position
//! and region validated; a transport or HTTP failure of the geocoder halts
//! the whole pipeline, an empty result set only fails this metric.

use log::debug;

use crate::config::{GEOCODING_LIMIT, MAX_PLAUSIBLE_DISTANCE_KM};
use crate::distance::haversine_metres;
use crate::error_handling::ValidationHalt;
use crate::geocode::GeocoderClient;
use crate::metrics::{Metric, MetricMap};

const METRIC: Metric = Metric::Plausibility;

pub(super) async fn validate_plausibility(
    geocoder: &GeocoderClient,
    metrics: &mut MetricMap,
) -> Result<(), ValidationHalt> {
    let anchor = plausibility_anchor(metrics);

    let Some((lat, lng)) = anchor else {
        metrics.add_error(METRIC, "Could not perform plausibility check.");
        metrics.finalize(METRIC);
        return Ok(());
    };

    let query = build_query(metrics);
    metrics.add_data(METRIC, "query", query.as_str());

    let feature = geocoder.forward_geocode(&query, GEOCODING_LIMIT).await?;

    match feature {
        Some(feature) => {
            // center is [lng, lat]
            let km = haversine_metres(lat, lng, feature.center[1], feature.center[0]) / 1000.0;
            debug!("Plausibility distance for {query:?}: {km}km");

            metrics.add_data(
                METRIC,
                "feature",
                serde_json::to_value(&feature).unwrap_or_default(),
            );
            metrics.add_data(METRIC, "distance", format_km(km));

            if km > MAX_PLAUSIBLE_DISTANCE_KM {
                metrics.add_error(
                    METRIC,
                    "The position seems too far away from the geocoding result.",
                );
            }
        }
        None => metrics.add_error(METRIC, "Geocoding error."),
    }

    metrics.finalize(METRIC);
    Ok(())
}

/// The declared coordinates the probe compares against, available only when
/// both position and region validated.
fn plausibility_anchor(metrics: &MetricMap) -> Option<(f64, f64)> {
    if !metrics.is_valid(Metric::Position) || !metrics.is_valid(Metric::Region) {
        return None;
    }
    let lat = metrics.data_str(Metric::Position, "lat")?.parse().ok()?;
    let lng = metrics.data_str(Metric::Position, "lng")?.parse().ok()?;
    Some((lat, lng))
}

/// Builds the geocoding query `"<placename> <region> <country>"`; parts that
/// never validated contribute an empty string.
fn build_query(metrics: &MetricMap) -> String {
    let placename = metrics.data_str(Metric::Placename, "content").unwrap_or("");
    let region = metrics.data_str(Metric::Region, "region").unwrap_or("");
    let country = metrics.data_str(Metric::Region, "country").unwrap_or("");
    format!("{placename} {region} {country}")
}

/// Formats a distance as a whole-kilometre figure with thousands separators,
/// rounding halves away from zero: `4.3` becomes `"4km"`, `9724.6` becomes
/// `"9,725km"`.
fn format_km(km: f64) -> String {
    let rounded = km.abs().round() as u64;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{grouped}km")
}
