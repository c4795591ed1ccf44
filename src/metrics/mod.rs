//! Per-metric validation records.
//!
//! Each page is judged on six metrics: the five head meta tags plus the
//! synthetic plausibility check. A [`MetricMap`] holds one [`MetricRecord`]
//! per metric; it is created fresh at the start of each `validate` call,
//! mutated only by the pipeline, and frozen into the report at the end.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use strum_macros::EnumIter;

/// The six validation aspects of a page's geo metadata.
///
/// The first five map 1:1 to head meta tags; `Plausibility` is synthetic.
/// Serializes to the meta-tag name (`geo.position`, `ICBM`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize)]
pub enum Metric {
    /// `<meta name="geo.position">` — `"<lat>;<lng>"`
    #[serde(rename = "geo.position")]
    Position,
    /// `<meta name="geo.region">` — `"<CC>-<SUB>"`
    #[serde(rename = "geo.region")]
    Region,
    /// `<meta name="geo.placename">` — free text
    #[serde(rename = "geo.placename")]
    Placename,
    /// `<meta name="ICBM">` — `"<lat>,<lng>"`
    #[serde(rename = "ICBM")]
    Icbm,
    /// `<meta name="DC.title">` — free text
    #[serde(rename = "DC.title")]
    DcTitle,
    /// Distance check between the declared position and the geocoded placename
    #[serde(rename = "plausibility")]
    Plausibility,
}

/// The metrics that must all be valid for the page to count as successful.
/// `ICBM` and `DC.title` contribute to the report but not to success.
pub const MUST_BE_VALID: [Metric; 4] = [
    Metric::Position,
    Metric::Region,
    Metric::Placename,
    Metric::Plausibility,
];

impl Metric {
    /// The meta-tag name used in reports and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Position => "geo.position",
            Metric::Region => "geo.region",
            Metric::Placename => "geo.placename",
            Metric::Icbm => "ICBM",
            Metric::DcTitle => "DC.title",
            Metric::Plausibility => "plausibility",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation state of a single metric.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricRecord {
    /// Raw outer HTML of the source tag; empty if the tag was absent (and for
    /// `plausibility`, which has no source tag).
    pub context: String,
    /// Human-readable validation errors, in the order they were found.
    pub errors: Vec<String>,
    /// Metric-specific parsed values (`lat`, `country_shortcode`, `distance`, ...).
    pub data: BTreeMap<String, Value>,
    /// True iff `errors` was empty when the metric was finalized.
    pub is_valid: bool,
}

/// The six metric records of one `validate` call.
///
/// Each metric moves monotonically from pending to either valid or errored
/// when [`MetricMap::finalize`] runs; the pipeline never revisits a finalized
/// metric.
#[derive(Debug)]
pub struct MetricMap {
    records: BTreeMap<Metric, MetricRecord>,
}

impl MetricMap {
    /// Creates a fresh map with all six metrics pending.
    pub fn new() -> Self {
        let records = [
            Metric::Position,
            Metric::Region,
            Metric::Placename,
            Metric::Icbm,
            Metric::DcTitle,
            Metric::Plausibility,
        ]
        .into_iter()
        .map(|metric| (metric, MetricRecord::default()))
        .collect();
        Self { records }
    }

    fn record_mut(&mut self, metric: Metric) -> &mut MetricRecord {
        self.records.entry(metric).or_default()
    }

    /// Stores the raw HTML of the source tag.
    pub fn set_context(&mut self, metric: Metric, context: String) {
        self.record_mut(metric).context = context;
    }

    /// Appends a validation error to the metric.
    pub fn add_error(&mut self, metric: Metric, msg: impl Into<String>) {
        self.record_mut(metric).errors.push(msg.into());
    }

    /// Stores a parsed value under the metric.
    pub fn add_data(&mut self, metric: Metric, key: &str, value: impl Into<Value>) {
        self.record_mut(metric).data.insert(key.to_string(), value.into());
    }

    /// Returns a stored value, if present.
    pub fn data(&self, metric: Metric, key: &str) -> Option<&Value> {
        self.records.get(&metric)?.data.get(key)
    }

    /// Returns a stored string value, if present and a string.
    pub fn data_str(&self, metric: Metric, key: &str) -> Option<&str> {
        self.data(metric, key)?.as_str()
    }

    /// Whether the metric has been finalized as valid.
    pub fn is_valid(&self, metric: Metric) -> bool {
        self.records.get(&metric).is_some_and(|r| r.is_valid)
    }

    /// Finalizes the metric: valid iff no errors were recorded.
    pub fn finalize(&mut self, metric: Metric) {
        let record = self.record_mut(metric);
        record.is_valid = record.errors.is_empty();
    }

    /// Freezes the map into its records for the report.
    pub fn into_records(self) -> BTreeMap<Metric, MetricRecord> {
        self.records
    }
}

impl Default for MetricMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_fresh_map_has_all_six_metrics_pending() {
        let map = MetricMap::new();
        let records = map.into_records();
        assert_eq!(records.len(), 6);
        for metric in Metric::iter() {
            let record = &records[&metric];
            assert!(record.context.is_empty());
            assert!(record.errors.is_empty());
            assert!(record.data.is_empty());
            assert!(!record.is_valid);
        }
    }

    #[test]
    fn test_finalize_without_errors_marks_valid() {
        let mut map = MetricMap::new();
        map.finalize(Metric::Placename);
        assert!(map.is_valid(Metric::Placename));
    }

    #[test]
    fn test_finalize_with_errors_marks_invalid() {
        let mut map = MetricMap::new();
        map.add_error(Metric::Placename, r#"No "Placename" value."#);
        map.finalize(Metric::Placename);
        assert!(!map.is_valid(Metric::Placename));

        let records = map.into_records();
        let record = &records[&Metric::Placename];
        assert_eq!(record.is_valid, record.errors.is_empty());
    }

    #[test]
    fn test_pending_metric_is_not_valid() {
        let map = MetricMap::new();
        assert!(!map.is_valid(Metric::Position));
    }

    #[test]
    fn test_data_round_trip() {
        let mut map = MetricMap::new();
        map.add_data(Metric::Position, "lat", "14.59");
        map.add_data(Metric::Region, "country", Value::Null);

        assert_eq!(map.data_str(Metric::Position, "lat"), Some("14.59"));
        assert_eq!(map.data(Metric::Region, "country"), Some(&Value::Null));
        assert_eq!(map.data_str(Metric::Region, "country"), None);
        assert_eq!(map.data_str(Metric::Position, "lng"), None);
    }

    #[test]
    fn test_metric_serializes_to_tag_name() {
        for metric in Metric::iter() {
            let json = serde_json::to_value(metric).expect("metric should serialize");
            assert_eq!(json, Value::String(metric.as_str().to_string()));
        }
    }

    #[test]
    fn test_metric_map_keys_serialize_as_tag_names() {
        let map = MetricMap::new();
        let json = serde_json::to_value(map.into_records()).expect("records should serialize");
        let object = json.as_object().expect("should be an object");
        assert!(object.contains_key("geo.position"));
        assert!(object.contains_key("ICBM"));
        assert!(object.contains_key("DC.title"));
        assert!(object.contains_key("plausibility"));
    }
}
