//! The validation report.
//!
//! Every `validate` call produces exactly one [`Report`], in one of two
//! shapes: completed (the page was fetched and all six metrics were judged)
//! or halted (the pipeline stopped before any metric could be judged).
//! Both serialize to the flat JSON objects consumers expect.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error_handling::ValidationHalt;
use crate::metrics::{Metric, MetricRecord};

/// Outcome of one validation call.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// The page was fetched and all six metrics were judged.
    Completed {
        /// Text of the head `<title>`, empty when absent.
        title: String,
        /// Favicon URL resolved against the page URL, when declared.
        favicon: Option<String>,
        /// The normalized page URL.
        url: String,
        /// One record per metric, keyed by tag name.
        metrics: BTreeMap<Metric, MetricRecord>,
        /// True iff position, region, placename, and plausibility are all valid.
        is_successful: bool,
    },
    /// The pipeline stopped before judging metrics.
    Halted {
        /// Always true; distinguishes the halted shape in JSON.
        is_halted: bool,
        /// Short human-readable reason.
        halted_msg: String,
    },
}

impl Report {
    pub(crate) fn halted(halt: &ValidationHalt) -> Self {
        Report::Halted {
            is_halted: true,
            halted_msg: halt.to_string(),
        }
    }

    /// Whether the pipeline halted before judging metrics.
    pub fn is_halted(&self) -> bool {
        matches!(self, Report::Halted { .. })
    }

    /// Whether the page passed validation. Halted reports never pass.
    pub fn is_successful(&self) -> bool {
        matches!(
            self,
            Report::Completed {
                is_successful: true,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricMap;

    #[test]
    fn test_halted_report_shape() {
        let report = Report::halted(&ValidationHalt::InvalidUrl);
        assert!(report.is_halted());
        assert!(!report.is_successful());

        let json = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "is_halted": true,
                "halted_msg": "Invalid url.",
            })
        );
    }

    #[test]
    fn test_completed_report_shape() {
        let report = Report::Completed {
            title: "Intramuros".to_string(),
            favicon: None,
            url: "https://example.com/".to_string(),
            metrics: MetricMap::new().into_records(),
            is_successful: false,
        };
        assert!(!report.is_halted());

        let json = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(json["title"], "Intramuros");
        assert_eq!(json["favicon"], serde_json::Value::Null);
        assert_eq!(json["is_successful"], false);
        assert!(json.get("is_halted").is_none());
        let metrics = json["metrics"].as_object().expect("metrics object");
        assert_eq!(metrics.len(), 6);
        assert!(metrics.contains_key("geo.position"));
    }
}
