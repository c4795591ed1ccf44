//! Error handling for the validation pipeline.
//!
//! Two kinds of failure exist in this crate:
//!
//! - **Halts** ([`ValidationHalt`]): transport or structural failures that abort
//!   the pipeline before a full report can be assembled. They bubble up to the
//!   `validate` boundary, which converts them into a halted report.
//! - **Metric errors**: human-readable strings appended to a metric's `errors`
//!   sequence. They mark a single metric as invalid and never halt.

mod types;

// Re-export public API
pub use types::{InitializationError, ValidationHalt};
