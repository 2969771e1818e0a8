//! Runtime verification harness for crtcompat.
//!
//! This crate provides:
//! - Selection report: what the build chose, as JSON
//! - Property checks: the observable guarantees of the active path
//! - Structured JSONL logging of every check

#![forbid(unsafe_code)]

pub mod error;
pub mod properties;
pub mod selection;
pub mod structured_log;

pub use error::HarnessError;
pub use properties::{Property, PropertyResult, plan, run_plan};
pub use selection::SelectionReport;

/// Turns a finished run into an error if anything failed.
pub fn require_all_passed(results: &[PropertyResult]) -> Result<(), HarnessError> {
    let failed: Vec<&str> = results
        .iter()
        .filter(|r| !r.passed())
        .map(|r| r.property.name())
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::PropertiesFailed {
            failed: failed.len(),
            total: results.len(),
            names: failed.join(", "),
        })
    }
}
