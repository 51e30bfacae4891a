//! JSON output formatter.
//!
//! Produces a pretty-printed JSON document: the full report plus a
//! severity summary and the affected-frameworks roll-up. The report fields
//! are flattened at the top level, so the output parses back into an
//! [`InspectionReport`](crate::finding::InspectionReport) without loss.

use crate::compliance;
use crate::finding::InspectionReport;

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: &'a InspectionReport,
    summary: Summary,
    affected_frameworks: Vec<String>,
}

#[derive(serde::Serialize)]
struct Summary {
    critical: usize,
    high: usize,
    medium: usize,
    low: usize,
}

/// Formats an [`InspectionReport`] as pretty-printed JSON.
///
/// # Panics
///
/// Panics if the report cannot be serialized (should not happen with valid data).
pub fn format(report: &InspectionReport) -> String {
    let (critical, high, medium, low) = report.count_by_severity();
    let output = JsonOutput {
        report,
        summary: Summary {
            critical,
            high,
            medium,
            low,
        },
        affected_frameworks: compliance::affected_frameworks(&report.findings),
    };

    serde_json::to_string_pretty(&output).expect("JSON serialization failed")
}
