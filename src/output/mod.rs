//! Output formatting for inspection reports.
//!
//! | Format | Module | Use case |
//! |--------|--------|----------|
//! | [`Pretty`](OutputFormat::Pretty) | [`pretty`] | Terminal / human review |
//! | [`Json`](OutputFormat::Json)     | [`json`]   | Automation / scripting  |
//!
//! Both forms carry every report field, so a machine consumer loses
//! nothing by parsing the JSON back into an
//! [`InspectionReport`](crate::finding::InspectionReport).

pub mod json;
pub mod pretty;

use crate::finding::InspectionReport;

/// Supported output formats for inspection reports.
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored text with score and breakdown tables.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

/// Formats an [`InspectionReport`] in the requested [`OutputFormat`].
pub fn format_report(report: &InspectionReport, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => pretty::format(report),
        OutputFormat::Json => json::format(report),
    }
}
