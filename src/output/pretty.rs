//! Human-readable colored text formatter.
//!
//! Produces a terminal-friendly report with ANSI color codes, showing the
//! score (with bounds when the run is incomplete), the per-category
//! breakdown, individual findings with remediation and compliance
//! references, failed checks, and a one-line summary.

use crate::category::Category;
use crate::compliance;
use crate::finding::{InspectionReport, Severity};
use colored::Colorize;

/// Formats an [`InspectionReport`] as human-readable, ANSI-colored text.
///
/// Sections rendered (in order):
/// 1. **Header** — skill name and timestamp.
/// 2. **Score** — headline number, range when incomplete, per-category breakdown.
/// 3. **Findings** — severity, message, fix, compliance references.
/// 4. **Incomplete checks** — failed/timed-out checkers and their errors.
/// 5. **Frameworks** — affected compliance-framework entries.
/// 6. **Summary** — severity counts.
pub fn format(report: &InspectionReport) -> String {
    let mut out = String::new();

    // Header
    out.push_str(&format!(
        "\n{}\n",
        format!("  Skill Inspection: {}  ", report.skill)
            .bold()
            .on_blue()
            .white()
    ));
    out.push_str(&format!("  Timestamp: {}\n\n", report.timestamp));

    // Score
    let score_str = colorize_score(report.score);
    if let Some(range) = report.score_range {
        out.push_str(&format!(
            "{} {score_str} / 100  (verified at most {}, at least {})\n",
            "Score:".bold(),
            range.max,
            range.min,
        ));
        out.push_str(&format!(
            "  {}\n",
            "Run incomplete — the headline number is the pessimistic bound.".yellow()
        ));
    } else {
        out.push_str(&format!("{} {score_str} / 100\n", "Score:".bold()));
    }

    for category in Category::all() {
        let deducted = report
            .score_breakdown
            .get(&category)
            .copied()
            .unwrap_or(0);
        let line = format!(
            "  {name:<14} -{deducted:<3} (cap {cap})",
            name = category.to_string(),
            cap = category.cap(),
        );
        if deducted == 0 {
            out.push_str(&format!("{}\n", line.dimmed()));
        } else {
            out.push_str(&format!("{line}\n"));
        }
    }
    out.push('\n');

    // Findings
    if !report.findings.is_empty() {
        out.push_str(&format!("{}\n", "Findings".bold().underline()));
        for finding in &report.findings {
            let severity_str = match finding.severity {
                Severity::Critical => "CRIT".red().bold().to_string(),
                Severity::High => "HIGH".red().to_string(),
                Severity::Medium => " MED".yellow().bold().to_string(),
                Severity::Low => " LOW".blue().to_string(),
            };
            out.push_str(&format!(
                "  [{severity_str}] {source:<12} {message}\n",
                source = finding.source_name.dimmed(),
                message = finding.message,
            ));
            if let Some(ref fix) = finding.fix {
                out.push_str(&format!("         fix: {}\n", fix.dimmed()));
            }
            if let Some(ref refs) = finding.compliance_refs {
                for r in refs {
                    out.push_str(&format!("         ref: {}\n", r.label().dimmed()));
                }
            }
        }
        out.push('\n');
    }

    // Incomplete checks
    if report.incomplete {
        out.push_str(&format!(
            "{} ({} did not complete)\n",
            "Incomplete Checks".bold().underline(),
            report.failed_checks.len()
        ));
        for (name, error) in report.failed_checks.iter().zip(&report.errors) {
            out.push_str(&format!(
                "  [{}] {:<14} {}\n",
                "FAIL".red().bold(),
                name,
                error.dimmed()
            ));
        }
        out.push('\n');
    }

    // Frameworks
    let frameworks = compliance::affected_frameworks(&report.findings);
    if !frameworks.is_empty() {
        out.push_str(&format!("{}\n", "Affected Frameworks".bold().underline()));
        for label in &frameworks {
            out.push_str(&format!("  {label}\n"));
        }
        out.push('\n');
    }

    // Summary
    let (critical, high, medium, low) = report.count_by_severity();
    let status = if report.incomplete {
        "INCOMPLETE".yellow().bold().to_string()
    } else if report.findings.is_empty() {
        "CLEAN".green().bold().to_string()
    } else {
        "FINDINGS".red().bold().to_string()
    };
    out.push_str(&format!(
        "Result: {status}  |  {critical} critical, {high} high, {medium} medium, {low} low\n",
    ));

    out
}

fn colorize_score(score: u32) -> String {
    let s = score.to_string().bold();
    if score >= 90 {
        s.green().to_string()
    } else if score >= 70 {
        s.yellow().to_string()
    } else {
        s.red().to_string()
    }
}
