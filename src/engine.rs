//! Inspection orchestration and scoring.
//!
//! [`run_inspection`] is the main entry-point: it runs the deterministic
//! leaves (pattern scanner, spec validator) synchronously, launches every
//! registered [`Checker`](crate::checker::Checker) concurrently under a
//! per-check timeout, merges findings, maps compliance references, and
//! computes the final 0–100 score.
//!
//! # Partial failure
//!
//! A failed or timed-out checker never aborts the run and never blocks its
//! siblings. Instead the report becomes *incomplete*: the headline score is
//! the pessimistic bound (every failed checker assumed to have saturated
//! its category's cap) and [`ScoreRange`] carries both bounds, so a partial
//! result can never present itself as a clean bill of health.
//!
//! # Scoring
//!
//! Scoring is a pure fold over the merged finding list and the settled
//! outcome list — no shared mutable accumulator. The helpers
//! [`score_breakdown`], [`optimistic_score`], and [`pessimistic_extra`]
//! are exposed so the arithmetic is testable in isolation from the
//! concurrency machinery.

use crate::artifact::SkillArtifact;
use crate::category::{classify, Category};
use crate::checker::{CheckOutcome, Checker};
use crate::compliance;
use crate::finding::{Finding, InspectionReport, ScoreRange};
use crate::{scanner, validator};
use futures::future;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Construction-time misconfiguration. The only way [`run_inspection`]
/// itself fails; everything downstream degrades into the report instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("per-check timeout must be greater than zero")]
    InvalidTimeout,
}

/// Runs a complete inspection of one artifact.
///
/// # Pipeline
///
/// 1. Pattern scanner and spec validator run synchronously (pure, fast).
/// 2. Every checker is spawned on its own task and raced against
///    `per_check_timeout`. Errors, panics, and timeouts become `Failed` /
///    `TimedOut` outcomes; none of them propagates.
/// 3. Findings from successful outcomes merge with the deterministic
///    findings and pass through the compliance mapper.
/// 4. The score, breakdown, and (when incomplete) score range are folded
///    out of the merged findings and settled outcomes.
///
/// # Errors
///
/// Fails fast with [`EngineError::InvalidTimeout`] when `per_check_timeout`
/// is zero — before any checker is launched.
pub async fn run_inspection(
    artifact: &SkillArtifact,
    checkers: &[Arc<dyn Checker>],
    per_check_timeout: Duration,
) -> Result<InspectionReport, EngineError> {
    if per_check_timeout.is_zero() {
        return Err(EngineError::InvalidTimeout);
    }

    // Deterministic leaves, on the calling task. Infallible by contract.
    let mut findings = scanner::scan(&artifact.body_text, &artifact.identifier);
    findings.extend(validator::validate(artifact));

    let outcomes = run_checkers(artifact, checkers, per_check_timeout).await;

    // Merge successful checker findings into the bag. Failed outcomes
    // contribute zero findings — never both findings and a failure.
    for (_, outcome) in &outcomes {
        if let CheckOutcome::Ok(checker_findings) = outcome {
            findings.extend(checker_findings.iter().cloned());
        }
    }

    let findings = compliance::map_compliance(&findings);

    let breakdown = score_breakdown(&findings);
    let optimistic = optimistic_score(&breakdown);

    let mut failed_checks = Vec::new();
    let mut errors = Vec::new();
    for (name, outcome) in &outcomes {
        if let Some(message) = outcome.error_message(per_check_timeout) {
            failed_checks.push(name.clone());
            errors.push(message);
        }
    }

    let (score, score_range, incomplete) = if failed_checks.is_empty() {
        (optimistic, None, false)
    } else {
        let extra = pessimistic_extra(&breakdown, &failed_checks);
        let pessimistic = optimistic.saturating_sub(extra);
        (
            pessimistic,
            Some(ScoreRange {
                min: pessimistic,
                max: optimistic,
            }),
            true,
        )
    };

    Ok(InspectionReport {
        skill: artifact.identifier.clone(),
        score,
        score_range,
        score_breakdown: breakdown,
        findings,
        incomplete,
        failed_checks,
        errors,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Launches every checker concurrently and waits for all slots to settle.
///
/// Each checker's result is written into its own slot; expiry of one
/// checker's timeout discards that checker's eventual completion but never
/// cancels a sibling. Total wall time tracks the slowest slot, not the sum.
async fn run_checkers(
    artifact: &SkillArtifact,
    checkers: &[Arc<dyn Checker>],
    per_check_timeout: Duration,
) -> Vec<(String, CheckOutcome)> {
    let artifact = Arc::new(artifact.clone());

    let mut names = Vec::with_capacity(checkers.len());
    let handles: Vec<_> = checkers
        .iter()
        .map(|checker| {
            names.push(checker.name().to_string());
            debug!(checker = checker.name(), "dispatching checker");
            let checker = Arc::clone(checker);
            let artifact = Arc::clone(&artifact);
            tokio::spawn(async move {
                tokio::time::timeout(per_check_timeout, checker.execute(&artifact)).await
            })
        })
        .collect();

    let joined = future::join_all(handles).await;

    names
        .into_iter()
        .zip(joined)
        .map(|(name, joined)| {
            let outcome = match joined {
                Ok(Ok(Ok(findings))) => CheckOutcome::Ok(findings),
                Ok(Ok(Err(e))) => CheckOutcome::Failed(e.to_string()),
                Ok(Err(_elapsed)) => CheckOutcome::TimedOut,
                // A panic inside a checker surfaces as a JoinError; absorb it
                // at the boundary like any other checker failure.
                Err(join_err) if join_err.is_panic() => {
                    CheckOutcome::Failed("checker panicked".to_string())
                }
                Err(join_err) => CheckOutcome::Failed(join_err.to_string()),
            };
            match &outcome {
                CheckOutcome::Ok(findings) => {
                    debug!(checker = %name, findings = findings.len(), "checker completed")
                }
                CheckOutcome::Failed(e) => warn!(checker = %name, error = %e, "checker failed"),
                CheckOutcome::TimedOut => warn!(checker = %name, "checker timed out"),
            }
            (name, outcome)
        })
        .collect()
}

/// Points deducted per category, after capping.
///
/// Every category appears in the map, with 0 when clean, so serialized
/// breakdowns are shape-stable across runs.
pub fn score_breakdown(findings: &[Finding]) -> BTreeMap<Category, u32> {
    let mut raw: BTreeMap<Category, u32> = Category::all().iter().map(|c| (*c, 0)).collect();
    for finding in findings {
        *raw.entry(classify(&finding.source_name)).or_insert(0) +=
            finding.severity.deduction();
    }
    raw.into_iter()
        .map(|(category, deduction)| (category, deduction.min(category.cap())))
        .collect()
}

/// `100 - Σ capped deductions`, floored at 0.
pub fn optimistic_score(breakdown: &BTreeMap<Category, u32>) -> u32 {
    100u32.saturating_sub(breakdown.values().sum())
}

/// Worst-case additional deduction implied by failed checkers.
///
/// Each failed checker is assumed to have found enough to drive its
/// category to the full cap; the extra is the gap between that cap and the
/// deduction already applied for the category.
pub fn pessimistic_extra(breakdown: &BTreeMap<Category, u32>, failed_checkers: &[String]) -> u32 {
    failed_checkers
        .iter()
        .map(|name| {
            let category = classify(name);
            let applied = breakdown.get(&category).copied().unwrap_or(0);
            category.cap().saturating_sub(applied)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;

    fn finding(severity: Severity, source: &str) -> Finding {
        Finding::new(severity, "msg", source)
    }

    #[test]
    fn breakdown_caps_each_category() {
        // Three criticals in security: 150 raw, capped at 60.
        let findings = vec![
            finding(Severity::Critical, "patterns"),
            finding(Severity::Critical, "patterns"),
            finding(Severity::Critical, "patterns"),
        ];
        let breakdown = score_breakdown(&findings);
        assert_eq!(breakdown[&Category::Security], 60);
        assert_eq!(breakdown[&Category::Spec], 0);
        assert_eq!(breakdown[&Category::Portability], 0);
    }

    #[test]
    fn optimistic_score_floors_at_zero() {
        let findings = vec![
            finding(Severity::Critical, "patterns"),
            finding(Severity::Critical, "patterns"),
            finding(Severity::Critical, "spec"),
            finding(Severity::Critical, "portability"),
        ];
        let breakdown = score_breakdown(&findings);
        assert_eq!(optimistic_score(&breakdown), 0);
    }

    #[test]
    fn pessimistic_extra_is_cap_gap() {
        // 10 points already applied in spec; a failed spec checker can add
        // at most cap - applied = 10 more.
        let findings = vec![finding(Severity::Medium, "spec")];
        let breakdown = score_breakdown(&findings);
        let extra = pessimistic_extra(&breakdown, &["spec".to_string()]);
        assert_eq!(extra, Category::Spec.cap() - 10);
    }
}
