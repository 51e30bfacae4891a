use async_trait::async_trait;
use skill_inspector::artifact::SkillArtifact;
use skill_inspector::category::Category;
use skill_inspector::checker::{CheckResult, Checker};
use skill_inspector::engine::{
    optimistic_score, pessimistic_extra, run_inspection, score_breakdown, EngineError,
};
use skill_inspector::finding::{Finding, Severity};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

fn clean_artifact() -> SkillArtifact {
    let mut metadata = BTreeMap::new();
    metadata.insert("name".to_string(), "clean-skill".to_string());
    metadata.insert(
        "description".to_string(),
        "Formats CSV files. Use when asked to tidy tables.".to_string(),
    );
    SkillArtifact {
        identifier: "clean-skill".to_string(),
        declared_description: metadata.get("description").cloned(),
        metadata,
        body_text: "# Usage\n\nRun the formatter on the input file.\n".to_string(),
        canonical_path: PathBuf::from("skills/clean-skill/SKILL.md"),
    }
}

/// Checker that returns a fixed finding list.
struct StaticChecker {
    name: &'static str,
    findings: Vec<Finding>,
}

#[async_trait]
impl Checker for StaticChecker {
    fn name(&self) -> &'static str {
        self.name
    }
    fn description(&self) -> &'static str {
        "static test checker"
    }
    async fn execute(&self, _artifact: &SkillArtifact) -> CheckResult {
        Ok(self.findings.clone())
    }
}

/// Checker that always fails.
struct FailingChecker {
    name: &'static str,
}

#[async_trait]
impl Checker for FailingChecker {
    fn name(&self) -> &'static str {
        self.name
    }
    fn description(&self) -> &'static str {
        "failing test checker"
    }
    async fn execute(&self, _artifact: &SkillArtifact) -> CheckResult {
        Err("analyzer unavailable".into())
    }
}

/// Checker that sleeps far past any reasonable timeout.
struct SleepyChecker {
    name: &'static str,
}

#[async_trait]
impl Checker for SleepyChecker {
    fn name(&self) -> &'static str {
        self.name
    }
    fn description(&self) -> &'static str {
        "sleepy test checker"
    }
    async fn execute(&self, _artifact: &SkillArtifact) -> CheckResult {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec![])
    }
}

/// Checker that panics mid-run.
struct PanickyChecker {
    name: &'static str,
}

#[async_trait]
impl Checker for PanickyChecker {
    fn name(&self) -> &'static str {
        self.name
    }
    fn description(&self) -> &'static str {
        "panicky test checker"
    }
    async fn execute(&self, _artifact: &SkillArtifact) -> CheckResult {
        panic!("checker blew up");
    }
}

#[tokio::test]
async fn clean_artifact_with_successful_checkers_scores_100() {
    let checkers: Vec<Arc<dyn Checker>> = vec![Arc::new(StaticChecker {
        name: "portability",
        findings: vec![],
    })];
    let report = run_inspection(&clean_artifact(), &checkers, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(report.score, 100);
    assert!(!report.incomplete);
    assert!(report.score_range.is_none());
    assert!(report.findings.is_empty());
    assert!(report.failed_checks.is_empty());
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn dangerous_pattern_and_unknown_field_deduct_together() {
    let mut artifact = clean_artifact();
    artifact.body_text.push_str("rm -rf /data\n");
    artifact
        .metadata
        .insert("build-command".to_string(), "make".to_string());

    let report = run_inspection(&artifact, &[], TIMEOUT).await.unwrap();

    // One critical security finding (50) and one medium spec finding (10).
    assert_eq!(report.score, 40);
    assert!(!report.incomplete);
    assert_eq!(report.score_breakdown[&Category::Security], 50);
    assert_eq!(report.score_breakdown[&Category::Spec], 10);
    assert_eq!(report.score_breakdown[&Category::Portability], 0);
    assert_eq!(report.findings.len(), 2);
}

#[tokio::test]
async fn failing_checker_bounds_the_score_instead_of_aborting() {
    let checkers: Vec<Arc<dyn Checker>> = vec![
        Arc::new(FailingChecker {
            name: "portability",
        }),
        Arc::new(StaticChecker {
            name: "metadata-lint",
            findings: vec![],
        }),
    ];
    let report = run_inspection(&clean_artifact(), &checkers, TIMEOUT)
        .await
        .unwrap();

    assert!(report.incomplete);
    let range = report.score_range.expect("incomplete run carries a range");
    assert_eq!(range.max, 100);
    assert_eq!(range.min, 100 - Category::Portability.cap());
    assert_eq!(report.score, range.min);
    assert_eq!(report.failed_checks, vec!["portability".to_string()]);
    assert_eq!(report.errors, vec!["analyzer unavailable".to_string()]);
}

#[tokio::test]
async fn timed_out_checker_is_scored_like_a_failure() {
    let checkers: Vec<Arc<dyn Checker>> = vec![
        Arc::new(SleepyChecker {
            name: "portability",
        }),
        Arc::new(StaticChecker {
            name: "metadata-lint",
            findings: vec![],
        }),
    ];
    // A short timeout keeps the test fast; the sibling still completes.
    let report = run_inspection(&clean_artifact(), &checkers, Duration::from_millis(50))
        .await
        .unwrap();

    assert!(report.incomplete);
    let range = report.score_range.unwrap();
    assert_eq!(range.max, 100);
    assert_eq!(range.min, 100 - Category::Portability.cap());
    assert_eq!(report.failed_checks, vec!["portability".to_string()]);
    assert!(report.errors[0].contains("timed out"));
}

#[tokio::test]
async fn panicking_checker_is_absorbed_at_the_boundary() {
    let checkers: Vec<Arc<dyn Checker>> = vec![Arc::new(PanickyChecker {
        name: "portability",
    })];
    let report = run_inspection(&clean_artifact(), &checkers, TIMEOUT)
        .await
        .unwrap();

    assert!(report.incomplete);
    assert_eq!(report.failed_checks, vec!["portability".to_string()]);
    assert!(report.errors[0].contains("panicked"));
}

#[tokio::test]
async fn successful_checker_findings_are_merged_and_scored() {
    let checkers: Vec<Arc<dyn Checker>> = vec![Arc::new(StaticChecker {
        name: "portability",
        findings: vec![Finding::new(
            Severity::Low,
            "clean-skill: CRLF line endings",
            "portability",
        )],
    })];
    let report = run_inspection(&clean_artifact(), &checkers, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(report.score, 98);
    assert!(!report.incomplete);
    assert_eq!(report.score_breakdown[&Category::Portability], 2);
    assert_eq!(report.findings.len(), 1);
}

#[tokio::test]
async fn zero_timeout_fails_fast() {
    let result = run_inspection(&clean_artifact(), &[], Duration::ZERO).await;
    assert!(matches!(result, Err(EngineError::InvalidTimeout)));
}

#[tokio::test]
async fn failed_checker_in_partially_deducted_category_adds_only_the_gap() {
    // The artifact already costs 10 spec points; a failed spec checker can
    // pessimize by at most cap - 10.
    let mut artifact = clean_artifact();
    artifact
        .metadata
        .insert("build-command".to_string(), "make".to_string());

    let checkers: Vec<Arc<dyn Checker>> = vec![Arc::new(FailingChecker {
        name: "metadata-lint",
    })];
    let report = run_inspection(&artifact, &checkers, TIMEOUT).await.unwrap();

    let range = report.score_range.unwrap();
    assert_eq!(range.max, 90);
    assert_eq!(range.min, 90 - (Category::Spec.cap() - 10));
}

// Pure-fold scoring properties, independent of any checker machinery.

#[test]
fn adding_a_finding_never_raises_the_optimistic_score() {
    let base = vec![Finding::new(Severity::Medium, "m", "patterns")];
    let mut more = base.clone();
    more.push(Finding::new(Severity::Critical, "c", "patterns"));

    let score_base = optimistic_score(&score_breakdown(&base));
    let score_more = optimistic_score(&score_breakdown(&more));
    assert!(score_more <= score_base);
}

#[test]
fn category_contribution_never_exceeds_its_cap() {
    let mut findings = Vec::new();
    for _ in 0..10 {
        findings.push(Finding::new(Severity::Critical, "c", "patterns"));
    }
    let breakdown = score_breakdown(&findings);
    assert_eq!(breakdown[&Category::Security], Category::Security.cap());

    // Still at the cap after even more findings — no category can sink the
    // score past its share.
    findings.push(Finding::new(Severity::Critical, "c", "patterns"));
    let breakdown = score_breakdown(&findings);
    assert_eq!(breakdown[&Category::Security], Category::Security.cap());
}

#[test]
fn pessimistic_extra_assumes_full_cap_for_clean_categories() {
    let breakdown = score_breakdown(&[]);
    let extra = pessimistic_extra(&breakdown, &["portability".to_string()]);
    assert_eq!(extra, Category::Portability.cap());
}
