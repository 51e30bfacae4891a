use std::fmt;

/// Severity of a single finding.
///
/// Ordering is ascending: `Low < Medium < High < Critical`. Each level
/// carries a fixed score deduction used by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Fixed points deducted from the score for one finding of this severity,
    /// before the per-category cap is applied.
    pub fn deduction(&self) -> u32 {
        match self {
            Severity::Low => 2,
            Severity::Medium => 10,
            Severity::High => 25,
            Severity::Critical => 50,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// A pointer from a finding to an external compliance-framework identifier.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComplianceRef {
    /// Framework label (e.g., `"OWASP-LLM"`, `"CWE"`).
    pub framework: String,
    /// Stable identifier within the framework (e.g., `"LLM01"`, `"CWE-78"`).
    pub id: String,
    /// Human-readable name of the referenced item.
    pub name: String,
    /// Link to the framework entry.
    pub url: String,
}

impl ComplianceRef {
    /// Summary label used by framework reporting: `{framework}: {id} — {name}`.
    pub fn label(&self) -> String {
        format!("{}: {} — {}", self.framework, self.id, self.name)
    }
}

/// One reported issue.
///
/// Findings are value objects: never mutated after creation. The compliance
/// mapper attaches references via [`Finding::with_compliance_refs`], which
/// returns a copy.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
    /// Optional remediation guidance.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fix: Option<String>,
    /// Which scanner, validator, or checker produced this finding. Used for
    /// category inference and compliance-rule source matching.
    pub source_name: String,
    /// Compliance references attached by the mapper. `None` means "never
    /// mapped", which is distinguishable from a deliberately empty list.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub compliance_refs: Option<Vec<ComplianceRef>>,
}

impl Finding {
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Finding {
            severity,
            message: message.into(),
            fix: None,
            source_name: source_name.into(),
            compliance_refs: None,
        }
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    /// Returns a copy of this finding with the given compliance references
    /// attached, replacing any previously attached set.
    pub fn with_compliance_refs(&self, refs: Vec<ComplianceRef>) -> Self {
        Finding {
            compliance_refs: Some(refs),
            ..self.clone()
        }
    }
}

/// Score bounds reported when one or more checkers did not complete.
///
/// `min` assumes every failed checker would have saturated its category cap;
/// `max` counts only what was actually observed. The headline score equals
/// `min` so that automation reading only `score` degrades safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScoreRange {
    pub min: u32,
    pub max: u32,
}

/// Terminal artifact of one inspection run.
///
/// Invariants upheld by the engine:
/// - `0 <= score <= 100`.
/// - `score_range` is present iff `incomplete` is true.
/// - When present, `score_range.min == score <= score_range.max`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InspectionReport {
    /// Identifier of the inspected skill.
    pub skill: String,
    /// Normalized risk score, 0 (worst) to 100 (clean). When the run is
    /// incomplete this is the pessimistic bound.
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score_range: Option<ScoreRange>,
    /// Points deducted per category, after capping.
    pub score_breakdown: std::collections::BTreeMap<crate::category::Category, u32>,
    pub findings: Vec<Finding>,
    /// True when at least one checker failed or timed out.
    pub incomplete: bool,
    /// Names of checkers that failed or timed out.
    pub failed_checks: Vec<String>,
    /// Error messages for `failed_checks`, in the same order.
    pub errors: Vec<String>,
    pub timestamp: String,
}

impl InspectionReport {
    /// Count findings per severity in a single pass.
    ///
    /// Returns `(critical, high, medium, low)`.
    pub fn count_by_severity(&self) -> (usize, usize, usize, usize) {
        self.findings
            .iter()
            .fold((0, 0, 0, 0), |(c, h, m, l), f| match f.severity {
                Severity::Critical => (c + 1, h, m, l),
                Severity::High => (c, h + 1, m, l),
                Severity::Medium => (c, h, m + 1, l),
                Severity::Low => (c, h, m, l + 1),
            })
    }
}
