//! # skill-inspector
//!
//! Risk inspection for AI agent skills.
//!
//! `skill-inspector` audits a skill artifact (entry document plus optional
//! asset bundle) for security risk, schema compliance, and cross-platform
//! portability, producing a normalized 0–100 risk score with itemized
//! findings and compliance-framework references. When some of the
//! registered asynchronous checkers fail or time out, the score is reported
//! as a bounded range instead of a silently optimistic number.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use skill_inspector::{artifact::SkillArtifact, checkers, config::Config, engine, output};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(None)?;
//! let artifact = SkillArtifact::from_dir(Path::new("./my-skill"))?;
//! let registered = checkers::builtin_checkers(&config);
//!
//! let report = engine::run_inspection(&artifact, &registered, config.per_check_timeout()).await?;
//! println!(
//!     "{}",
//!     output::format_report(&report, &output::OutputFormat::Pretty)
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Data flows one way through a pipeline:
//!
//! 1. **[`artifact`]** — load the entry file and parse its frontmatter.
//! 2. **[`scanner`]** / **[`validator`]** — deterministic, synchronous
//!    leaves producing findings immediately.
//! 3. **[`checker`]** — the asynchronous [`checker::Checker`] seam;
//!    built-ins live in [`checkers`].
//! 4. **[`compliance`]** — enrich merged findings with framework references.
//! 5. **[`engine`]** — orchestrate everything under per-check timeouts and
//!    fold outcomes into the scored [`finding::InspectionReport`].
//! 6. **[`output`]** — render the report as pretty text or JSON.

pub mod artifact;
pub mod category;
pub mod checker;
pub mod checkers;
pub mod compliance;
pub mod config;
pub mod engine;
pub mod finding;
pub mod output;
pub mod scanner;
pub mod validator;

use finding::Severity;

/// Metadata for a single detection rule.
///
/// Returned by [`all_rules`] and used by the `list-rules` and `explain`
/// CLI commands. Each rule-bearing module exposes a `rules()` function.
pub struct RuleInfo {
    /// Unique rule identifier (e.g., `"patterns/fetch-pipe-shell"`).
    pub id: &'static str,
    /// Fixed severity of findings this rule produces.
    pub severity: Severity,
    /// Source that detects this rule (`"patterns"`, `"spec"`, ...).
    pub source: &'static str,
    /// Short description of what the rule checks.
    pub message: &'static str,
    /// Guidance on how to fix a violation.
    pub fix: &'static str,
}

/// Aggregates [`RuleInfo`] from every rule-bearing module.
pub fn all_rules() -> Vec<RuleInfo> {
    let mut rules = Vec::new();
    rules.extend(scanner::rules());
    rules.extend(validator::rules());
    rules.extend(checkers::portability::rules());
    rules
}
