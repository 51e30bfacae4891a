//! The asynchronous checker seam.
//!
//! A [`Checker`] is an independent unit of analysis that, given an
//! artifact, eventually produces findings or fails. It is a capability —
//! one method behind a trait object — rather than a class hierarchy: any
//! analysis source, deterministic or not, plugs in uniformly and the
//! engine never branches on what kind of checker it is.
//!
//! Implementations are free to call out to external analyzers. Every
//! finding they produce must carry a stable `source_name` usable by
//! category inference ([`crate::category::classify`]) and compliance
//! matching.

use crate::artifact::SkillArtifact;
use crate::finding::Finding;
use async_trait::async_trait;

/// Result type returned by [`Checker::execute`].
pub type CheckResult = Result<Vec<Finding>, Box<dyn std::error::Error + Send + Sync>>;

/// An independent, possibly asynchronous analysis unit.
///
/// Implementers **must** be [`Send`] + [`Sync`]: the engine runs every
/// registered checker concurrently on separate tasks.
#[async_trait]
pub trait Checker: Send + Sync {
    /// Stable identifier for this checker. Used for failure reporting and,
    /// when the checker fails, for inferring which category's cap the
    /// pessimistic score bound must assume lost.
    fn name(&self) -> &'static str;

    /// Short, human-readable description of the checker.
    fn description(&self) -> &'static str;

    /// Runs the check. May take arbitrarily long and may fail; the engine
    /// bounds it with a timeout and absorbs errors and panics.
    async fn execute(&self, artifact: &SkillArtifact) -> CheckResult;
}

/// Terminal outcome of running one checker.
///
/// A checker that fails produces zero findings from that run — never both
/// findings and a failure. `TimedOut` is treated identically to `Failed`
/// for scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Ok(Vec<Finding>),
    Failed(String),
    TimedOut,
}

impl CheckOutcome {
    /// True for `Failed` and `TimedOut`.
    pub fn is_failure(&self) -> bool {
        !matches!(self, CheckOutcome::Ok(_))
    }

    /// The error message carried by a failure outcome.
    pub fn error_message(&self, timeout: std::time::Duration) -> Option<String> {
        match self {
            CheckOutcome::Ok(_) => None,
            CheckOutcome::Failed(e) => Some(e.clone()),
            CheckOutcome::TimedOut => {
                Some(format!("timed out after {:.1}s", timeout.as_secs_f64()))
            }
        }
    }
}
