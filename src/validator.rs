//! Spec validator for artifact metadata.
//!
//! [`validate`] is a pure, deterministic function from a parsed artifact's
//! structured metadata to findings — no filesystem access, no external
//! calls, never fails. Schema violations are `critical`; fields outside the
//! allow-list are `medium`.
//!
//! # Checks
//!
//! | Check | Severity |
//! |-------|----------|
//! | `name` present, ≤ 64 chars, kebab-case | critical |
//! | `description` present, ≤ 1024 chars | critical |
//! | declared name matches the containing directory | critical |
//! | metadata field outside the allow-list | medium |
//!
//! The directory-name check runs only when the artifact was loaded from a
//! canonical entry path (`SKILL.md` inside a named directory). Ad-hoc
//! inspections of arbitrary files skip it entirely rather than firing false
//! positives.

use crate::artifact::SkillArtifact;
use crate::finding::{Finding, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// `source_name` stamped on every finding this validator produces.
pub const SOURCE_NAME: &str = "spec";

/// Maximum length of the `name` field.
pub const NAME_MAX_LEN: usize = 64;

/// Maximum length of the `description` field.
pub const DESCRIPTION_MAX_LEN: usize = 1024;

/// Every metadata field the schema permits. Optional fields are listed too;
/// nothing in this list ever produces a finding.
pub const ALLOWED_FIELDS: &[&str] = &[
    "name",
    "description",
    "license",
    "allowed-tools",
    "version",
    "metadata",
];

// Lowercase letters and digits, hyphen-separated. Anchors plus the group
// structure rule out leading, trailing, and doubled hyphens in one pattern.
static RE_NAME_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

/// Validates the artifact's structured metadata against the fixed schema.
///
/// Findings come out in a stable order: name checks, description checks,
/// the directory-name check, then unauthorized fields in key order.
pub fn validate(artifact: &SkillArtifact) -> Vec<Finding> {
    let mut findings = Vec::new();

    validate_name(&mut findings, artifact);
    validate_description(&mut findings, artifact);
    validate_directory_match(&mut findings, artifact);

    for field in artifact.metadata.keys() {
        if !ALLOWED_FIELDS.contains(&field.as_str()) {
            findings.push(
                Finding::new(
                    Severity::Medium,
                    format!("Unauthorized metadata field '{field}'"),
                    SOURCE_NAME,
                )
                .with_fix(format!("Remove the '{field}' field; it is not part of the skill schema")),
            );
        }
    }

    findings
}

fn validate_name(findings: &mut Vec<Finding>, artifact: &SkillArtifact) {
    let name = match artifact.metadata.get("name") {
        Some(n) if !n.trim().is_empty() => n,
        _ => {
            findings.push(
                Finding::new(
                    Severity::Critical,
                    "Required metadata field 'name' is missing or empty",
                    SOURCE_NAME,
                )
                .with_fix("Declare a name field in the artifact's frontmatter"),
            );
            return;
        }
    };

    if name.len() > NAME_MAX_LEN {
        findings.push(
            Finding::new(
                Severity::Critical,
                format!(
                    "Name is {} chars — maximum is {}",
                    name.len(),
                    NAME_MAX_LEN
                ),
                SOURCE_NAME,
            )
            .with_fix(format!("Shorten the name to {NAME_MAX_LEN} characters or fewer")),
        );
    }

    if !RE_NAME_FORMAT.is_match(name) {
        findings.push(
            Finding::new(
                Severity::Critical,
                format!("Name '{name}' is not lowercase-kebab-case"),
                SOURCE_NAME,
            )
            .with_fix(
                "Use lowercase letters, digits, and single hyphens, with no leading or trailing hyphen",
            ),
        );
    }
}

fn validate_description(findings: &mut Vec<Finding>, artifact: &SkillArtifact) {
    let description = match artifact.metadata.get("description") {
        Some(d) if !d.trim().is_empty() => d,
        _ => {
            findings.push(
                Finding::new(
                    Severity::Critical,
                    "Required metadata field 'description' is missing or empty",
                    SOURCE_NAME,
                )
                .with_fix("Declare a description field in the artifact's frontmatter"),
            );
            return;
        }
    };

    if description.len() > DESCRIPTION_MAX_LEN {
        findings.push(
            Finding::new(
                Severity::Critical,
                format!(
                    "Description is {} chars — maximum is {}",
                    description.len(),
                    DESCRIPTION_MAX_LEN
                ),
                SOURCE_NAME,
            )
            .with_fix(format!(
                "Shorten the description to {DESCRIPTION_MAX_LEN} characters or fewer"
            )),
        );
    }
}

/// The declared identifier must equal the containing directory name — but
/// only when the artifact sits at a canonical entry path. A skill loaded
/// from an arbitrary file has no meaningful directory contract, so the
/// check is skipped, not merely non-firing.
fn validate_directory_match(findings: &mut Vec<Finding>, artifact: &SkillArtifact) {
    if !artifact.is_entry_path() {
        return;
    }
    let Some(dir_name) = artifact.containing_dir_name() else {
        return;
    };
    if dir_name.is_empty() {
        return;
    }

    if artifact.identifier != dir_name {
        findings.push(
            Finding::new(
                Severity::Critical,
                format!(
                    "Declared name '{}' does not match containing directory '{}'",
                    artifact.identifier, dir_name
                ),
                SOURCE_NAME,
            )
            .with_fix("Rename the directory or the declared name so they agree"),
        );
    }
}

/// Returns the [`RuleInfo`](crate::RuleInfo) catalogue for every validator rule.
pub fn rules() -> Vec<crate::RuleInfo> {
    vec![
        crate::RuleInfo {
            id: "spec/missing-name",
            severity: Severity::Critical,
            source: SOURCE_NAME,
            message: "Required metadata field 'name' is missing or empty",
            fix: "Declare a name field in the artifact's frontmatter",
        },
        crate::RuleInfo {
            id: "spec/name-too-long",
            severity: Severity::Critical,
            source: SOURCE_NAME,
            message: "Name exceeds 64 characters",
            fix: "Shorten the name to 64 characters or fewer",
        },
        crate::RuleInfo {
            id: "spec/name-format",
            severity: Severity::Critical,
            source: SOURCE_NAME,
            message: "Name is not lowercase-kebab-case",
            fix: "Use lowercase letters, digits, and single hyphens",
        },
        crate::RuleInfo {
            id: "spec/missing-description",
            severity: Severity::Critical,
            source: SOURCE_NAME,
            message: "Required metadata field 'description' is missing or empty",
            fix: "Declare a description field in the artifact's frontmatter",
        },
        crate::RuleInfo {
            id: "spec/description-too-long",
            severity: Severity::Critical,
            source: SOURCE_NAME,
            message: "Description exceeds 1024 characters",
            fix: "Shorten the description to 1024 characters or fewer",
        },
        crate::RuleInfo {
            id: "spec/directory-mismatch",
            severity: Severity::Critical,
            source: SOURCE_NAME,
            message: "Declared name does not match the containing directory",
            fix: "Rename the directory or the declared name so they agree",
        },
        crate::RuleInfo {
            id: "spec/unauthorized-field",
            severity: Severity::Medium,
            source: SOURCE_NAME,
            message: "Metadata field outside the schema allow-list",
            fix: "Remove fields that are not part of the skill schema",
        },
    ]
}
