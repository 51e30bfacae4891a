//! Cross-platform portability checker.
//!
//! Deterministic built-in checker flagging constructs that break when a
//! skill runs on a platform other than the author's: Windows-style
//! backslash paths, platform-specific interpreters, CRLF line endings, and
//! user-specific absolute paths. The entry document is checked first, then
//! any script files bundled next to it. Like the pattern scanner, each
//! rule reports only its earliest match.

use crate::artifact::SkillArtifact;
use crate::checker::{CheckResult, Checker};
use crate::checkers::collect_files;
use crate::finding::{Finding, Severity};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

/// `source_name` stamped on every finding this checker produces.
pub const SOURCE_NAME: &str = "portability";

/// Bundle file extensions worth checking for portability hazards.
const SCRIPT_EXTENSIONS: &[&str] = &["sh", "bash", "zsh", "ps1", "py", "js"];

struct PortabilityRule {
    id: &'static str,
    severity: Severity,
    regex: &'static LazyLock<Regex>,
    message: &'static str,
    fix: &'static str,
}

/// Drive-letter prefix (`C:\`) or a backslash between path-ish characters.
static RE_WINDOWS_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]:\\|[a-zA-Z0-9_][\\][a-zA-Z0-9_]").unwrap());

static RE_PLATFORM_INTERPRETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:powershell(?:\.exe)?|cmd\.exe|cmd\s+/c)\b").unwrap());

static RE_USER_HOME_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:/home/|/Users/)[A-Za-z0-9_\-]+/").unwrap());

static RULES: &[PortabilityRule] = &[
    PortabilityRule {
        id: "portability/windows-path",
        severity: Severity::Medium,
        regex: &RE_WINDOWS_PATH,
        message: "Windows-style backslash path",
        fix: "Use forward slashes; they work on every supported platform",
    },
    PortabilityRule {
        id: "portability/platform-interpreter",
        severity: Severity::Medium,
        regex: &RE_PLATFORM_INTERPRETER,
        message: "Platform-specific interpreter invocation",
        fix: "Use a portable shell construct or document the platform requirement",
    },
    PortabilityRule {
        id: "portability/user-home-path",
        severity: Severity::Low,
        regex: &RE_USER_HOME_PATH,
        message: "User-specific absolute home path",
        fix: "Use $HOME or a relative path instead of a hardcoded home directory",
    },
];

/// Built-in checker for cross-platform portability hazards.
pub struct PortabilityChecker;

#[async_trait]
impl Checker for PortabilityChecker {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn description(&self) -> &'static str {
        "Cross-platform portability hazards (built-in, deterministic)"
    }

    async fn execute(&self, artifact: &SkillArtifact) -> CheckResult {
        // The entry document, then bundled scripts in sorted path order.
        // Unreadable bundle files are skipped; the entry text is already in
        // memory.
        let mut texts: Vec<(String, String)> =
            vec![("entry document".to_string(), artifact.body_text.clone())];
        if let Some(dir) = artifact.canonical_path.parent() {
            for file in collect_files(dir, SCRIPT_EXTENSIONS) {
                if let Ok(content) = std::fs::read_to_string(&file) {
                    let label = file
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    texts.push((label, content));
                }
            }
        }

        let mut findings = Vec::new();

        for rule in RULES {
            let hit = texts.iter().find_map(|(label, content)| {
                content
                    .lines()
                    .enumerate()
                    .find(|(_, line)| rule.regex.is_match(line))
                    .map(|(idx, _)| (label, idx + 1))
            });
            if let Some((label, line)) = hit {
                findings.push(
                    Finding::new(
                        rule.severity,
                        format!(
                            "{}: {} ({} line {})",
                            artifact.identifier, rule.message, label, line
                        ),
                        SOURCE_NAME,
                    )
                    .with_fix(rule.fix),
                );
            }
        }

        // lines() strips line endings, so CRLF is checked on the raw text.
        if let Some((label, _)) = texts.iter().find(|(_, content)| content.contains("\r\n")) {
            findings.push(
                Finding::new(
                    Severity::Low,
                    format!("{}: CRLF line endings ({})", artifact.identifier, label),
                    SOURCE_NAME,
                )
                .with_fix("Normalize line endings to LF"),
            );
        }

        Ok(findings)
    }
}

/// Returns the [`RuleInfo`](crate::RuleInfo) catalogue for every portability rule.
pub fn rules() -> Vec<crate::RuleInfo> {
    let mut rules: Vec<crate::RuleInfo> = RULES
        .iter()
        .map(|r| crate::RuleInfo {
            id: r.id,
            severity: r.severity,
            source: SOURCE_NAME,
            message: r.message,
            fix: r.fix,
        })
        .collect();
    rules.push(crate::RuleInfo {
        id: "portability/crlf-line-endings",
        severity: Severity::Low,
        source: SOURCE_NAME,
        message: "CRLF line endings",
        fix: "Normalize line endings to LF",
    });
    rules
}
