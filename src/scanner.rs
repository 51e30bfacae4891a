//! Pattern scanner for known-dangerous text.
//!
//! [`scan`] is a pure function from artifact text to findings, driven by a
//! fixed, ordered rule catalog. Each rule reports **at most one** finding
//! per scan — the earliest matching line — so a pattern repeated across a
//! file cannot flood the report. Identical input always yields identical
//! output in catalog order.
//!
//! # Rule groups
//!
//! | Group | Rules | Severity |
//! |-------|-------|----------|
//! | Hardcoded credentials | cloud keys, VCS tokens, private-key blocks, bearer/JWT, secret assignments | critical / high |
//! | Destructive & RCE | recursive force-delete, fetch-pipe-shell, dynamic eval, shell exec | critical / high |
//! | Exfiltration | outbound POST with embedded URL | high |
//! | Obfuscation | long base64 runs, invisible Unicode | medium |
//! | Path traversal | repeated `../` sequences | medium |

use crate::finding::{Finding, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// `source_name` stamped on every finding this scanner produces.
pub const SOURCE_NAME: &str = "patterns";

/// Minimum contiguous base64-alphabet run length before the obfuscation
/// rule fires. Short encoded values (hashes, small payloads) are legitimate
/// and common; only very long blobs are suspicious.
pub const BASE64_RUN_MIN: usize = 200;

struct PatternRule {
    id: &'static str,
    severity: Severity,
    regex: &'static LazyLock<Regex>,
    message: &'static str,
    fix: &'static str,
}

// Hardcoded credentials

static RE_CLOUD_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b").unwrap());

static RE_VCS_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:ghp|gho|ghu|ghs|ghr)_[A-Za-z0-9]{36}\b|\bglpat-[A-Za-z0-9_\-]{20}\b")
        .unwrap()
});

static RE_PRIVATE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-----BEGIN (?:RSA |EC |DSA |OPENSSH |PGP )?PRIVATE KEY").unwrap()
});

// Either an explicit Bearer header value or a bare JWT (three dot-separated
// base64url segments starting with the {"alg"... header prefix eyJ).
static RE_BEARER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bbearer\s+[A-Za-z0-9_\-.=]{20,}|\beyJ[A-Za-z0-9_\-]{10,}\.[A-Za-z0-9_\-]{10,}\.")
        .unwrap()
});

static RE_SECRET_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:api[_-]?key|secret|password|token)\s*[:=]\s*["'][^"']{8,}["']"#)
        .unwrap()
});

// Destructive & remote-code-execution shell idioms

static RE_FORCE_DELETE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\brm\s+-(?:[a-z]*r[a-z]*f|[a-z]*f[a-z]*r)[a-z]*\b").unwrap()
});

static RE_FETCH_PIPE_SHELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:curl|wget|fetch)\b[^|\n]*\|\s*(?:bash|sh|zsh)\b").unwrap()
});

static RE_DYNAMIC_EVAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\beval\s*[("'`$]"#).unwrap());

static RE_SHELL_EXEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:exec|system|popen|spawn)\s*\(\s*["'](?:/bin/)?(?:bash|sh|zsh)\b"#)
        .unwrap()
});

// Exfiltration

// Both argument orders are spelled out because the regex crate has no
// lookaround: POST marker before URL, URL before POST marker, or an HTTP
// client .post call with an inline URL.
static RE_OUTBOUND_POST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:curl|wget)[^\n]*(?:-X\s*POST|--data\b|-d\s)[^\n]*https?://|(?:curl|wget)[^\n]*https?://[^\n]*(?:-X\s*POST|--data\b|-d\s)|\.post\s*\(\s*["']https?://"#,
    )
    .unwrap()
});

// Obfuscation

static RE_BASE64_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"[A-Za-z0-9+/=]{{{BASE64_RUN_MIN},}}")).unwrap()
});

static RE_INVISIBLE_UNICODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[\u{200B}\u{200C}\u{200D}\u{2060}\u{FEFF}]").unwrap()
});

// Path traversal

static RE_PATH_TRAVERSAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\.\.[/\\]){2,}").unwrap());

/// The catalog. Order is fixed and is the output order of [`scan`];
/// matching is independent per rule, so order affects readability only.
static RULES: &[PatternRule] = &[
    PatternRule {
        id: "patterns/cloud-access-key",
        severity: Severity::Critical,
        regex: &RE_CLOUD_KEY,
        message: "Hardcoded cloud access key",
        fix: "Remove the key, rotate it immediately, and load credentials from the environment",
    },
    PatternRule {
        id: "patterns/vcs-token",
        severity: Severity::Critical,
        regex: &RE_VCS_TOKEN,
        message: "Hardcoded revision-control access token",
        fix: "Revoke the token and use a credential helper instead of embedding it",
    },
    PatternRule {
        id: "patterns/private-key-block",
        severity: Severity::Critical,
        regex: &RE_PRIVATE_KEY,
        message: "Embedded private key block",
        fix: "Remove the private key and distribute it through a secret manager",
    },
    PatternRule {
        id: "patterns/bearer-token",
        severity: Severity::Critical,
        regex: &RE_BEARER_TOKEN,
        message: "Hardcoded bearer or JWT token",
        fix: "Remove the token and obtain it at runtime from configuration",
    },
    PatternRule {
        id: "patterns/secret-assignment",
        severity: Severity::High,
        regex: &RE_SECRET_ASSIGN,
        message: "Secret value assigned to a credential-named variable",
        fix: "Read secrets from the environment or a secret manager, not literals",
    },
    PatternRule {
        id: "patterns/recursive-force-delete",
        severity: Severity::Critical,
        regex: &RE_FORCE_DELETE,
        message: "Recursive force-delete command",
        fix: "Scope deletions to validated paths and avoid rm -rf in skill scripts",
    },
    PatternRule {
        id: "patterns/fetch-pipe-shell",
        severity: Severity::Critical,
        regex: &RE_FETCH_PIPE_SHELL,
        message: "Download piped directly into a shell interpreter",
        fix: "Download to a file, verify its checksum, then execute explicitly",
    },
    PatternRule {
        id: "patterns/dynamic-eval",
        severity: Severity::High,
        regex: &RE_DYNAMIC_EVAL,
        message: "Dynamic eval of generated content",
        fix: "Replace eval with explicit function calls or a dispatch table",
    },
    PatternRule {
        id: "patterns/shell-exec-interpreter",
        severity: Severity::High,
        regex: &RE_SHELL_EXEC,
        message: "Process execution with a hardcoded shell interpreter",
        fix: "Invoke the target program directly instead of wrapping it in a shell",
    },
    PatternRule {
        id: "patterns/outbound-post",
        severity: Severity::High,
        regex: &RE_OUTBOUND_POST,
        message: "Outbound POST request with embedded URL",
        fix: "Remove outbound data transmission or document the destination explicitly",
    },
    PatternRule {
        id: "patterns/base64-blob",
        severity: Severity::Medium,
        regex: &RE_BASE64_RUN,
        message: "Very long base64-alphabet run — possible obfuscated payload",
        fix: "Replace encoded blobs with plain-text source or a fetched, checksummed asset",
    },
    PatternRule {
        id: "patterns/invisible-unicode",
        severity: Severity::Medium,
        regex: &RE_INVISIBLE_UNICODE,
        message: "Zero-width or invisible Unicode code point",
        fix: "Delete invisible characters; they can hide instructions from review",
    },
    PatternRule {
        id: "patterns/path-traversal",
        severity: Severity::Medium,
        regex: &RE_PATH_TRAVERSAL,
        message: "Path traversal sequence",
        fix: "Use paths anchored inside the skill directory",
    },
];

/// Scans `content` for every catalog rule.
///
/// `label` names the artifact being scanned and is interpolated into each
/// finding's message together with the 1-based line number of the earliest
/// matching line. Never fails; unmatched content yields an empty list.
pub fn scan(content: &str, label: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for rule in RULES {
        // First matching line only. Stops the scan for this rule as soon as
        // a line matches, so repeated occurrences produce a single finding.
        let hit = content
            .lines()
            .enumerate()
            .find(|(_, line)| rule.regex.is_match(line));

        if let Some((idx, _)) = hit {
            findings.push(
                Finding::new(
                    rule.severity,
                    format!("{}: {} (line {})", label, rule.message, idx + 1),
                    SOURCE_NAME,
                )
                .with_fix(rule.fix),
            );
        }
    }

    findings
}

/// Returns the [`RuleInfo`](crate::RuleInfo) catalogue for every pattern rule.
pub fn rules() -> Vec<crate::RuleInfo> {
    RULES
        .iter()
        .map(|r| crate::RuleInfo {
            id: r.id,
            severity: r.severity,
            source: SOURCE_NAME,
            message: r.message,
            fix: r.fix,
        })
        .collect()
}
