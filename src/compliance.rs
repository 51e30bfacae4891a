//! Compliance-framework mapping.
//!
//! [`map_compliance`] enriches findings with external framework references
//! (OWASP LLM Top 10, CWE) by evaluating a fixed, ordered rule catalog. The
//! transform is pure and idempotent: findings never lose fields, refs are
//! de-duplicated by id, and findings matching no rule pass through with
//! `compliance_refs` still absent.

use crate::finding::{ComplianceRef, Finding};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

struct RefDef {
    framework: &'static str,
    id: &'static str,
    name: &'static str,
    url: &'static str,
}

impl RefDef {
    fn to_ref(&self) -> ComplianceRef {
        ComplianceRef {
            framework: self.framework.to_string(),
            id: self.id.to_string(),
            name: self.name.to_string(),
            url: self.url.to_string(),
        }
    }
}

/// One mapping rule. Fires when the source restriction is absent or matches
/// the finding's `source_name`, AND the message restriction is absent or at
/// least one pattern matches the finding's message.
struct ComplianceRule {
    sources: Option<&'static [&'static str]>,
    message_patterns: Option<&'static [&'static LazyLock<Regex>]>,
    refs: &'static [RefDef],
}

impl ComplianceRule {
    fn fires(&self, finding: &Finding) -> bool {
        let source_ok = self
            .sources
            .map_or(true, |s| s.contains(&finding.source_name.as_str()));
        let message_ok = self
            .message_patterns
            .map_or(true, |ps| ps.iter().any(|p| p.is_match(&finding.message)));
        source_ok && message_ok
    }
}

static RE_CREDENTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)access key|token|private key|secret value").unwrap()
});

static RE_COMMAND_EXEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)force-delete|piped directly into a shell|dynamic eval|shell interpreter")
        .unwrap()
});

static RE_EXFILTRATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)outbound post").unwrap());

static RE_OBFUSCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)base64-alphabet run|invisible unicode").unwrap()
});

static RE_TRAVERSAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)path traversal").unwrap());

static CREDENTIAL_PATTERNS: &[&LazyLock<Regex>] = &[&RE_CREDENTIAL];
static COMMAND_EXEC_PATTERNS: &[&LazyLock<Regex>] = &[&RE_COMMAND_EXEC];
static EXFILTRATION_PATTERNS: &[&LazyLock<Regex>] = &[&RE_EXFILTRATION, &RE_CREDENTIAL];
static OBFUSCATION_PATTERNS: &[&LazyLock<Regex>] = &[&RE_OBFUSCATION];
static TRAVERSAL_PATTERNS: &[&LazyLock<Regex>] = &[&RE_TRAVERSAL];

static PATTERN_SOURCES: &[&str] = &["patterns", "security", "secrets"];
static SPEC_SOURCES: &[&str] = &["spec", "metadata", "frontmatter"];

/// The catalog. Immutable, ordered; order only affects which rule's copy of
/// a duplicated ref wins, and duplicates are identical by construction.
static RULES: &[ComplianceRule] = &[
    ComplianceRule {
        sources: Some(PATTERN_SOURCES),
        message_patterns: Some(CREDENTIAL_PATTERNS),
        refs: &[
            RefDef {
                framework: "CWE",
                id: "CWE-798",
                name: "Use of Hard-coded Credentials",
                url: "https://cwe.mitre.org/data/definitions/798.html",
            },
            RefDef {
                framework: "OWASP-LLM",
                id: "LLM02",
                name: "Sensitive Information Disclosure",
                url: "https://genai.owasp.org/llmrisk/llm02-sensitive-information-disclosure/",
            },
        ],
    },
    ComplianceRule {
        sources: Some(PATTERN_SOURCES),
        message_patterns: Some(COMMAND_EXEC_PATTERNS),
        refs: &[
            RefDef {
                framework: "CWE",
                id: "CWE-78",
                name: "OS Command Injection",
                url: "https://cwe.mitre.org/data/definitions/78.html",
            },
            RefDef {
                framework: "OWASP-LLM",
                id: "LLM06",
                name: "Excessive Agency",
                url: "https://genai.owasp.org/llmrisk/llm06-excessive-agency/",
            },
        ],
    },
    ComplianceRule {
        sources: Some(PATTERN_SOURCES),
        message_patterns: Some(EXFILTRATION_PATTERNS),
        refs: &[
            RefDef {
                framework: "CWE",
                id: "CWE-200",
                name: "Exposure of Sensitive Information",
                url: "https://cwe.mitre.org/data/definitions/200.html",
            },
            RefDef {
                framework: "OWASP-LLM",
                id: "LLM02",
                name: "Sensitive Information Disclosure",
                url: "https://genai.owasp.org/llmrisk/llm02-sensitive-information-disclosure/",
            },
        ],
    },
    ComplianceRule {
        sources: Some(PATTERN_SOURCES),
        message_patterns: Some(OBFUSCATION_PATTERNS),
        refs: &[
            RefDef {
                framework: "CWE",
                id: "CWE-506",
                name: "Embedded Malicious Code",
                url: "https://cwe.mitre.org/data/definitions/506.html",
            },
            RefDef {
                framework: "OWASP-LLM",
                id: "LLM01",
                name: "Prompt Injection",
                url: "https://genai.owasp.org/llmrisk/llm01-prompt-injection/",
            },
        ],
    },
    ComplianceRule {
        sources: Some(PATTERN_SOURCES),
        message_patterns: Some(TRAVERSAL_PATTERNS),
        refs: &[RefDef {
            framework: "CWE",
            id: "CWE-22",
            name: "Path Traversal",
            url: "https://cwe.mitre.org/data/definitions/22.html",
        }],
    },
    ComplianceRule {
        sources: Some(SPEC_SOURCES),
        message_patterns: None,
        refs: &[RefDef {
            framework: "OWASP-LLM",
            id: "LLM03",
            name: "Supply Chain",
            url: "https://genai.owasp.org/llmrisk/llm03-supply-chain/",
        }],
    },
];

/// Attaches compliance references to every finding matched by the catalog.
///
/// Refs from all firing rules are unioned and de-duplicated by ref id, so a
/// finding never carries two refs with the same id even when multiple rules
/// reference it — which also makes the transform idempotent. Findings
/// matching no rule are returned unchanged.
pub fn map_compliance(findings: &[Finding]) -> Vec<Finding> {
    findings
        .iter()
        .map(|finding| {
            let mut refs: Vec<ComplianceRef> = finding.compliance_refs.clone().unwrap_or_default();
            let mut seen: BTreeSet<String> = refs.iter().map(|r| r.id.clone()).collect();

            let mut matched = false;
            for rule in RULES {
                if !rule.fires(finding) {
                    continue;
                }
                matched = true;
                for def in rule.refs {
                    if seen.insert(def.id.to_string()) {
                        refs.push(def.to_ref());
                    }
                }
            }

            if matched || finding.compliance_refs.is_some() {
                finding.with_compliance_refs(refs)
            } else {
                finding.clone()
            }
        })
        .collect()
}

/// Collects every attached framework label across all findings,
/// de-duplicated and lexicographically sorted.
pub fn affected_frameworks(findings: &[Finding]) -> Vec<String> {
    let labels: BTreeSet<String> = findings
        .iter()
        .filter_map(|f| f.compliance_refs.as_ref())
        .flatten()
        .map(|r| r.label())
        .collect();
    labels.into_iter().collect()
}
