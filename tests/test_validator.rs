use skill_inspector::artifact::SkillArtifact;
use skill_inspector::finding::Severity;
use skill_inspector::validator::validate;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn artifact(fields: &[(&str, &str)], path: &str) -> SkillArtifact {
    let metadata: BTreeMap<String, String> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    SkillArtifact {
        identifier: metadata
            .get("name")
            .cloned()
            .unwrap_or_else(|| "unknown".to_string()),
        declared_description: metadata.get("description").cloned(),
        metadata,
        body_text: String::new(),
        canonical_path: PathBuf::from(path),
    }
}

#[test]
fn valid_metadata_yields_no_findings() {
    let a = artifact(
        &[
            ("name", "csv-formatter"),
            ("description", "Formats CSV files. Use when asked to tidy tables."),
        ],
        "skills/csv-formatter/SKILL.md",
    );
    let findings = validate(&a);
    assert!(findings.is_empty(), "Expected no findings, got: {findings:?}");
}

#[test]
fn allow_listed_optional_fields_are_silent() {
    let a = artifact(
        &[
            ("name", "csv-formatter"),
            ("description", "Formats CSV files."),
            ("license", "MIT"),
            ("version", "1.2.0"),
            ("allowed-tools", "Bash(ls,cat)"),
        ],
        "skills/csv-formatter/SKILL.md",
    );
    assert!(validate(&a).is_empty());
}

#[test]
fn missing_name_is_critical() {
    let a = artifact(&[("description", "Does things.")], "skills/x/SKILL.md");
    let findings = validate(&a);
    let name_findings: Vec<_> = findings
        .iter()
        .filter(|f| f.message.contains("'name'"))
        .collect();
    assert_eq!(name_findings.len(), 1);
    assert_eq!(name_findings[0].severity, Severity::Critical);
}

#[test]
fn uppercase_or_underscored_name_is_critical() {
    for bad in ["My_Skill", "UPPER", "has space", "-leading", "trailing-", "double--hyphen"] {
        let a = artifact(
            &[("name", bad), ("description", "Does things.")],
            "skills/whatever/SKILL.md",
        );
        let findings = validate(&a);
        assert!(
            findings
                .iter()
                .any(|f| f.severity == Severity::Critical
                    && f.message.contains("lowercase-kebab-case")),
            "Expected a format finding for name {bad:?}, got: {findings:?}"
        );
    }
}

#[test]
fn overlong_name_is_critical() {
    let long = "a".repeat(65);
    let a = artifact(
        &[("name", long.as_str()), ("description", "Does things.")],
        "skills/whatever/SKILL.md",
    );
    let findings = validate(&a);
    assert!(findings
        .iter()
        .any(|f| f.severity == Severity::Critical && f.message.contains("maximum is 64")));
}

#[test]
fn overlong_description_is_critical() {
    let long = "d".repeat(1025);
    let a = artifact(
        &[("name", "ok-name"), ("description", long.as_str())],
        "skills/ok-name/SKILL.md",
    );
    let findings = validate(&a);
    assert!(findings
        .iter()
        .any(|f| f.severity == Severity::Critical && f.message.contains("maximum is 1024")));
}

#[test]
fn unknown_fields_are_medium_one_each() {
    let a = artifact(
        &[
            ("name", "ok-name"),
            ("description", "Does things."),
            ("build-command", "make"),
            ("entrypoint", "run.sh"),
        ],
        "skills/ok-name/SKILL.md",
    );
    let findings = validate(&a);
    let unauthorized: Vec<_> = findings
        .iter()
        .filter(|f| f.message.contains("Unauthorized metadata field"))
        .collect();
    assert_eq!(unauthorized.len(), 2);
    assert!(unauthorized.iter().all(|f| f.severity == Severity::Medium));
    assert!(unauthorized.iter().any(|f| f.message.contains("'build-command'")));
    assert!(unauthorized.iter().any(|f| f.message.contains("'entrypoint'")));
}

#[test]
fn name_directory_mismatch_is_critical() {
    let a = artifact(
        &[("name", "csv-formatter"), ("description", "Formats CSV files.")],
        "skills/some-other-dir/SKILL.md",
    );
    let findings = validate(&a);
    assert!(findings.iter().any(|f| {
        f.severity == Severity::Critical && f.message.contains("does not match containing directory")
    }));
}

#[test]
fn directory_check_is_skipped_for_non_entry_paths() {
    // Same mismatch, but the artifact was loaded ad hoc from a plain file —
    // the layout contract does not apply, so no directory finding fires.
    let a = artifact(
        &[("name", "csv-formatter"), ("description", "Formats CSV files.")],
        "scratch/notes.md",
    );
    let findings = validate(&a);
    assert!(
        !findings
            .iter()
            .any(|f| f.message.contains("containing directory")),
        "Directory check should be skipped, got: {findings:?}"
    );
}

#[test]
fn all_findings_carry_the_spec_source() {
    let a = artifact(&[("stray", "value")], "skills/x/SKILL.md");
    let findings = validate(&a);
    assert!(!findings.is_empty());
    assert!(findings.iter().all(|f| f.source_name == "spec"));
}
