//! Skill artifact model and entry-file loading.
//!
//! A [`SkillArtifact`] is the unit of inspection: structured metadata parsed
//! from the entry file's frontmatter, the full body text, and the canonical
//! path it was loaded from. Locating artifacts beyond a local directory
//! (remote repositories, registries) is a separate concern and not handled
//! here.
//!
//! # Frontmatter parsing
//!
//! A lightweight YAML subset parser is used instead of a full YAML crate.
//! It supports scalar `key: value` pairs, block sequences (`- item`), and
//! flow sequences (`[item, item]`), which covers everything skill entry
//! files use in practice. Sequence values are flattened to a single
//! comma-separated string.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Canonical entry-file name for a skill directory.
pub const ENTRY_FILE: &str = "SKILL.md";

/// The structured document plus body being inspected.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SkillArtifact {
    /// Declared identifier (the frontmatter `name`, or the directory name
    /// when no name is declared).
    pub identifier: String,
    /// Declared description, when present.
    pub declared_description: Option<String>,
    /// Every frontmatter field, in key order. Sequence values are joined
    /// with `", "`.
    pub metadata: BTreeMap<String, String>,
    /// Full text of the entry file, frontmatter included.
    pub body_text: String,
    /// Path the artifact was loaded from.
    pub canonical_path: PathBuf,
}

impl SkillArtifact {
    /// Loads the artifact from a skill directory (expects `SKILL.md` inside).
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` when the entry file is missing or unreadable.
    pub fn from_dir(dir: &Path) -> Result<SkillArtifact, String> {
        let entry = dir.join(ENTRY_FILE);
        if !entry.exists() {
            return Err(format!("{} not found in {}", ENTRY_FILE, dir.display()));
        }
        Self::from_entry_file(&entry)
    }

    /// Loads the artifact from an explicit entry-file path.
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` when the file cannot be read.
    pub fn from_entry_file(path: &Path) -> Result<SkillArtifact, String> {
        let body_text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let metadata = parse_frontmatter(&body_text);

        let identifier = metadata
            .get("name")
            .cloned()
            .or_else(|| dir_name_of(path))
            .unwrap_or_else(|| "unknown".to_string());

        Ok(SkillArtifact {
            identifier,
            declared_description: metadata.get("description").cloned(),
            metadata,
            body_text,
            canonical_path: path.to_path_buf(),
        })
    }

    /// True when the canonical path names the entry file (`SKILL.md`).
    ///
    /// Ad-hoc inspections of arbitrary files are not entry paths, and
    /// directory-layout checks do not apply to them.
    pub fn is_entry_path(&self) -> bool {
        self.canonical_path
            .file_name()
            .map(|n| n == ENTRY_FILE)
            .unwrap_or(false)
    }

    /// Name of the directory containing the artifact, when it has one.
    pub fn containing_dir_name(&self) -> Option<String> {
        self.canonical_path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
    }
}

/// Name of the directory containing `path`, when available.
fn dir_name_of(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
}

/// Parse the YAML frontmatter block from `content` into a field map.
///
/// Returns an empty map when the content does not begin with `---`. The
/// parser reads until the closing `---` line (or end-of-file), collecting
/// every top-level key.
pub fn parse_frontmatter(content: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let mut lines = content.lines();

    // First line must be the opening delimiter.
    match lines.next() {
        Some(first) if first.trim() == "---" => {}
        _ => return fields,
    }

    // The key whose block-sequence items we are currently collecting.
    let mut current_key: Option<String> = None;

    for line in lines {
        // Closing delimiter ends the frontmatter block.
        if line.trim() == "---" {
            break;
        }

        // Block-sequence item: `  - value` (indented) or `- value` (unindented).
        let is_list_item = line.starts_with("  - ")
            || line.starts_with("\t- ")
            || (line.starts_with("- ") && current_key.is_some());
        if is_list_item {
            let item = line
                .trim_start_matches(|c: char| c.is_whitespace())
                .strip_prefix("- ")
                .unwrap_or("")
                .trim();
            if let (Some(key), false) = (&current_key, item.is_empty()) {
                let entry = fields.entry(key.clone()).or_insert_with(String::new);
                if !entry.is_empty() {
                    entry.push_str(", ");
                }
                entry.push_str(item);
            }
            continue;
        }

        // Key: value line.
        if let Some((key, val)) = parse_kv(line) {
            current_key = Some(key.clone());
            let val = val.trim();
            if val.starts_with('[') && val.ends_with(']') {
                // Flow sequence: `allowed-tools: [Bash, Write]`
                let inner = &val[1..val.len() - 1];
                let joined = split_flow_sequence(inner).join(", ");
                fields.insert(key, joined);
            } else {
                // Scalar value. An empty value means a block sequence may
                // follow; insert the key so it still counts as present.
                fields.insert(key, strip_quotes(val).to_string());
            }
        }
    }

    fields
}

/// Split a YAML `key: value` line into `(key, value)`.
///
/// Only lines starting with a non-whitespace character (top-level keys) are
/// recognized. Keys may contain letters, digits, hyphens, and underscores.
fn parse_kv(line: &str) -> Option<(String, String)> {
    if line.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim().to_string();
    if key.is_empty() {
        return None;
    }
    let after = &line[colon_pos + 1..];
    let value = after.strip_prefix(' ').unwrap_or(after);
    Some((key, value.to_string()))
}

/// Split a flow-sequence inner string on commas that are not inside
/// parentheses, so `[Bash(find,ls), Write]` yields two items, not three.
fn split_flow_sequence(inner: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = inner[start..].trim();
    if !last.is_empty() {
        items.push(last);
    }
    items
}

/// Strip one matching pair of surrounding single or double quotes.
fn strip_quotes(val: &str) -> &str {
    let v = val.trim();
    if v.len() >= 2 {
        let bytes = v.as_bytes();
        if (bytes[0] == b'"' && bytes[v.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[v.len() - 1] == b'\'')
        {
            return &v[1..v.len() - 1];
        }
    }
    v
}
