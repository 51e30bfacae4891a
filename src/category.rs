//! Category partition and source-name classification.
//!
//! Every finding belongs to exactly one [`Category`], inferred from its
//! `source_name`. Each category carries a fixed maximum score deduction
//! (its *cap*); caps sum to 100 so a run with every category saturated
//! scores exactly 0.

use std::fmt;

/// A bucket of related checkers/sources sharing one maximum deduction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Spec,
    Portability,
}

impl Category {
    /// Maximum points this category can deduct from the score.
    pub fn cap(&self) -> u32 {
        match self {
            Category::Security => 60,
            Category::Spec => 20,
            Category::Portability => 20,
        }
    }

    /// All categories, in serialization order.
    pub fn all() -> [Category; 3] {
        [Category::Security, Category::Spec, Category::Portability]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Security => write!(f, "security"),
            Category::Spec => write!(f, "spec"),
            Category::Portability => write!(f, "portability"),
        }
    }
}

/// Maps a finding's or checker's `source_name` onto its [`Category`].
///
/// Total function: never fails, never drops a source. Unrecognized names
/// fall back to [`Category::Security`] — fail-closed, so an unclassifiable
/// source pessimizes the score rather than silently under-counting. The
/// cost is that a misnamed benign checker inflates the security deduction;
/// checkers should pick one of the recognized prefixes below.
pub fn classify(source_name: &str) -> Category {
    let name = source_name.to_ascii_lowercase();
    if name.starts_with("spec") || name.starts_with("metadata") || name.starts_with("frontmatter") {
        Category::Spec
    } else if name.starts_with("portability") || name.starts_with("platform") {
        Category::Portability
    } else {
        // "patterns", "security", "secrets", and everything unrecognized.
        Category::Security
    }
}
