//! Built-in [`Checker`](crate::checker::Checker) implementations.
//!
//! External analyzer-backed checkers (including anything that calls a
//! hosted model) live outside this crate and register through the same
//! trait; the built-ins here are deterministic and need no external tools.

pub mod portability;

use crate::checker::Checker;
use crate::config::Config;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Returns every built-in checker enabled by `config`.
pub fn builtin_checkers(config: &Config) -> Vec<Arc<dyn Checker>> {
    let mut checkers: Vec<Arc<dyn Checker>> = Vec::new();
    if config.checkers.portability {
        checkers.push(Arc::new(portability::PortabilityChecker));
    }
    checkers
}

/// Recursively collects bundle files matching the given extensions.
///
/// Walks the directory tree under `path` and returns every regular file
/// whose extension (case-insensitive) appears in `extensions`, sorted so
/// results are order-stable across platforms. A missing or unreadable
/// directory yields an empty list.
pub fn collect_files(path: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy().to_lowercase();
            if extensions.contains(&ext_str.as_str()) {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files
}
