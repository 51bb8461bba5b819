//! File enumeration by glob pattern.
//!
//! Turns the configured pattern list into the ordered list of relative paths
//! both tools iterate over.
//!
//! ## Matching rules
//!
//! - Patterns are relative to the project root and use `/` separators.
//! - `**` matches any number of directories, `*` and `?` never cross `/`,
//!   `{a,b}` picks alternatives. Matching is case-sensitive.
//! - Only files are returned. Hidden files and directories (a name starting
//!   with `.`) below a pattern's literal prefix are skipped entirely.
//!
//! ## Ordering
//!
//! Patterns are walked in order. Within one pattern, entries come out sorted
//! by file name, depth first. A path matched by more than one pattern keeps
//! its first position only:
//!
//! ```text
//! patterns: ["public/*.png", "public/**/*.{png,jpg}"]
//! public/a.png        ← pattern 1
//! public/b.png        ← pattern 1
//! public/img/c.jpg    ← pattern 2 (a.png, b.png not repeated)
//! ```

use globset::{GlobBuilder, GlobMatcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// A compiled pattern plus the directory its walk starts from.
struct CompiledPattern {
    base: PathBuf,
    matcher: GlobMatcher,
}

fn compile(root: &Path, pattern: &str) -> Result<CompiledPattern, ScanError> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| ScanError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
    Ok(CompiledPattern {
        base: root.join(pattern_base(pattern)),
        matcher: glob.compile_matcher(),
    })
}

/// The leading run of path segments that contain no glob syntax.
///
/// `src/**/assets/*.png` → `src`, `public/*.png` → `public`, `*.png` → `""`.
pub fn pattern_base(pattern: &str) -> String {
    pattern
        .split('/')
        .take_while(|segment| !segment.contains(['*', '?', '[', '{']))
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

/// Render `path` relative to `root` with `/` separators.
fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Enumerate files under `root` matching any of `patterns`.
///
/// Returns deduplicated relative paths in pattern order. A pattern whose
/// literal prefix does not exist contributes nothing.
pub fn enumerate(root: &Path, patterns: &[String]) -> Result<Vec<String>, ScanError> {
    let compiled: Vec<CompiledPattern> = patterns
        .iter()
        .map(|p| compile(root, p))
        .collect::<Result<_, _>>()?;

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for (pattern, CompiledPattern { base, matcher }) in patterns.iter().zip(&compiled) {
        if !base.exists() {
            debug!(pattern = %pattern, base = %base.display(), "pattern base missing, skipping");
            continue;
        }

        let walker = WalkDir::new(base)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        let mut matched = 0usize;
        for entry in walker {
            let entry = entry.map_err(|source| ScanError::Walk {
                path: base.clone(),
                source,
            })?;
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            let Some(rel) = relative_slash_path(root, entry.path()) else {
                continue;
            };
            if matcher.is_match(&rel) && seen.insert(rel.clone()) {
                matched += 1;
                files.push(rel);
            }
        }
        debug!(pattern = %pattern, matched, "pattern enumerated");
    }

    Ok(files)
}
