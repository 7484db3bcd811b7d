//! Source-tree scanning and move planning.
//!
//! The scanner walks the source tree once, resolves a category for every
//! file it finds and produces the full list of planned moves before any
//! worker starts moving files. Traversal is depth-first with lexical
//! per-directory ordering, so for unchanged filesystem state two scans
//! produce identical plans.

use crate::category::CategoryMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A single intended relocation, produced by the scanner and consumed
/// exactly once by a move executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    /// Path of the file to relocate.
    pub source: PathBuf,
    /// Target path `<dest_root>/<category>/<basename>`.
    pub dest: PathBuf,
    /// If true, the executor simulates the move without touching the
    /// filesystem.
    pub dry_run: bool,
}

/// Counters describing one scan pass.
///
/// Every filesystem entry the walk yields lands in exactly one bucket, so
/// `total_planned + total_skipped + dirs_visited + errored_entries`
/// always equals `total_visited`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Every entry visited, files and directories alike.
    pub total_visited: usize,
    /// Files for which a move was planned.
    pub total_planned: usize,
    /// Files skipped because they already live under the destination root.
    pub total_skipped: usize,
    /// Directories visited (the source root included).
    pub dirs_visited: usize,
    /// Entries that could not be read during traversal.
    pub errored_entries: usize,
    /// The first per-entry traversal error, if any. Later errors do not
    /// overwrite it.
    pub first_error: Option<String>,
}

impl ScanSummary {
    fn record_entry_error(&mut self, err: &walkdir::Error) {
        self.errored_entries += 1;
        if self.first_error.is_none() {
            self.first_error = Some(err.to_string());
        }
    }
}

/// Fatal scan failures. Per-entry problems are not errors at this level;
/// they are recorded in the [`ScanSummary`] and traversal continues.
#[derive(Debug)]
pub enum ScanError {
    /// The source root itself could not be walked. No moves are planned.
    RootUnreadable {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootUnreadable { path, source } => {
                write!(f, "Cannot walk source root {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RootUnreadable { source, .. } => Some(source),
        }
    }
}

/// Walks `source_root` and plans one move per eligible file.
///
/// Files already under `dest_root` are counted as skipped so repeated runs
/// never re-process their own output. When `recursive` is false,
/// subdirectories of the root are visited as single entries but never
/// descended into.
///
/// Unreadable entries are skipped and recorded in the summary; only a
/// failure to walk the root itself aborts the scan.
pub fn scan(
    source_root: &Path,
    dest_root: &Path,
    recursive: bool,
    dry_run: bool,
    mapping: &CategoryMap,
) -> Result<(ScanSummary, Vec<PlannedMove>), ScanError> {
    let mut summary = ScanSummary::default();
    let mut planned = Vec::new();

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(source_root)
        .sort_by_file_name()
        .max_depth(max_depth);

    for item in walker {
        summary.total_visited += 1;
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                // An error at depth 0 means the root itself is unwalkable.
                if err.depth() == 0 {
                    return Err(ScanError::RootUnreadable {
                        path: source_root.to_path_buf(),
                        source: err,
                    });
                }
                summary.record_entry_error(&err);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            summary.dirs_visited += 1;
            continue;
        }

        let path = entry.into_path();
        if path.starts_with(dest_root) {
            summary.total_skipped += 1;
            continue;
        }

        let category = mapping.resolve(&extension_of(&path));
        let file_name = match path.file_name() {
            Some(name) => name.to_os_string(),
            // Cannot happen for a file yielded by the walk, but a missing
            // basename must not abort the scan.
            None => {
                summary.total_skipped += 1;
                continue;
            }
        };

        let dest = dest_root.join(category).join(file_name);
        planned.push(PlannedMove {
            source: path,
            dest,
            dry_run,
        });
    }

    summary.total_planned = planned.len();
    Ok((summary, planned))
}

/// Returns the lowercased extension of `path` including the leading dot,
/// or an empty string when the file has none.
fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
        None => String::new(),
    }
}
