//! Per-file move execution.
//!
//! A [`MoveExecutor`] consumes one [`PlannedMove`] at a time: it ensures the
//! category directory exists, resolves name collisions and performs the
//! rename (or simulates it in dry-run mode). Every invocation produces
//! exactly one [`MoveOutcome`]; failures are converted into errored outcomes
//! rather than propagated, so a bad file never takes a worker down.

use crate::scanner::PlannedMove;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Upper bound on collision-rename attempts for a single move.
const MAX_CLAIM_ATTEMPTS: u32 = 100;

/// The unit of progress reported for one processed [`PlannedMove`].
///
/// Exactly one of `moved` and `errored` is 1, never both. `message` carries
/// optional human-readable detail (the error description, or a note that the
/// file was renamed to avoid a collision) for reporters to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: u64,
    pub errored: u64,
    pub message: Option<String>,
}

impl MoveOutcome {
    /// A successful move (or successful dry-run simulation).
    pub fn success(message: Option<String>) -> Self {
        Self {
            moved: 1,
            errored: 0,
            message,
        }
    }

    /// A failed move with the reason attached.
    pub fn failure(message: String) -> Self {
        Self {
            moved: 0,
            errored: 1,
            message: Some(message),
        }
    }
}

/// Errors that can fail a single move. These never escape the executor;
/// [`MoveExecutor::execute`] converts them into errored outcomes.
#[derive(Debug)]
pub enum MoveError {
    /// The planned destination has no parent directory or no file name.
    InvalidDestination { path: PathBuf },
    /// Failed to create the category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Probing or claiming the target path failed with something other
    /// than "already exists".
    TargetClaimFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Every collision-rename candidate was already taken.
    NoAvailableName { path: PathBuf },
    /// The rename itself failed.
    RenameFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDestination { path } => {
                write!(f, "Invalid destination path {}", path.display())
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::TargetClaimFailed { path, source } => {
                write!(f, "Failed to claim target {}: {}", path.display(), source)
            }
            Self::NoAvailableName { path } => {
                write!(
                    f,
                    "No collision-free name available for {}",
                    path.display()
                )
            }
            Self::RenameFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Executes planned moves one at a time.
pub struct MoveExecutor;

impl MoveExecutor {
    /// Processes one planned move and reports the outcome.
    ///
    /// Never returns an error: any failure along the way (directory
    /// creation, collision handling, the rename itself) is folded into an
    /// errored outcome so the caller can keep draining its queue.
    pub fn execute(planned: &PlannedMove) -> MoveOutcome {
        match Self::try_execute(planned) {
            Ok(final_path) => {
                let message = if final_path != planned.dest {
                    Some(format!(
                        "collision: stored as {}",
                        final_path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default()
                    ))
                } else {
                    None
                };
                MoveOutcome::success(message)
            }
            Err(err) => MoveOutcome::failure(err.to_string()),
        }
    }

    /// Runs the move steps, returning the final destination path actually
    /// used (which differs from the planned one after a collision rename).
    fn try_execute(planned: &PlannedMove) -> Result<PathBuf, MoveError> {
        let dest_dir = planned
            .dest
            .parent()
            .ok_or_else(|| MoveError::InvalidDestination {
                path: planned.dest.clone(),
            })?;

        if !dest_dir.exists() && !planned.dry_run {
            fs::create_dir_all(dest_dir).map_err(|e| MoveError::DirectoryCreationFailed {
                path: dest_dir.to_path_buf(),
                source: e,
            })?;
        }

        if planned.dry_run {
            // Read-only collision probe; a dry run must not create files,
            // so it cannot use the atomic claim below.
            return match planned.dest.try_exists() {
                Ok(true) => Ok(suffixed_candidate(&planned.dest, 0)?),
                Ok(false) => Ok(planned.dest.clone()),
                Err(e) => Err(MoveError::TargetClaimFailed {
                    path: planned.dest.clone(),
                    source: e,
                }),
            };
        }

        let final_path = Self::claim_target(&planned.dest)?;
        match fs::rename(&planned.source, &final_path) {
            Ok(()) => Ok(final_path),
            Err(e) => {
                // Best effort: do not leave the empty placeholder behind.
                let _ = fs::remove_file(&final_path);
                Err(MoveError::RenameFailed {
                    source: planned.source.clone(),
                    destination: final_path,
                    source_error: e,
                })
            }
        }
    }

    /// Reserves a collision-free target path with an atomic
    /// create-if-absent open.
    ///
    /// Two workers racing on the same basename cannot both claim the same
    /// path: the loser gets `AlreadyExists` and retries with a timestamp
    /// suffix, then with an added counter. The claimed placeholder file is
    /// replaced by the subsequent rename.
    fn claim_target(dest: &Path) -> Result<PathBuf, MoveError> {
        for attempt in 0..MAX_CLAIM_ATTEMPTS {
            let candidate = if attempt == 0 {
                dest.to_path_buf()
            } else {
                suffixed_candidate(dest, attempt - 1)?
            };
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
            {
                Ok(_) => return Ok(candidate),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(MoveError::TargetClaimFailed {
                        path: candidate,
                        source: e,
                    });
                }
            }
        }
        Err(MoveError::NoAvailableName {
            path: dest.to_path_buf(),
        })
    }
}

/// Builds the `counter`-th collision candidate for `dest`:
/// `<base>_<YYYYMMDD_HHMMSS><ext>` for 0, with a numeric suffix appended
/// for later attempts.
fn suffixed_candidate(dest: &Path, counter: u32) -> Result<PathBuf, MoveError> {
    let parent = dest.parent().ok_or_else(|| MoveError::InvalidDestination {
        path: dest.to_path_buf(),
    })?;
    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| MoveError::InvalidDestination {
            path: dest.to_path_buf(),
        })?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    let mut name = if counter == 0 {
        format!("{}_{}", stem, timestamp)
    } else {
        format!("{}_{}_{}", stem, timestamp, counter)
    };
    if let Some(ext) = dest.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    Ok(parent.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn planned(source: PathBuf, dest: PathBuf, dry_run: bool) -> PlannedMove {
        PlannedMove {
            source,
            dest,
            dry_run,
        }
    }

    #[test]
    fn test_execute_creates_category_directory_and_moves() {
        let tmp = TempDir::new().expect("Failed to create temp directory");
        let source = tmp.path().join("report.pdf");
        fs::write(&source, b"content").unwrap();
        let dest = tmp.path().join("organized").join("Documents").join("report.pdf");

        let outcome = MoveExecutor::execute(&planned(source.clone(), dest.clone(), false));

        assert_eq!(outcome.moved, 1);
        assert_eq!(outcome.errored, 0);
        assert!(!source.exists());
        assert!(dest.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"content");
    }

    #[test]
    fn test_collision_gets_timestamp_suffix_and_keeps_original() {
        let tmp = TempDir::new().expect("Failed to create temp directory");
        let dest_dir = tmp.path().join("Documents");
        fs::create_dir_all(&dest_dir).unwrap();
        fs::write(dest_dir.join("report.pdf"), b"original").unwrap();

        let source = tmp.path().join("report.pdf");
        fs::write(&source, b"incoming").unwrap();

        let outcome =
            MoveExecutor::execute(&planned(source, dest_dir.join("report.pdf"), false));

        assert_eq!(outcome.moved, 1);
        // Original untouched
        assert_eq!(fs::read(dest_dir.join("report.pdf")).unwrap(), b"original");

        // Exactly one extra file, named report_<YYYYMMDD_HHMMSS>.pdf
        let extra: Vec<String> = fs::read_dir(&dest_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n != "report.pdf")
            .collect();
        assert_eq!(extra.len(), 1);
        let name = &extra[0];
        assert!(name.starts_with("report_"));
        assert!(name.ends_with(".pdf"));
        let stamp = &name["report_".len()..name.len() - ".pdf".len()];
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'_');
        assert!(
            stamp
                .chars()
                .enumerate()
                .all(|(i, c)| if i == 8 { c == '_' } else { c.is_ascii_digit() })
        );
    }

    #[test]
    fn test_dry_run_moves_nothing() {
        let tmp = TempDir::new().expect("Failed to create temp directory");
        let source = tmp.path().join("song.mp3");
        fs::write(&source, b"x").unwrap();
        let dest = tmp.path().join("organized").join("Audio").join("song.mp3");

        let outcome = MoveExecutor::execute(&planned(source.clone(), dest.clone(), true));

        assert_eq!(outcome.moved, 1);
        assert!(source.exists());
        assert!(!dest.exists());
        assert!(!tmp.path().join("organized").exists());
    }

    #[test]
    fn test_missing_source_is_an_errored_outcome() {
        let tmp = TempDir::new().expect("Failed to create temp directory");
        let source = tmp.path().join("ghost.txt");
        let dest = tmp.path().join("organized").join("Documents").join("ghost.txt");

        let outcome = MoveExecutor::execute(&planned(source, dest.clone(), false));

        assert_eq!(outcome.errored, 1);
        assert_eq!(outcome.moved, 0);
        assert!(outcome.message.is_some());
        // The failed claim placeholder must not linger.
        assert!(!dest.exists());
    }

    #[test]
    fn test_suffixed_candidate_without_extension() {
        let candidate = suffixed_candidate(Path::new("/dest/Others/README"), 0).unwrap();
        let name = candidate.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("README_"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_suffixed_candidate_counter_variant() {
        let candidate = suffixed_candidate(Path::new("/dest/Docs/a.txt"), 3).unwrap();
        let name = candidate.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("_3.txt"));
    }
}
