//! Rename-or-dedup decisions and their execution.

use std::fs::{self, File};
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::models::{ContentComparison, FileEntry};

/// Whether decisions are carried out or only reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Rename and delete files.
    #[default]
    Apply,
    /// Report what would happen without touching the filesystem.
    DryRun,
}

/// What should happen to a source file given its canonical target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameDecision {
    /// The file already has its canonical name.
    Unchanged,
    /// Nothing occupies the target name.
    Rename { target: PathBuf },
    /// The target holds the same content; the source is redundant.
    DeleteDuplicate { target: PathBuf },
    /// The target holds different content; leave both alone.
    SkipConflict { target: PathBuf },
}

/// Result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { target: PathBuf },
    DeletedDuplicate { target: PathBuf },
    Unchanged,
    SkippedConflict { target: PathBuf },
    SkippedError(String),
}

impl RenameDecision {
    /// The outcome reported when the decision is not executed.
    pub fn into_outcome(self) -> RenameOutcome {
        match self {
            Self::Unchanged => RenameOutcome::Unchanged,
            Self::Rename { target } => RenameOutcome::Renamed { target },
            Self::DeleteDuplicate { target } => RenameOutcome::DeletedDuplicate { target },
            Self::SkipConflict { target } => RenameOutcome::SkippedConflict { target },
        }
    }
}

/// Decides and performs dedup-safe renames.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenameExecutor {
    mode: RunMode,
    comparison: ContentComparison,
}

impl RenameExecutor {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            comparison: ContentComparison::default(),
        }
    }

    /// Set how existing targets are compared with the source.
    pub fn with_comparison(mut self, comparison: ContentComparison) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Decide what to do with `source` given its canonical `target` path.
    pub fn plan(&self, source: &FileEntry, target: &Path) -> io::Result<RenameDecision> {
        if target == source.path {
            return Ok(RenameDecision::Unchanged);
        }

        if !target.try_exists()? {
            return Ok(RenameDecision::Rename {
                target: target.to_path_buf(),
            });
        }

        self.compare_existing(&source.path, target)
    }

    /// Plan and, unless in dry-run mode, carry out the decision.
    pub fn execute(&self, source: &FileEntry, target: &Path) -> io::Result<RenameOutcome> {
        let planned = self.plan(source, target)?;
        self.apply(source, planned)
    }

    /// Carry out a planned decision.
    ///
    /// The target is inspected again right before any mutation, so a file
    /// that appeared or changed since planning is never overwritten.
    pub fn apply(&self, source: &FileEntry, planned: RenameDecision) -> io::Result<RenameOutcome> {
        if self.mode == RunMode::DryRun {
            return Ok(planned.into_outcome());
        }

        match planned {
            RenameDecision::Unchanged => Ok(RenameOutcome::Unchanged),
            RenameDecision::Rename { target } => self.rename(&source.path, target),
            RenameDecision::DeleteDuplicate { target } => {
                match self.compare_existing(&source.path, &target) {
                    Ok(RenameDecision::DeleteDuplicate { target }) => {
                        self.delete_duplicate(&source.path, target)
                    }
                    Ok(other) => {
                        warn!(
                            "{} changed since planning; not deleting {}",
                            target.display(),
                            source.path.display()
                        );
                        Ok(other.into_outcome())
                    }
                    // The target vanished: the source is no longer a duplicate
                    Err(e) if e.kind() == ErrorKind::NotFound => self.rename(&source.path, target),
                    Err(e) => Err(e),
                }
            }
            RenameDecision::SkipConflict { target } => {
                Ok(RenameOutcome::SkippedConflict { target })
            }
        }
    }

    fn rename(&self, source: &Path, target: PathBuf) -> io::Result<RenameOutcome> {
        match move_no_clobber(source, &target)? {
            MoveResult::Moved => {
                info!("Renamed {} -> {}", source.display(), target.display());
                Ok(RenameOutcome::Renamed { target })
            }
            MoveResult::TargetExists => {
                warn!("{} appeared during the run; comparing instead", target.display());
                match self.compare_existing(source, &target)? {
                    RenameDecision::DeleteDuplicate { target } => {
                        self.delete_duplicate(source, target)
                    }
                    other => Ok(other.into_outcome()),
                }
            }
        }
    }

    fn delete_duplicate(&self, source: &Path, target: PathBuf) -> io::Result<RenameOutcome> {
        fs::remove_file(source)?;
        info!(
            "Deleted {} (duplicate of {})",
            source.display(),
            target.display()
        );
        Ok(RenameOutcome::DeletedDuplicate { target })
    }

    fn compare_existing(&self, source: &Path, target: &Path) -> io::Result<RenameDecision> {
        let target_buf = target.to_path_buf();
        if same_content(source, target, self.comparison)? {
            Ok(RenameDecision::DeleteDuplicate { target: target_buf })
        } else {
            Ok(RenameDecision::SkipConflict { target: target_buf })
        }
    }
}

enum MoveResult {
    Moved,
    TargetExists,
}

/// Move `from` to `to` without ever replacing an existing `to`.
///
/// A hard link claims the new name atomically; filesystems without hard
/// links fall back to an existence check followed by a rename.
fn move_no_clobber(from: &Path, to: &Path) -> io::Result<MoveResult> {
    match fs::hard_link(from, to) {
        Ok(()) => match fs::remove_file(from) {
            Ok(()) => Ok(MoveResult::Moved),
            Err(e) => {
                warn!(
                    "Linked {} to {} but could not remove the source; both names now exist",
                    from.display(),
                    to.display()
                );
                Err(half_moved(from, to, e))
            }
        },
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(MoveResult::TargetExists),
        Err(e) => {
            debug!("Hard link unavailable ({}), falling back to rename", e);
            if to.try_exists()? {
                return Ok(MoveResult::TargetExists);
            }
            fs::rename(from, to)?;
            Ok(MoveResult::Moved)
        }
    }
}

/// Error for a move that created `to` but left `from` behind.
fn half_moved(from: &Path, to: &Path, source: io::Error) -> io::Error {
    io::Error::new(
        source.kind(),
        format!(
            "{} was linked to {} but not removed: {}",
            from.display(),
            to.display(),
            source
        ),
    )
}

/// Whether two files count as the same content.
pub fn same_content(left: &Path, right: &Path, comparison: ContentComparison) -> io::Result<bool> {
    let left_size = fs::metadata(left)?.len();
    let right_size = fs::metadata(right)?.len();
    if left_size != right_size {
        return Ok(false);
    }

    match comparison {
        ContentComparison::Size => Ok(true),
        ContentComparison::Sha256 => Ok(sha256_file(left)? == sha256_file(right)?),
    }
}

fn sha256_file(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_vec())
}
