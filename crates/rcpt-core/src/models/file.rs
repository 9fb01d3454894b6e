//! File metadata used for year inference and duplicate detection.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDate};

/// A file on disk with the metadata the renamer relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path to the file.
    pub path: PathBuf,
    /// Last modification time.
    pub modified: SystemTime,
    /// Size in bytes.
    pub size: u64,
}

impl FileEntry {
    /// Stat a file.
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let metadata = fs::metadata(&path)?;
        Ok(Self {
            modified: metadata.modified()?,
            size: metadata.len(),
            path,
        })
    }

    /// Modification time as a local calendar date.
    pub fn modified_date(&self) -> NaiveDate {
        DateTime::<Local>::from(self.modified).date_naive()
    }

    /// File name as text, or the full path when it has none.
    pub fn name(&self) -> String {
        display_name(&self.path)
    }
}

/// Last path component for display purposes.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
