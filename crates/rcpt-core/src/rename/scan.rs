//! Discovery of files eligible for renaming.

use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use tracing::{debug, warn};

use crate::error::{RcptError, Result};
use crate::models::ScanConfig;
use crate::receipt::rules::patterns::DATE_PREFIX;

/// Whether a file name already starts with an ISO date.
pub fn is_canonical_name(name: &str) -> bool {
    DATE_PREFIX.is_match(name)
}

/// List files with the configured extension under `dir`, sorted by path.
///
/// Files whose names already carry a date prefix are left out so that
/// repeated runs do not reprocess them.
pub fn scan_eligible(dir: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>> {
    let base = dir.to_str().ok_or_else(|| {
        RcptError::Pattern(format!("directory is not valid UTF-8: {}", dir.display()))
    })?;

    let pattern = format!(
        "{}/{}*.{}",
        Pattern::escape(base.trim_end_matches('/')),
        if config.recursive { "**/" } else { "" },
        Pattern::escape(&config.extension)
    );
    debug!("Scanning {}", pattern);

    let options = MatchOptions {
        case_sensitive: config.case_sensitive,
        ..MatchOptions::new()
    };

    let paths = glob_with(&pattern, options).map_err(|e| RcptError::Pattern(e.to_string()))?;

    let mut files = Vec::new();
    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };

        if !path.is_file() {
            continue;
        }

        let canonical = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_canonical_name);
        if canonical {
            debug!("Already canonical: {}", path.display());
            continue;
        }

        files.push(path);
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    fn names(paths: &[PathBuf], root: &Path) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_canonical_name_detection() {
        assert!(is_canonical_name("2024-07-04 Anthropic $42.00.pdf"));
        assert!(!is_canonical_name("invoice-2024-07-04.pdf"));
        assert!(!is_canonical_name("20240704.pdf"));
    }

    #[test]
    fn test_flat_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.pdf"));
        touch(&dir.path().join("a.pdf"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("2024-01-01 OpenAI $1.00.pdf"));
        touch(&dir.path().join("sub/c.pdf"));

        let files = scan_eligible(dir.path(), &ScanConfig::default()).unwrap();
        assert_eq!(names(&files, dir.path()), vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_recursive_scan() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.pdf"));
        touch(&dir.path().join("sub/c.pdf"));
        touch(&dir.path().join("sub/2024-01-01 OpenAI $1.00.pdf"));

        let config = ScanConfig {
            recursive: true,
            ..ScanConfig::default()
        };
        let files = scan_eligible(dir.path(), &config).unwrap();
        assert_eq!(
            names(&files, dir.path()),
            vec!["a.pdf".to_string(), Path::new("sub").join("c.pdf").to_string_lossy().into_owned()]
        );
    }

    #[test]
    fn test_case_insensitive_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.PDF"));
        touch(&dir.path().join("b.pdf"));

        let files = scan_eligible(dir.path(), &ScanConfig::default()).unwrap();
        assert_eq!(names(&files, dir.path()), vec!["b.pdf"]);

        let config = ScanConfig {
            case_sensitive: false,
            ..ScanConfig::default()
        };
        let files = scan_eligible(dir.path(), &config).unwrap();
        assert_eq!(names(&files, dir.path()), vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_directory_with_glob_characters() {
        let dir = tempfile::tempdir().unwrap();
        let odd = dir.path().join("[receipts]");
        touch(&odd.join("a.pdf"));

        let files = scan_eligible(&odd, &ScanConfig::default()).unwrap();
        assert_eq!(files, vec![odd.join("a.pdf")]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_eligible(dir.path(), &ScanConfig::default())
            .unwrap()
            .is_empty());
    }
}
