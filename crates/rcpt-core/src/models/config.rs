//! Configuration structures for the renaming pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RcptError, Result};

/// Main configuration for rcpt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Which files are picked up.
    pub scan: ScanConfig,

    /// How collisions with existing files are resolved.
    pub rename: RenameConfig,
}

/// File discovery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extension to process, without the leading dot.
    pub extension: String,

    /// Descend into subdirectories.
    pub recursive: bool,

    /// Match the extension case-sensitively.
    pub case_sensitive: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "pdf".to_string(),
            recursive: false,
            case_sensitive: true,
        }
    }
}

/// Rename/dedup configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// How "same content" is decided when the target name is taken.
    pub comparison: ContentComparison,
}

/// Equality check used when a target file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentComparison {
    /// Equal sizes count as identical content.
    #[default]
    Size,
    /// Equal sizes and equal SHA-256 digests.
    Sha256,
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| RcptError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| RcptError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
