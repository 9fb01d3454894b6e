//! Configuration file lookup.

use std::path::{Path, PathBuf};

use tracing::debug;

use rcpt_core::RcptConfig;

/// `<config dir>/rcpt/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rcpt")
        .join("config.json")
}

/// Load the config from `explicit`, else the default location, else defaults.
///
/// An explicitly named file must exist; the default location is optional.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<RcptConfig> {
    if let Some(path) = explicit {
        debug!("Loading config from {}", path.display());
        return Ok(RcptConfig::from_file(path)?);
    }

    let path = default_config_path();
    if path.is_file() {
        debug!("Loading config from {}", path.display());
        Ok(RcptConfig::from_file(&path)?)
    } else {
        debug!("No config at {}, using defaults", path.display());
        Ok(RcptConfig::default())
    }
}
