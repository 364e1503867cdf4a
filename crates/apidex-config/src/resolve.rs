//! Path resolution for configured paths.
//!
//! Resolves relative and tilde-prefixed paths to absolute paths. Paths are not required
//! to exist: a source that has not been generated yet is reported by validation instead.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured path to an absolute path.
///
/// - Tilde paths (`~/docs`) are expanded to the home directory
/// - Relative paths (`./docs`, `../shared`) are resolved relative to `config_dir`
/// - Absolute paths are returned as-is
pub fn resolve_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(config_dir.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
