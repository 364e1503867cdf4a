//! Artifact location resolution.
//!
//! The artifact lives at `[index] path` when configured, otherwise at `.apidex/index.json`
//! next to the most specific `.apidex.toml`.

use std::path::PathBuf;

use apidex_config::{CONFIG_FILENAME, Config};

/// Directory for apidex data, sibling to `.apidex.toml`.
const DATA_DIR: &str = ".apidex";
/// Artifact file name within the data directory.
const ARTIFACT_FILE: &str = "index.json";

/// Computes the artifact path for a configuration.
///
/// Returns `None` when no config file was found and no explicit path is set.
pub fn artifact_path(config: &Config) -> Option<PathBuf> {
    if let Some(path) = &config.index.path {
        return Some(path.clone());
    }

    config.config_root.as_ref().map(|config_root| {
        let root_dir = match config_root.file_name() {
            Some(name) if name == CONFIG_FILENAME => {
                config_root.parent().unwrap_or(config_root.as_path())
            }
            _ => config_root.as_path(),
        };
        root_dir.join(DATA_DIR).join(ARTIFACT_FILE)
    })
}
