//! Configuration file discovery.
//!
//! Discovers `.apidex.toml` files by walking up the directory tree from a starting point,
//! then appending the global `~/.apidex.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".apidex.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.apidex.toml`) last.
/// Discovery stops early at a file that sets `root = true`; the global file is then skipped.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let mut found_root = false;

    let mut current = Some(cwd);
    while let Some(dir) = current {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            let is_root = is_root_config(&config_path);
            configs.push(config_path);
            if is_root {
                found_root = true;
                break;
            }
        }
        current = dir.parent();
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.apidex.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn finds_config_in_cwd() {
        let dir = TestDir::new();
        let config = dir.create_config("project", "");

        let found = discover_config_files(&dir.path().join("project"));
        assert_eq!(found.first(), Some(&config));
    }

    #[test]
    fn orders_closest_first() {
        let dir = TestDir::new();
        let outer = dir.create_config("project", "");
        let inner = dir.create_config("project/docs", "");

        let found = discover_config_files(&dir.path().join("project/docs"));
        let inner_pos = found.iter().position(|p| p == &inner).unwrap();
        let outer_pos = found.iter().position(|p| p == &outer).unwrap();
        assert!(inner_pos < outer_pos);
    }

    #[test]
    fn root_config_stops_traversal() {
        let dir = TestDir::new();
        let outer = dir.create_config("project", "");
        let inner = dir.create_config("project/docs", "root = true\n");

        let found = discover_config_files(&dir.path().join("project/docs"));
        assert_eq!(found, vec![inner]);
        assert!(!found.contains(&outer));
    }

    #[test]
    fn skips_directories_without_config() {
        let dir = TestDir::new();
        let config = dir.create_config("project", "");
        dir.create_dir("project/a/b");

        let found = discover_config_files(&dir.path().join("project/a/b"));
        assert_eq!(found.first(), Some(&config));
    }
}
