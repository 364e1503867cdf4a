//! Configuration file parsing.
//!
//! Parses individual `.apidex.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Declaration source section.
    pub source: Option<RawSource>,
    /// Artifact location section.
    pub index: Option<RawIndexSettings>,
    /// Query engine section.
    pub search: Option<RawSearchSettings>,
    /// Result presenter section.
    pub presenter: Option<RawPresenterSettings>,
}

/// Raw `[source]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSource {
    /// Doxygen search directory or declarations JSON file.
    pub path: Option<String>,
    /// File name globs selecting search data files.
    pub include: Option<Vec<String>>,
    /// File name globs excluding search data files.
    pub exclude: Option<Vec<String>>,
    /// Drop malformed records instead of aborting the build.
    pub skip_malformed: Option<bool>,
}

/// Raw `[index]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawIndexSettings {
    /// Artifact path.
    pub path: Option<String>,
}

/// Raw `[search]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSearchSettings {
    /// Maximum results per query.
    pub limit: Option<usize>,
    /// Symbol kinds to include. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub kinds: Option<Vec<String>>,
}

/// Raw `[presenter]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawPresenterSettings {
    /// Debounce interval in milliseconds.
    pub debounce_ms: Option<u64>,
    /// Prefix for rendered links.
    pub base_url: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    let config: RawConfig = toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;

    if config.search.as_ref().and_then(|s| s.limit) == Some(0) {
        return Err(ConfigError::ZeroLimit {
            path: path.to_path_buf(),
        });
    }

    Ok(config)
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.source.is_none());
        assert!(config.search.is_none());
        assert!(config.presenter.is_none());
    }

    #[test]
    fn parses_source_section() {
        let toml = r#"
[source]
path = "./html/search"
include = ["functions_*.js"]
skip_malformed = true
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let source = config.source.unwrap();
        assert_eq!(source.path.as_deref(), Some("./html/search"));
        assert_eq!(source.include, Some(vec!["functions_*.js".to_string()]));
        assert!(source.exclude.is_none());
        assert_eq!(source.skip_malformed, Some(true));
    }

    #[test]
    fn kinds_accepts_single_string() {
        let toml = r#"
[search]
kinds = "function"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(
            config.search.unwrap().kinds,
            Some(vec!["function".to_string()])
        );
    }

    #[test]
    fn kinds_accepts_array() {
        let toml = r#"
[search]
limit = 12
kinds = ["type", "member"]
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let search = config.search.unwrap();
        assert_eq!(search.limit, Some(12));
        assert_eq!(
            search.kinds,
            Some(vec!["type".to_string(), "member".to_string()])
        );
    }

    #[test]
    fn rejects_zero_limit() {
        let toml = "[search]\nlimit = 0\n";
        let err = parse_config_str(toml, Path::new("test.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroLimit { .. }));
    }

    #[test]
    fn rejects_unknown_fields() {
        let toml = "[search]\nstemmer = \"english\"\n";
        let err = parse_config_str(toml, Path::new("test.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn detects_root_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".apidex.toml");
        fs::write(&path, "root = true\n").unwrap();
        assert!(is_root_config(&path));

        fs::write(&path, "root = false\n").unwrap();
        assert!(!is_root_config(&path));
    }
}
