//! Configuration system for apidex.
//!
//! apidex uses TOML configuration files named `.apidex.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.apidex.toml` files found, then loading `~/.apidex.toml` as the global config with
//! lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod patterns;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{DEFAULT_INCLUDE_PATTERNS, ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawIndexSettings, RawPresenterSettings, RawSearchSettings, RawSource,
    parse_config_file, parse_config_str,
};
pub use patterns::CompiledPatterns;
pub use resolve::resolve_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for apidex.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where declarations come from. `None` when no config names a source.
    pub source: Option<Source>,
    /// Artifact location.
    pub index: IndexSettings,
    /// Query engine settings.
    pub search: SearchSettings,
    /// Result presenter settings.
    pub presenter: PresenterSettings,
    /// Directory containing the most specific config file (determines artifact location).
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.apidex.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// Paths are omitted since they are resolved per file.
    pub fn settings_to_toml(&self) -> Result<String, toml::ser::Error> {
        let serializable = SerializableSettings {
            search: self.search.clone(),
            presenter: self.presenter.clone(),
        };
        toml::to_string_pretty(&serializable)
    }
}

/// A resolved declaration source.
#[derive(Debug, Clone)]
pub struct Source {
    /// Absolute path to a Doxygen search directory or a declarations JSON file.
    pub path: PathBuf,
    /// File name globs selecting search data files.
    pub include: Vec<String>,
    /// File name globs excluding search data files.
    pub exclude: Vec<String>,
    /// Drop malformed records instead of aborting the build.
    pub skip_malformed: bool,
}

impl Source {
    /// Compiles the include/exclude patterns for this source.
    pub fn compile_patterns(&self) -> Result<CompiledPatterns, ConfigError> {
        CompiledPatterns::compile(self)
    }
}

/// Artifact location settings.
#[derive(Debug, Clone, Default)]
pub struct IndexSettings {
    /// Explicit artifact path; defaults to `.apidex/index.json` under the config root.
    pub path: Option<PathBuf>,
}

/// Query engine settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum results per query.
    pub limit: usize,
    /// Symbol kinds to include; empty means all kinds.
    pub kinds: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: 40,
            kinds: Vec::new(),
        }
    }
}

/// Result presenter settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PresenterSettings {
    /// Minimum interval between searches while typing, in milliseconds.
    pub debounce_ms: u64,
    /// Prefix prepended to rendered links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for PresenterSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            base_url: None,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Query engine settings.
    search: SearchSettings,
    /// Result presenter settings.
    presenter: PresenterSettings,
}
