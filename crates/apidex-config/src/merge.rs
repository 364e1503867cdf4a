//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, IndexSettings, PresenterSettings, SearchSettings, Source,
    parse::{RawConfig, RawPresenterSettings, RawSearchSettings},
    resolve::resolve_path,
};

/// Default include patterns when none are specified.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["*.js"];

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file, used to resolve relative paths.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins
/// - Paths: resolved relative to the file that defined them
/// - Source patterns: first defined list wins, no concatenation
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let search = merge_search_settings(configs);
    let presenter = merge_presenter_settings(configs);
    let source = merge_source(configs)?;
    let index = merge_index_settings(configs)?;
    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        source,
        index,
        search,
        presenter,
        config_root,
    })
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.limit {
        result.limit = v;
    }
    if let Some(ref v) = raw.kinds {
        result.kinds = v.clone();
    }
}

/// Merges presenter settings.
fn merge_presenter_settings(configs: &[ParsedConfig]) -> PresenterSettings {
    let mut result = PresenterSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref presenter) = parsed.config.presenter {
            apply_raw_presenter(&mut result, presenter);
        }
    }

    result
}

/// Applies raw presenter settings to result.
fn apply_raw_presenter(result: &mut PresenterSettings, raw: &RawPresenterSettings) {
    if let Some(v) = raw.debounce_ms {
        result.debounce_ms = v;
    }
    if let Some(ref v) = raw.base_url {
        result.base_url = Some(v.clone());
    }
}

/// Merges the `[source]` sections field by field.
///
/// Returns `None` when no config names a source path.
fn merge_source(configs: &[ParsedConfig]) -> Result<Option<Source>, ConfigError> {
    let mut path = None;
    let mut include = None;
    let mut exclude = None;
    let mut skip_malformed = None;

    for parsed in configs {
        let Some(ref raw) = parsed.config.source else {
            continue;
        };
        if path.is_none()
            && let Some(ref p) = raw.path
        {
            path = Some(resolve_path(p, parsed.dir())?);
        }
        if include.is_none() {
            include.clone_from(&raw.include);
        }
        if exclude.is_none() {
            exclude.clone_from(&raw.exclude);
        }
        if skip_malformed.is_none() {
            skip_malformed = raw.skip_malformed;
        }
    }

    let Some(path) = path else {
        return Ok(None);
    };

    Ok(Some(Source {
        path,
        include: include.unwrap_or_else(|| {
            DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect()
        }),
        exclude: exclude.unwrap_or_default(),
        skip_malformed: skip_malformed.unwrap_or(false),
    }))
}

/// Merges the `[index]` section, resolving the artifact path.
fn merge_index_settings(configs: &[ParsedConfig]) -> Result<IndexSettings, ConfigError> {
    for parsed in configs {
        if let Some(ref raw) = parsed.config.index
            && let Some(ref p) = raw.path
        {
            return Ok(IndexSettings {
                path: Some(resolve_path(p, parsed.dir())?),
            });
        }
    }
    Ok(IndexSettings::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::parse_config_str, test_support::TestDir};

    fn parsed(path: PathBuf, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path,
            config: parse_config_str(toml, Path::new("test")).unwrap(),
        }
    }

    #[test]
    fn empty_configs_yield_defaults() {
        let result = merge_configs(&[]).unwrap();
        assert_eq!(result.search.limit, 40);
        assert!(result.source.is_none());
        assert!(result.config_root.is_none());
    }

    #[test]
    fn source_path_resolves_against_its_file() {
        let dir = TestDir::new();
        let config = parsed(
            dir.path().join("project/.apidex.toml"),
            r#"
[source]
path = "html/search"
"#,
        );

        let result = merge_configs(&[config]).unwrap();
        let source = result.source.unwrap();
        assert_eq!(source.path, dir.path().join("project/html/search"));
        assert_eq!(source.include, vec!["*.js"]);
        assert!(source.exclude.is_empty());
        assert!(!source.skip_malformed);
        assert_eq!(result.config_root, Some(dir.path().join("project")));
    }

    #[test]
    fn higher_precedence_scalars_win() {
        let dir = TestDir::new();
        let high = parsed(
            dir.path().join("project/.apidex.toml"),
            "[search]\nlimit = 10\n",
        );
        let low = parsed(
            dir.path().join(".apidex.toml"),
            "[search]\nlimit = 99\nkinds = [\"type\"]\n\n[presenter]\ndebounce_ms = 50\n",
        );

        let result = merge_configs(&[high, low]).unwrap();
        assert_eq!(result.search.limit, 10);
        assert_eq!(result.search.kinds, vec!["type"]);
        assert_eq!(result.presenter.debounce_ms, 50);
    }

    #[test]
    fn source_fields_merge_individually() {
        let dir = TestDir::new();
        let high = parsed(
            dir.path().join("project/.apidex.toml"),
            "[source]\nexclude = [\"all_*.js\"]\n",
        );
        let low = parsed(
            dir.path().join(".apidex.toml"),
            "[source]\npath = \"search\"\nskip_malformed = true\n",
        );

        let result = merge_configs(&[high, low]).unwrap();
        let source = result.source.unwrap();
        assert_eq!(source.path, dir.path().join("search"));
        assert_eq!(source.exclude, vec!["all_*.js"]);
        assert!(source.skip_malformed);
    }

    #[test]
    fn index_path_resolves_against_its_file() {
        let dir = TestDir::new();
        let config = parsed(
            dir.path().join("project/.apidex.toml"),
            "[index]\npath = \"out/index.json\"\n",
        );

        let result = merge_configs(&[config]).unwrap();
        assert_eq!(
            result.index.path,
            Some(dir.path().join("project/out/index.json"))
        );
    }
}
