//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, fs, path::Path};

use crate::{CompiledPatterns, Config, Source};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No `[source]` path is configured.
    NoSourceDefined,
    /// The source path does not exist.
    SourcePathMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The source is a directory, but no file in it matches the include patterns.
    SourceMatchesNothing {
        /// Directory that was scanned.
        path: String,
    },
    /// The include/exclude patterns do not compile.
    InvalidPatterns {
        /// Compiler error message.
        message: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSourceDefined => write!(f, "no [source] path is configured"),
            Self::SourcePathMissing { path } => write!(f, "source path does not exist: {path}"),
            Self::SourceMatchesNothing { path } => {
                write!(f, "no files in {path} match the include patterns")
            }
            Self::InvalidPatterns { message } => write!(f, "{message}"),
        }
    }
}

/// Validates a configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let Some(ref source) = config.source else {
        return vec![ConfigWarning::NoSourceDefined];
    };

    if !source.path.exists() {
        return vec![ConfigWarning::SourcePathMissing {
            path: source.path.display().to_string(),
        }];
    }

    if source.path.is_dir() {
        return validate_source_dir(source);
    }

    Vec::new()
}

/// Checks that at least one file in the source directory is selected.
fn validate_source_dir(source: &Source) -> Vec<ConfigWarning> {
    let patterns = match CompiledPatterns::compile(source) {
        Ok(p) => p,
        Err(e) => {
            return vec![ConfigWarning::InvalidPatterns {
                message: e.to_string(),
            }];
        }
    };

    let any_match = fs::read_dir(&source.path)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .any(|entry| patterns.matches(Path::new(&entry.file_name())))
        })
        .unwrap_or(false);

    if any_match {
        Vec::new()
    } else {
        vec![ConfigWarning::SourceMatchesNothing {
            path: source.path.display().to_string(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    fn config_with_source(path: &Path) -> Config {
        Config {
            source: Some(Source {
                path: path.to_path_buf(),
                include: vec!["*.js".into()],
                exclude: vec![],
                skip_malformed: false,
            }),
            ..Config::default()
        }
    }

    #[test]
    fn warns_without_source() {
        let warnings = validate_config(&Config::default());
        assert_eq!(warnings, vec![ConfigWarning::NoSourceDefined]);
    }

    #[test]
    fn warns_on_missing_path() {
        let dir = TestDir::new();
        let warnings = validate_config(&config_with_source(&dir.path().join("nope")));
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::SourcePathMissing { .. }]
        ));
    }

    #[test]
    fn warns_when_nothing_matches() {
        let dir = TestDir::new();
        let search = dir.create_dir("search");
        fs::write(search.join("search.css"), "").unwrap();

        let warnings = validate_config(&config_with_source(&search));
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::SourceMatchesNothing { .. }]
        ));
    }

    #[test]
    fn clean_source_has_no_warnings() {
        let dir = TestDir::new();
        let search = dir.create_dir("search");
        fs::write(search.join("functions_0.js"), "var searchData=[];").unwrap();

        assert!(validate_config(&config_with_source(&search)).is_empty());
    }
}
