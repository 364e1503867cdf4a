//! Include/exclude pattern matching for source files.
//!
//! Patterns are matched against file names relative to the source directory.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{ConfigError, Source};

/// Compiled include/exclude patterns for a declaration source.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    /// Files must match at least one of these.
    include: GlobSet,
    /// Files matching any of these are skipped.
    exclude: GlobSet,
}

impl CompiledPatterns {
    /// Compiles the patterns of a source definition.
    pub fn compile(source: &Source) -> Result<Self, ConfigError> {
        Ok(Self {
            include: build_globset(&source.include)?,
            exclude: build_globset(&source.exclude)?,
        })
    }

    /// Returns true if the relative path should be read.
    pub fn matches(&self, rel_path: &Path) -> bool {
        self.include.is_match(rel_path) && !self.exclude.is_match(rel_path)
    }
}

/// Builds a glob set from a list of patterns.
fn build_globset(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ConfigError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}
