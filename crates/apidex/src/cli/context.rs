//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use apidex_config::{Config, Source};
use apidex_index::{
    ArtifactStatus, BuildPolicy, Index, artifact_path, build_with_stats, detect_artifact_status,
    load_artifact, save_artifact,
};
use apidex_present::IndexHandle;
use tracing::debug;

use crate::cli::source::{SourceData, read_source};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Index opened for this invocation.
    handle: Option<IndexHandle>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            handle: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            handle: None,
        })
    }

    /// Returns the configured source, or prints an error.
    pub fn require_source(&self, show_init_hint: bool) -> Result<&Source, ExitCode> {
        match &self.config.source {
            Some(source) => Ok(source),
            None => {
                eprintln!("error: no [source] path defined in configuration");
                if show_init_hint {
                    eprintln!(
                        "Run 'apidex init' to create a configuration file, then set [source] path."
                    );
                }
                Err(ExitCode::FAILURE)
            }
        }
    }

    /// Returns the index, rebuilding the artifact first if it is missing or stale.
    ///
    /// A malformed artifact yields [`IndexHandle::Unavailable`] rather than an error.
    pub fn index(&mut self) -> Result<IndexHandle, ExitCode> {
        if let Some(handle) = &self.handle {
            return Ok(handle.clone());
        }

        let source = self.require_source(true)?;
        let path = self.artifact_path()?;
        let handle = ensure_index_fresh(source, &path)?;
        self.handle = Some(handle.clone());
        Ok(handle)
    }

    /// Returns where the artifact lives, or prints an error.
    pub fn artifact_path(&self) -> Result<PathBuf, ExitCode> {
        artifact_path(&self.config).ok_or_else(|| {
            eprintln!("error: could not determine index location; set [index] path");
            ExitCode::FAILURE
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

/// Reads a source or exits with an error.
pub fn read_source_or_failure(source: &Source) -> Result<SourceData, ExitCode> {
    read_source(source).map_err(|e| {
        eprintln!("error: failed to read source: {e}");
        ExitCode::FAILURE
    })
}

/// Ensures the artifact reflects the source, rebuilding it if needed, then opens it.
fn ensure_index_fresh(source: &Source, path: &Path) -> Result<IndexHandle, ExitCode> {
    let data = read_source_or_failure(source)?;

    let status = detect_artifact_status(path, Some(&data.fingerprint));
    debug!(path = %path.display(), status = status.description(), "artifact status");
    match status {
        ArtifactStatus::Current => Ok(IndexHandle::from_load(load_artifact(path))),
        ArtifactStatus::Malformed(_) => {
            eprintln!(
                "warning: index at {} is unreadable; run 'apidex build' to replace it",
                path.display()
            );
            Ok(IndexHandle::Unavailable)
        }
        ArtifactStatus::Missing | ArtifactStatus::Stale => {
            eprintln!("Index needs rebuild, updating...");
            let index = build_index(&data, source_policy(source))?;
            save_artifact_or_warn(&index, path, &data.fingerprint);
            Ok(IndexHandle::ready(index))
        }
    }
}

/// The malformed-record policy a source asks for.
pub fn source_policy(source: &Source) -> BuildPolicy {
    if source.skip_malformed {
        BuildPolicy::SkipMalformed
    } else {
        BuildPolicy::Abort
    }
}

/// Builds an index from source data, exiting with an error on failure.
fn build_index(data: &SourceData, policy: BuildPolicy) -> Result<Index, ExitCode> {
    match build_with_stats(&data.declarations, policy) {
        Ok((index, _)) => Ok(index),
        Err(e) => {
            eprintln!("error: indexing failed: {e}");
            Err(ExitCode::FAILURE)
        }
    }
}

/// Persists an index; a failed write leaves the in-memory index usable.
fn save_artifact_or_warn(index: &Index, path: &Path, fingerprint: &str) {
    if let Err(e) = save_artifact(index, path, Some(fingerprint)) {
        eprintln!("warning: {e}");
    }
}
