//! Reading declarations from a configured source.
//!
//! A source is either a Doxygen `search/` directory or a JSON file holding an array of
//! declaration records. Both produce a fingerprint that is stored in the artifact to detect
//! staleness.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use apidex_config::Source;
use apidex_doxygen::{Fingerprint, ImportError, import_source};
use apidex_index::Declaration;
use thiserror::Error;
use tracing::debug;

/// Errors reading a declaration source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source path does not exist.
    #[error("source path does not exist: {path}")]
    Missing {
        /// Configured path.
        path: PathBuf,
    },

    /// Failed to read a declarations file.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A declarations file is not a JSON array of declarations.
    #[error("invalid declarations in {path}: {source}")]
    Json {
        /// File path.
        path: PathBuf,
        /// Decoder error.
        source: serde_json::Error,
    },

    /// A Doxygen search directory could not be imported.
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Declarations read from a source, with the fingerprint of what was read.
#[derive(Debug, Clone)]
pub struct SourceData {
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
    /// Fingerprint of the source content.
    pub fingerprint: String,
    /// Files that contributed declarations.
    pub files_read: usize,
}

/// Reads every declaration from a source.
pub fn read_source(source: &Source) -> Result<SourceData, SourceError> {
    if source.path.is_dir() {
        let import = import_source(source)?;
        debug!(
            path = %source.path.display(),
            files = import.files_read,
            skipped = import.files_skipped,
            "imported search directory"
        );
        return Ok(SourceData {
            declarations: import.declarations,
            fingerprint: import.fingerprint,
            files_read: import.files_read,
        });
    }
    if !source.path.exists() {
        return Err(SourceError::Missing {
            path: source.path.clone(),
        });
    }
    read_declarations_file(&source.path)
}

/// Reads a JSON array of declarations.
fn read_declarations_file(path: &Path) -> Result<SourceData, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let declarations: Vec<Declaration> =
        serde_json::from_slice(&bytes).map_err(|source| SourceError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut fingerprint = Fingerprint::new();
    fingerprint.add(&name, &bytes);

    Ok(SourceData {
        declarations,
        fingerprint: fingerprint.finish(),
        files_read: 1,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn source(path: PathBuf) -> Source {
        Source {
            path,
            include: vec!["*.js".into()],
            exclude: Vec::new(),
            skip_malformed: false,
        }
    }

    #[test]
    fn reads_declarations_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("decls.json");
        fs::write(
            &path,
            r#"[{"qualified_name": "ns::f", "kind": "function", "signature": "(int)",
                 "page_id": "ns.html", "anchor": "a1"},
                {"qualified_name": "ns::T", "kind": "type", "page_id": "t.html", "anchor": "top"}]"#,
        )
        .unwrap();

        let data = read_source(&source(path.clone())).unwrap();
        assert_eq!(data.declarations.len(), 2);
        assert_eq!(data.declarations[1].signature, "");
        assert_eq!(data.fingerprint.len(), 16);

        let again = read_source(&source(path.clone())).unwrap();
        assert_eq!(again.fingerprint, data.fingerprint);

        fs::write(&path, "[]").unwrap();
        assert_ne!(read_source(&source(path)).unwrap().fingerprint, data.fingerprint);
    }

    #[test]
    fn reads_search_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("functions_0.js"),
            "var searchData=[['f_0',['f',['../ns.html#a1',1,'ns']]]];",
        )
        .unwrap();
        let data = read_source(&source(dir.path().to_path_buf())).unwrap();
        assert_eq!(data.declarations[0].qualified_name, "ns::f");
        assert_eq!(data.files_read, 1);
    }

    #[test]
    fn reports_missing_and_invalid_sources() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            read_source(&source(missing)),
            Err(SourceError::Missing { .. })
        ));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{\"not\": \"an array\"}").unwrap();
        assert!(matches!(
            read_source(&source(bad)),
            Err(SourceError::Json { .. })
        ));
    }
}
