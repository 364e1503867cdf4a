//! Persisted index artifacts.
//!
//! An artifact is the JSON form of an index: a format version, an optional fingerprint of
//! the source it was built from, and the ordered list of `(display key, declarations)`
//! groups. Loading re-runs every build check, so a hand-edited or corrupted artifact is
//! rejected instead of producing an index that breaks its own invariants.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    build::build_from_symbols,
    error::ArtifactError,
    index::Index,
    symbol::{Declaration, Symbol},
};

/// Artifact format version written by this crate.
pub const ARTIFACT_VERSION: u32 = 1;

/// Header fields of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    /// Format version.
    pub version: u32,
    /// Fingerprint of the source the index was built from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_fingerprint: Option<String>,
}

/// On-disk layout.
#[derive(Serialize, Deserialize)]
struct ArtifactFile {
    /// Header fields.
    #[serde(flatten)]
    info: ArtifactInfo,
    /// Groups in index order.
    entries: Vec<(String, Vec<Declaration>)>,
}

/// Encodes an index as artifact JSON.
pub fn encode_artifact(
    index: &Index,
    source_fingerprint: Option<&str>,
) -> Result<String, ArtifactError> {
    let file = ArtifactFile {
        info: ArtifactInfo {
            version: ARTIFACT_VERSION,
            source_fingerprint: source_fingerprint.map(str::to_string),
        },
        entries: index
            .entries()
            .map(|entry| {
                (
                    entry.display_key().to_string(),
                    entry.symbols().iter().map(Symbol::to_declaration).collect(),
                )
            })
            .collect(),
    };
    serde_json::to_string(&file).map_err(ArtifactError::Encode)
}

/// Decodes and validates artifact JSON.
pub fn decode_artifact(json: &str) -> Result<(Index, ArtifactInfo), ArtifactError> {
    let file: ArtifactFile = serde_json::from_str(json).map_err(ArtifactError::Decode)?;

    if file.info.version != ARTIFACT_VERSION {
        return Err(ArtifactError::malformed(format!(
            "unsupported artifact version {} (expected {ARTIFACT_VERSION})",
            file.info.version
        )));
    }

    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    for (key, declarations) in &file.entries {
        if !seen.insert(key.as_str()) {
            return Err(ArtifactError::malformed(format!(
                "display key '{key}' appears more than once"
            )));
        }
        if declarations.is_empty() {
            return Err(ArtifactError::malformed(format!(
                "display key '{key}' has no symbols"
            )));
        }
        for decl in declarations {
            let symbol = Symbol::from_declaration(decl)
                .map_err(|e| ArtifactError::malformed(format!("under '{key}': {e}")))?;
            if symbol.display_key() != key {
                return Err(ArtifactError::malformed(format!(
                    "'{}' is filed under '{key}'",
                    symbol.qualified_name()
                )));
            }
            symbols.push(symbol);
        }
    }

    let index =
        build_from_symbols(symbols).map_err(|e| ArtifactError::malformed(e.to_string()))?;

    Ok((index, file.info))
}

/// Writes an artifact, replacing any existing file in one step.
///
/// Creates parent directories if they don't exist.
pub fn save_artifact(
    index: &Index,
    path: &Path,
    source_fingerprint: Option<&str>,
) -> Result<(), ArtifactError> {
    let json = encode_artifact(index, source_fingerprint)?;
    let write_err = |source: io::Error| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)
}

/// Reads and validates an artifact.
pub fn load_artifact(path: &Path) -> Result<(Index, ArtifactInfo), ArtifactError> {
    let json = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_artifact(&json)
}

/// Reads only the header of an artifact.
///
/// Does not validate the entries.
pub fn read_artifact_info(path: &Path) -> Result<ArtifactInfo, ArtifactError> {
    let json = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(ArtifactError::Decode)
}

/// Sibling path the artifact is staged at before the rename.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
