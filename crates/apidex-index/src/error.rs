//! Error types for the apidex-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::symbol::Location;

/// A raw declaration record that cannot become a symbol.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// The qualified name is empty.
    #[error("declaration has an empty qualified name")]
    EmptyName,

    /// One of the `::`-separated segments is empty.
    #[error("qualified name '{qualified_name}' has an empty segment")]
    EmptySegment {
        /// The offending qualified name.
        qualified_name: String,
    },

    /// The anchor is empty.
    #[error("declaration '{qualified_name}' has an empty anchor")]
    EmptyAnchor {
        /// Qualified name of the declaration.
        qualified_name: String,
    },

    /// The page identifier is empty.
    #[error("declaration '{qualified_name}' has an empty page id")]
    EmptyPage {
        /// Qualified name of the declaration.
        qualified_name: String,
    },

    /// The kind tag is not one of the recognized kinds.
    #[error("unknown symbol kind '{kind}'")]
    UnknownKind {
        /// The unrecognized tag.
        kind: String,
    },
}

/// A `page#anchor` string that does not parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The input did not match the expected `page#anchor` format.
    #[error("invalid location '{0}': expected page#anchor")]
    InvalidFormat(String),
}

/// Errors that abort an index build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A declaration failed validation.
    #[error("malformed declaration at position {position}: {source}")]
    Malformed {
        /// Zero-based position of the record in the input.
        position: usize,
        /// Validation failure.
        source: SymbolError,
    },

    /// Two declarations resolve to the same navigable location.
    #[error("duplicate anchor {location}: claimed by '{first}' and '{second}'")]
    DuplicateAnchor {
        /// The contested location.
        location: Location,
        /// Qualified name of the first declaration.
        first: String,
        /// Qualified name of the second declaration.
        second: String,
    },

    /// Two declarations share both qualified name and signature.
    #[error("duplicate declaration '{qualified_name}{signature}'")]
    DuplicateSignature {
        /// Shared qualified name.
        qualified_name: String,
        /// Shared signature.
        signature: String,
    },

    /// The prefix lookup structure could not be constructed.
    #[error("failed to build lookup structure: {0}")]
    Lookup(String),
}

/// Errors reading or writing a persisted index artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Failed to read the artifact file.
    #[error("failed to read index artifact {path}: {source}")]
    Read {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write the artifact file.
    #[error("failed to write index artifact {path}: {source}")]
    Write {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to encode the index.
    #[error("failed to encode index artifact: {0}")]
    Encode(serde_json::Error),

    /// The artifact is not valid JSON of the expected shape.
    #[error("failed to decode index artifact: {0}")]
    Decode(serde_json::Error),

    /// The artifact decoded but violates an index invariant.
    #[error("malformed index artifact: {reason}")]
    Malformed {
        /// What was wrong.
        reason: String,
    },
}

impl ArtifactError {
    /// Creates a `Malformed` error.
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    /// Returns true if the artifact content itself is bad, as opposed to an I/O failure.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::Decode(_))
    }
}
