//! Artifact status detection.
//!
//! Compares an artifact's header against the source it should reflect, so callers can
//! decide between loading it, rebuilding it, or degrading to an unavailable search.

use std::path::Path;

use crate::artifact::{ARTIFACT_VERSION, read_artifact_info};

/// State of a persisted artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStatus {
    /// Artifact exists, has the current format, and matches the source fingerprint.
    Current,
    /// Artifact exists but was built from a different source or an older format.
    Stale,
    /// No artifact exists.
    Missing,
    /// Artifact exists but cannot be read.
    Malformed(String),
}

impl ArtifactStatus {
    /// Returns a human-readable description for display.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Stale => "stale",
            Self::Missing => "missing",
            Self::Malformed(_) => "malformed",
        }
    }

    /// Returns true if a rebuild should happen before loading.
    ///
    /// A malformed artifact is not rebuilt implicitly; `apidex build` replaces it.
    pub fn needs_rebuild(&self) -> bool {
        matches!(self, Self::Stale | Self::Missing)
    }
}

/// Determines the status of the artifact at `path`.
///
/// When `expected_fingerprint` is `None` the source is unknown and any readable artifact of
/// the current format counts as current.
pub fn detect_artifact_status(path: &Path, expected_fingerprint: Option<&str>) -> ArtifactStatus {
    if !path.exists() {
        return ArtifactStatus::Missing;
    }

    let info = match read_artifact_info(path) {
        Ok(info) => info,
        Err(e) => return ArtifactStatus::Malformed(e.to_string()),
    };

    if info.version != ARTIFACT_VERSION {
        return ArtifactStatus::Stale;
    }

    match expected_fingerprint {
        Some(expected) if info.source_fingerprint.as_deref() != Some(expected) => {
            ArtifactStatus::Stale
        }
        _ => ArtifactStatus::Current,
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::{artifact::save_artifact, index::Index};

    #[test]
    fn status_description() {
        assert_eq!(ArtifactStatus::Current.description(), "current");
        assert_eq!(ArtifactStatus::Stale.description(), "stale");
        assert_eq!(ArtifactStatus::Missing.description(), "missing");
        assert_eq!(
            ArtifactStatus::Malformed("x".into()).description(),
            "malformed"
        );
    }

    #[test]
    fn status_needs_rebuild() {
        assert!(!ArtifactStatus::Current.needs_rebuild());
        assert!(ArtifactStatus::Stale.needs_rebuild());
        assert!(ArtifactStatus::Missing.needs_rebuild());
        assert!(!ArtifactStatus::Malformed("x".into()).needs_rebuild());
    }

    #[test]
    fn detects_each_state() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.json");

        assert_eq!(detect_artifact_status(&path, Some("a")), ArtifactStatus::Missing);

        save_artifact(&Index::empty(), &path, Some("a")).unwrap();
        assert_eq!(detect_artifact_status(&path, Some("a")), ArtifactStatus::Current);
        assert_eq!(detect_artifact_status(&path, Some("b")), ArtifactStatus::Stale);
        assert_eq!(detect_artifact_status(&path, None), ArtifactStatus::Current);
    }

    #[test]
    fn old_format_is_stale() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.json");
        fs::write(&path, r#"{"version":0,"entries":[]}"#).unwrap();
        assert_eq!(detect_artifact_status(&path, None), ArtifactStatus::Stale);
    }

    #[test]
    fn garbage_is_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            detect_artifact_status(&path, None),
            ArtifactStatus::Malformed(_)
        ));
    }
}
