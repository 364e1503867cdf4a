//! The loaded index, or the lack of one.

use std::sync::Arc;

use apidex_index::{ArtifactError, Index};
use tracing::warn;

/// The index a presenter searches.
///
/// Replaced wholesale when a new index is built; never mutated in place.
#[derive(Debug, Clone)]
pub enum IndexHandle {
    /// A usable index.
    Ready(Arc<Index>),
    /// No index could be loaded; searches render as unavailable.
    Unavailable,
}

impl IndexHandle {
    /// Wraps a built index.
    pub fn ready(index: Index) -> Self {
        Self::Ready(Arc::new(index))
    }

    /// Wraps the outcome of loading an artifact, degrading on failure.
    pub fn from_load<T>(result: Result<(Index, T), ArtifactError>) -> Self {
        match result {
            Ok((index, _)) => Self::ready(index),
            Err(err) => {
                warn!("search unavailable: {err}");
                Self::Unavailable
            }
        }
    }

    /// The index, when one is loaded.
    pub fn index(&self) -> Option<&Index> {
        match self {
            Self::Ready(index) => Some(index),
            Self::Unavailable => None,
        }
    }

    /// Returns true if an index is loaded.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl From<Index> for IndexHandle {
    fn from(index: Index) -> Self {
        Self::ready(index)
    }
}

impl From<Arc<Index>> for IndexHandle {
    fn from(index: Arc<Index>) -> Self {
        Self::Ready(index)
    }
}
