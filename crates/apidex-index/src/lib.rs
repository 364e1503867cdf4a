//! Symbol index and query engine for apidex.
//!
//! This crate owns the whole core of apidex:
//! - The symbol model: raw [`Declaration`] records and validated [`Symbol`]s
//! - The index builder, which groups overloads under their leaf name
//! - The query engine, which ranks exact, prefix, and substring matches lazily
//! - Artifact persistence and status detection
//!
//! # Example
//!
//! ```
//! use apidex_index::{Declaration, MatchKind, SymbolKind, build};
//!
//! let index = build([
//!     Declaration::new("pcpp::Packet::getLayerOfType", SymbolKind::Member, "()", "packet.html", "a1"),
//!     Declaration::new("pcpp::Packet::getRawPacket", SymbolKind::Member, "()", "packet.html", "a2"),
//!     Declaration::new("pcpp::Layer::getNextLayer", SymbolKind::Member, "()", "layer.html", "a3"),
//! ])
//! .unwrap();
//!
//! let found: Vec<_> = index.search("layer").map(|m| (m.display_key(), m.kind())).collect();
//! assert_eq!(
//!     found,
//!     vec![
//!         ("getLayerOfType", MatchKind::Substring),
//!         ("getNextLayer", MatchKind::Substring),
//!     ]
//! );
//! ```

#![warn(missing_docs)]

mod artifact;
mod build;
mod error;
mod index;
mod location;
mod lookup;
mod search;
mod status;
mod symbol;

pub use artifact::{
    ARTIFACT_VERSION, ArtifactInfo, decode_artifact, encode_artifact, load_artifact,
    read_artifact_info, save_artifact,
};
pub use build::{BuildPolicy, BuildStats, build, build_with_stats};
pub use error::{ArtifactError, BuildError, LocationError, SymbolError};
pub use index::{Index, IndexEntry};
pub use location::artifact_path;
pub use search::{DEFAULT_LIMIT, KindFilter, Match, MatchKind, Matches, SearchOptions};
pub use status::{ArtifactStatus, detect_artifact_status};
pub use symbol::{
    Declaration, Location, SCOPE_SEPARATOR, Symbol, SymbolKind, split_qualified_name,
};
