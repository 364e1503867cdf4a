//! Error types for the apidex-present crate.

use thiserror::Error;

/// A selection that does not name a rendered result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// The group index is past the rendered groups.
    #[error("no result group {group} (showing {available})")]
    NoSuchGroup {
        /// Requested group.
        group: usize,
        /// Number of rendered groups.
        available: usize,
    },

    /// The item index is past the group's items.
    #[error("result group '{display_key}' has no item {item} (showing {available})")]
    NoSuchItem {
        /// Key of the selected group.
        display_key: String,
        /// Requested item.
        item: usize,
        /// Number of items in the group.
        available: usize,
    },
}
