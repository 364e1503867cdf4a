//! apidex: symbol search for generated API reference sites.
//!
//! apidex reads the declarations a documentation generator emits (a Doxygen `search/`
//! directory, or a plain JSON array of declarations), builds an immutable index grouped by
//! short name, and answers as-you-type queries with exact, prefix, then substring matches.
//! The `apidex` binary is a terminal host for the presenter: it keeps the persisted index
//! fresh and renders results as text, JSON, or an HTML fragment.

#![warn(missing_docs)]

pub mod cli;
