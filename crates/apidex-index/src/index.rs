//! The immutable index: overload groups plus the derived lookup structure.

use std::collections::HashMap;

use crate::{
    lookup::Lookup,
    search::{Matches, SearchOptions},
    symbol::Symbol,
};

/// One display key and all symbols grouped under it, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Shared leaf name.
    display_key: String,
    /// Overloads and same-named declarations. Never empty.
    symbols: Vec<Symbol>,
}

impl IndexEntry {
    /// Starts a group with its first symbol.
    pub(crate) fn new(first: Symbol) -> Self {
        Self {
            display_key: first.display_key().to_string(),
            symbols: vec![first],
        }
    }

    /// Appends a symbol with the same display key.
    pub(crate) fn push(&mut self, symbol: Symbol) {
        debug_assert_eq!(symbol.display_key(), self.display_key);
        self.symbols.push(symbol);
    }

    /// The group key.
    pub fn display_key(&self) -> &str {
        &self.display_key
    }

    /// Symbols in the order they were declared.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of symbols in the group.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// An immutable, queryable symbol index.
///
/// Built once by [`build`](crate::build()) or loaded from an artifact; never patched in place.
/// Replacing an index means constructing a new one and swapping the handle, so a query never
/// sees a partially built state.
#[derive(Debug, Default)]
pub struct Index {
    /// Entries in first-seen order.
    entries: Vec<IndexEntry>,
    /// Display key to entry position.
    by_key: HashMap<String, usize>,
    /// Case-folded prefix lookup.
    lookup: Lookup,
    /// Total symbols across all entries.
    symbol_count: usize,
}

impl Index {
    /// Creates an index with no entries; every query against it returns nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assembles an index from completed groups.
    pub(crate) fn from_parts(
        entries: Vec<IndexEntry>,
        by_key: HashMap<String, usize>,
        lookup: Lookup,
    ) -> Self {
        let symbol_count = entries.iter().map(IndexEntry::len).sum();
        Self {
            entries,
            by_key,
            lookup,
            symbol_count,
        }
    }

    /// Number of display keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of symbols.
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Returns the entry for a display key, matched exactly (case-sensitive).
    pub fn get(&self, display_key: &str) -> Option<&IndexEntry> {
        self.by_key.get(display_key).map(|&pos| &self.entries[pos])
    }

    /// Entries in the order their first declaration was encountered.
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    /// Searches with default options.
    pub fn search(&self, query: &str) -> Matches<'_> {
        self.search_with(query, &SearchOptions::default())
    }

    /// Searches with explicit options.
    ///
    /// The returned sequence is lazy: candidates past the result limit are never evaluated.
    pub fn search_with(&self, query: &str, options: &SearchOptions) -> Matches<'_> {
        Matches::new(self, query, options)
    }

    /// Derived lookup structure.
    pub(crate) fn lookup(&self) -> &Lookup {
        &self.lookup
    }

    /// Entry at a position produced by the lookup structure.
    pub(crate) fn entry_at(&self, pos: usize) -> &IndexEntry {
        &self.entries[pos]
    }
}
