//! Index builder: validates declarations, groups overloads, and derives the lookup structure.

use std::{
    borrow::Borrow,
    collections::{HashMap, HashSet},
};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    error::BuildError,
    index::{Index, IndexEntry},
    lookup::Lookup,
    symbol::{Declaration, Location, Symbol},
};

/// What to do with a declaration that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildPolicy {
    /// Fail the whole build on the first bad record.
    #[default]
    Abort,
    /// Drop the record, log it, and count it in [`BuildStats::skipped`].
    SkipMalformed,
}

/// Counts reported by a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Records consumed.
    pub declarations: usize,
    /// Symbols in the index.
    pub symbols: usize,
    /// Distinct display keys.
    pub entries: usize,
    /// Records dropped under [`BuildPolicy::SkipMalformed`].
    pub skipped: usize,
}

/// Builds an index, aborting on the first malformed declaration.
pub fn build<I>(declarations: I) -> Result<Index, BuildError>
where
    I: IntoIterator,
    I::Item: Borrow<Declaration>,
{
    build_with_stats(declarations, BuildPolicy::Abort).map(|(index, _)| index)
}

/// Builds an index under an explicit malformed-record policy.
///
/// Duplicate anchors and duplicate `(qualified name, signature)` pairs are fatal under
/// every policy.
pub fn build_with_stats<I>(
    declarations: I,
    policy: BuildPolicy,
) -> Result<(Index, BuildStats), BuildError>
where
    I: IntoIterator,
    I::Item: Borrow<Declaration>,
{
    let mut grouper = Grouper::default();
    let mut stats = BuildStats::default();

    for (position, decl) in declarations.into_iter().enumerate() {
        stats.declarations += 1;
        let symbol = match Symbol::from_declaration(decl.borrow()) {
            Ok(symbol) => symbol,
            Err(source) if policy == BuildPolicy::SkipMalformed => {
                warn!(position, error = %source, "skipping malformed declaration");
                stats.skipped += 1;
                continue;
            }
            Err(source) => return Err(BuildError::Malformed { position, source }),
        };
        grouper.push(symbol)?;
    }

    let index = grouper.finish()?;
    stats.symbols = index.symbol_count();
    stats.entries = index.len();
    debug!(
        declarations = stats.declarations,
        symbols = stats.symbols,
        entries = stats.entries,
        skipped = stats.skipped,
        "built symbol index"
    );

    Ok((index, stats))
}

/// Builds an index from symbols that were already validated.
pub(crate) fn build_from_symbols(
    symbols: impl IntoIterator<Item = Symbol>,
) -> Result<Index, BuildError> {
    let mut grouper = Grouper::default();
    for symbol in symbols {
        grouper.push(symbol)?;
    }
    grouper.finish()
}

/// Accumulates overload groups while enforcing uniqueness invariants.
#[derive(Default)]
struct Grouper {
    /// Groups in first-seen order.
    entries: Vec<IndexEntry>,
    /// Display key to group position.
    by_key: HashMap<String, usize>,
    /// Claimed locations and the qualified name that claimed each.
    anchors: HashMap<Location, String>,
    /// Seen `(qualified name, signature)` pairs.
    signatures: HashSet<(String, String)>,
}

impl Grouper {
    /// Adds a symbol to its group, appending after earlier declarations.
    fn push(&mut self, symbol: Symbol) -> Result<(), BuildError> {
        let qualified_name = symbol.qualified_name();

        if let Some(first) = self.anchors.get(symbol.location()) {
            return Err(BuildError::DuplicateAnchor {
                location: symbol.location().clone(),
                first: first.clone(),
                second: qualified_name,
            });
        }

        let signature_key = (qualified_name.clone(), symbol.signature().to_string());
        if self.signatures.contains(&signature_key) {
            let (qualified_name, signature) = signature_key;
            return Err(BuildError::DuplicateSignature {
                qualified_name,
                signature,
            });
        }

        self.anchors
            .insert(symbol.location().clone(), qualified_name);
        self.signatures.insert(signature_key);

        match self.by_key.get(symbol.display_key()) {
            Some(&pos) => self.entries[pos].push(symbol),
            None => {
                self.by_key
                    .insert(symbol.display_key().to_string(), self.entries.len());
                self.entries.push(IndexEntry::new(symbol));
            }
        }

        Ok(())
    }

    /// Derives the lookup structure and seals the index.
    fn finish(self) -> Result<Index, BuildError> {
        let lookup = Lookup::build(&self.entries)?;
        Ok(Index::from_parts(self.entries, self.by_key, lookup))
    }
}
