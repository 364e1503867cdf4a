//! Query engine: ranked, lazy matching of a query against display keys.
//!
//! Matches come out in three phases: the exact slot, then the contiguous run of slots that
//! start with the query, then a scan for keys that merely contain it. Each phase yields keys
//! in folded order, so the whole sequence is ranked without sorting. The iterator stops as
//! soon as the result limit is reached; a substring scan is never started once exact and
//! prefix matches fill the limit.

use std::fmt;

use apidex_config::SearchSettings;
use serde::Serialize;

use crate::{
    error::SymbolError,
    index::{Index, IndexEntry},
    lookup::fold,
    symbol::{Symbol, SymbolKind},
};

/// Default result cap.
pub const DEFAULT_LIMIT: usize = 40;

/// How a query matched a display key. Ordered best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The key equals the query, ignoring case.
    Exact,
    /// The key starts with the query, ignoring case.
    Prefix,
    /// The key contains the query elsewhere, ignoring case.
    Substring,
}

impl MatchKind {
    /// Returns the lowercase tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Prefix => "prefix",
            Self::Substring => "substring",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of symbol kinds a search reports.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindFilter(u8);

impl KindFilter {
    /// Accepts every kind.
    pub const ALL: Self = Self(0b1_1111);

    /// Bit for a kind.
    const fn bit(kind: SymbolKind) -> u8 {
        1 << kind as u8
    }

    /// Accepts exactly one kind.
    pub const fn only(kind: SymbolKind) -> Self {
        Self(Self::bit(kind))
    }

    /// Returns true if symbols of `kind` pass the filter.
    pub const fn allows(self, kind: SymbolKind) -> bool {
        self.0 & Self::bit(kind) != 0
    }

    /// Returns true if no kind is excluded.
    pub const fn is_all(self) -> bool {
        self.0 == Self::ALL.0
    }

    /// Parses kind names; an empty list accepts every kind.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Self, SymbolError> {
        names
            .iter()
            .map(|name| name.as_ref().parse::<SymbolKind>())
            .collect()
    }
}

impl Default for KindFilter {
    fn default() -> Self {
        Self::ALL
    }
}

/// Collecting no kinds yields [`KindFilter::ALL`].
impl FromIterator<SymbolKind> for KindFilter {
    fn from_iter<T: IntoIterator<Item = SymbolKind>>(iter: T) -> Self {
        let bits = iter.into_iter().fold(0, |acc, kind| acc | Self::bit(kind));
        if bits == 0 { Self::ALL } else { Self(bits) }
    }
}

impl fmt::Debug for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(SymbolKind::ALL.into_iter().filter(|k| self.allows(*k)))
            .finish()
    }
}

/// Options controlling a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of matches yielded.
    pub limit: usize,
    /// Kinds to report.
    pub kinds: KindFilter,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            kinds: KindFilter::ALL,
        }
    }
}

impl SearchOptions {
    /// Returns these options with a different limit.
    pub fn with_limit(self, limit: usize) -> Self {
        Self { limit, ..self }
    }

    /// Returns these options with a different kind filter.
    pub fn with_kinds(self, kinds: KindFilter) -> Self {
        Self { kinds, ..self }
    }

    /// Builds options from the `[search]` config section, validating kind names.
    pub fn from_settings(settings: &SearchSettings) -> Result<Self, SymbolError> {
        Ok(Self {
            limit: settings.limit,
            kinds: KindFilter::parse_list(&settings.kinds)?,
        })
    }
}

/// One ranked result: a display key, its overload group, and how it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// Match quality.
    kind: MatchKind,
    /// The matched group.
    entry: &'a IndexEntry,
    /// Filter applied to the group's symbols.
    filter: KindFilter,
}

impl<'a> Match<'a> {
    /// How the query matched.
    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// The matched display key.
    pub fn display_key(&self) -> &'a str {
        self.entry.display_key()
    }

    /// The full overload group, ignoring any kind filter.
    pub fn entry(&self) -> &'a IndexEntry {
        self.entry
    }

    /// Symbols in the group that pass the search's kind filter, in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = &'a Symbol> + use<'a> {
        let filter = self.filter;
        self.entry
            .symbols()
            .iter()
            .filter(move |symbol| filter.allows(symbol.kind()))
    }
}

/// Progress through the three match phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Yielding the slot equal to the query.
    Exact,
    /// Walking the run of slots that start with the query.
    Prefix,
    /// Scanning every slot for an inner occurrence.
    Substring,
    /// Exhausted or capped.
    Done,
}

/// Lazy, ranked search results. Created by [`Index::search`].
///
/// A clone continues from the same position; call `search` again for a fresh sequence.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    /// Index being searched.
    index: &'a Index,
    /// Case-folded query.
    query: String,
    /// Maximum matches to yield.
    limit: usize,
    /// Kinds to report.
    filter: KindFilter,
    /// Current phase.
    phase: Phase,
    /// Slot equal to the query, if any.
    exact: Option<usize>,
    /// Current slot within the phase.
    cursor: usize,
    /// Next entry within the current slot.
    member: usize,
    /// Matches yielded so far.
    emitted: usize,
    /// Slots the substring scan has looked at.
    examined: usize,
}

impl<'a> Matches<'a> {
    /// Starts a search. An empty query or a zero limit yields nothing.
    pub(crate) fn new(index: &'a Index, query: &str, options: &SearchOptions) -> Self {
        let folded = fold(query);
        let lookup = index.lookup();
        let (phase, exact) = if folded.is_empty() || options.limit == 0 {
            (Phase::Done, None)
        } else {
            (Phase::Exact, lookup.exact(&folded))
        };

        Self {
            index,
            query: folded,
            limit: options.limit,
            filter: options.kinds,
            phase,
            exact,
            cursor: 0,
            member: 0,
            emitted: 0,
            examined: 0,
        }
    }

    /// Number of keys the substring scan has examined so far.
    ///
    /// Stays zero when exact and prefix matches reach the limit.
    pub fn substring_candidates_examined(&self) -> usize {
        self.examined
    }

    /// Moves to `phase`, starting at slot `cursor`.
    fn enter(&mut self, phase: Phase, cursor: usize) {
        self.phase = phase;
        self.cursor = cursor;
        self.member = 0;
    }

    /// Produces the next unfiltered candidate entry and its match kind.
    fn next_candidate(&mut self) -> Option<(usize, MatchKind)> {
        let index = self.index;
        let slots = index.lookup().slots();

        loop {
            match self.phase {
                Phase::Exact => {
                    if let Some(slot) = self.exact
                        && let Some(&pos) = slots[slot].entries.get(self.member)
                    {
                        self.member += 1;
                        return Some((pos, MatchKind::Exact));
                    }
                    let start = index
                        .lookup()
                        .prefix_start(&self.query)
                        .unwrap_or(slots.len());
                    self.enter(Phase::Prefix, start);
                }
                Phase::Prefix => {
                    let Some(slot) = slots
                        .get(self.cursor)
                        .filter(|slot| slot.folded.starts_with(&self.query))
                    else {
                        self.enter(Phase::Substring, 0);
                        continue;
                    };
                    if Some(self.cursor) == self.exact {
                        self.cursor += 1;
                        continue;
                    }
                    if let Some(&pos) = slot.entries.get(self.member) {
                        self.member += 1;
                        return Some((pos, MatchKind::Prefix));
                    }
                    self.enter(Phase::Prefix, self.cursor + 1);
                }
                Phase::Substring => {
                    let Some(slot) = slots.get(self.cursor) else {
                        self.phase = Phase::Done;
                        continue;
                    };
                    if self.member == 0 {
                        self.examined += 1;
                        if slot.folded.starts_with(&self.query)
                            || !slot.folded.contains(&self.query)
                        {
                            self.cursor += 1;
                            continue;
                        }
                    }
                    if let Some(&pos) = slot.entries.get(self.member) {
                        self.member += 1;
                        return Some((pos, MatchKind::Substring));
                    }
                    self.enter(Phase::Substring, self.cursor + 1);
                }
                Phase::Done => return None,
            }
        }
    }

    /// Returns true if an entry has at least one symbol the filter reports.
    fn passes_filter(&self, entry: &IndexEntry) -> bool {
        self.filter.is_all()
            || entry
                .symbols()
                .iter()
                .any(|symbol| self.filter.allows(symbol.kind()))
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = Match<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.emitted < self.limit {
            let (pos, kind) = self.next_candidate()?;
            let entry = self.index.entry_at(pos);
            if self.passes_filter(entry) {
                self.emitted += 1;
                return Some(Match {
                    kind,
                    entry,
                    filter: self.filter,
                });
            }
        }
        self.phase = Phase::Done;
        None
    }
}
