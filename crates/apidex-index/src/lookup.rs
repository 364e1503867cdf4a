//! Case-folded key lookup backed by a finite-state transducer.
//!
//! Display keys are lower-cased and sorted into slots; several display keys can share a slot
//! when they differ only by case. The FST maps each folded key to its slot number, so exact
//! and prefix resolution cost time proportional to the query length. Because slots are sorted,
//! all keys sharing a prefix form one contiguous run starting at the slot the FST finds.

use std::fmt;

use tantivy_fst::{Automaton, IntoStreamer, Map, Streamer};

use crate::{error::BuildError, index::IndexEntry};

/// Folds a key or query for case-insensitive comparison.
pub(crate) fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// All display keys that fold to the same text.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    /// Lower-cased display key.
    pub(crate) folded: String,
    /// Entry positions, ordered by raw display key.
    pub(crate) entries: Vec<usize>,
}

/// Derived lookup structure over an index's display keys.
#[derive(Default)]
pub(crate) struct Lookup {
    /// Folded key to slot number. `None` for an empty index.
    fst: Option<Map<Vec<u8>>>,
    /// Slots sorted by folded key.
    slots: Vec<Slot>,
}

impl fmt::Debug for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookup")
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl Lookup {
    /// Builds the lookup structure for a completed entry list.
    pub(crate) fn build(entries: &[IndexEntry]) -> Result<Self, BuildError> {
        let mut keyed: Vec<(String, &str, usize)> = entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (fold(entry.display_key()), entry.display_key(), pos))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

        let mut slots: Vec<Slot> = Vec::new();
        for (folded, _, pos) in keyed {
            match slots.last_mut() {
                Some(slot) if slot.folded == folded => slot.entries.push(pos),
                _ => slots.push(Slot {
                    folded,
                    entries: vec![pos],
                }),
            }
        }

        if slots.is_empty() {
            return Ok(Self::default());
        }

        let fst = Map::from_iter(
            slots
                .iter()
                .enumerate()
                .map(|(n, slot)| (slot.folded.as_bytes(), n as u64)),
        )
        .map_err(|e| BuildError::Lookup(e.to_string()))?;

        Ok(Self {
            fst: Some(fst),
            slots,
        })
    }

    /// Slots in folded-key order.
    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns the slot whose folded key equals `folded`.
    pub(crate) fn exact(&self, folded: &str) -> Option<usize> {
        let fst = self.fst.as_ref()?;
        fst.get(folded.as_bytes()).map(|n| n as usize)
    }

    /// Returns the first slot whose folded key starts with `folded`.
    pub(crate) fn prefix_start(&self, folded: &str) -> Option<usize> {
        let fst = self.fst.as_ref()?;
        let mut stream = fst
            .search(PrefixAutomaton::new(folded.as_bytes()))
            .into_stream();
        stream.next().map(|(_, n)| n as usize)
    }
}

/// Automaton accepting every key that starts with a byte prefix.
struct PrefixAutomaton<'a> {
    /// Required leading bytes.
    prefix: &'a [u8],
}

impl<'a> PrefixAutomaton<'a> {
    /// Creates an automaton for `prefix`.
    fn new(prefix: &'a [u8]) -> Self {
        Self { prefix }
    }
}

impl Automaton for PrefixAutomaton<'_> {
    /// Number of prefix bytes matched so far; `None` once a byte diverges.
    type State = Option<usize>;

    fn start(&self) -> Self::State {
        Some(0)
    }

    fn is_match(&self, state: &Self::State) -> bool {
        *state == Some(self.prefix.len())
    }

    fn can_match(&self, state: &Self::State) -> bool {
        state.is_some()
    }

    fn accept(&self, state: &Self::State, byte: u8) -> Self::State {
        match *state {
            Some(matched) if matched == self.prefix.len() => Some(matched),
            Some(matched) if self.prefix[matched] == byte => Some(matched + 1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;
    use crate::symbol::{Declaration, SymbolKind};

    fn lookup_for(keys: &[&str]) -> crate::Index {
        build(keys.iter().enumerate().map(|(n, key)| {
            Declaration::new(
                format!("ns::{key}"),
                SymbolKind::Function,
                "",
                "ns.html",
                format!("a{n}"),
            )
        }))
        .unwrap()
    }

    #[test]
    fn slots_group_case_variants() {
        let index = lookup_for(&["get", "Get", "GET", "set"]);
        let slots = index.lookup().slots();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].folded, "get");
        assert_eq!(slots[0].entries.len(), 3);
        let keys: Vec<&str> = slots[0]
            .entries
            .iter()
            .map(|&pos| index.entry_at(pos).display_key())
            .collect();
        assert_eq!(keys, vec!["GET", "Get", "get"]);
    }

    #[test]
    fn exact_lookup_uses_folded_key() {
        let index = lookup_for(&["Packet", "PacketTrailer"]);
        let lookup = index.lookup();
        assert_eq!(lookup.exact("packet"), Some(0));
        assert_eq!(lookup.exact("Packet"), None);
        assert_eq!(lookup.exact("pack"), None);
    }

    #[test]
    fn prefix_start_finds_first_run_member() {
        let index = lookup_for(&["alpha", "getValue", "get", "getter", "zeta"]);
        let lookup = index.lookup();
        let start = lookup.prefix_start("get").unwrap();
        assert_eq!(lookup.slots()[start].folded, "get");
        assert_eq!(lookup.prefix_start("q"), None);
    }

    #[test]
    fn empty_index_has_no_fst() {
        let lookup = Lookup::build(&[]).unwrap();
        assert!(lookup.slots().is_empty());
        assert_eq!(lookup.exact("x"), None);
        assert_eq!(lookup.prefix_start("x"), None);
    }

    #[test]
    fn automaton_tracks_prefix() {
        let aut = PrefixAutomaton::new(b"ab");
        let s0 = aut.start();
        let s1 = aut.accept(&s0, b'a');
        let s2 = aut.accept(&s1, b'b');
        let s3 = aut.accept(&s2, b'z');
        assert!(!aut.is_match(&s1));
        assert!(aut.is_match(&s2));
        assert!(aut.is_match(&s3));
        assert!(!aut.can_match(&aut.accept(&s0, b'x')));
    }
}
