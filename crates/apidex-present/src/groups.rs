//! Owned result groups: what a host renders for one query.

use apidex_index::{Location, Match, MatchKind, SymbolKind};
use serde::Serialize;

/// One rendered symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    /// Full qualified name.
    pub qualified_name: String,
    /// Declaration form; empty when none was recorded.
    pub signature: String,
    /// Declaration kind.
    pub kind: SymbolKind,
    /// Link target.
    pub location: Location,
}

/// One display key and the symbols shown under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultGroup {
    /// Group header.
    pub display_key: String,
    /// How the query matched the key.
    pub match_kind: MatchKind,
    /// Symbols in declaration order.
    pub items: Vec<ResultItem>,
}

impl ResultGroup {
    /// Copies a match out of the index.
    pub fn from_match(m: &Match<'_>) -> Self {
        Self {
            display_key: m.display_key().to_string(),
            match_kind: m.kind(),
            items: m
                .symbols()
                .map(|symbol| ResultItem {
                    qualified_name: symbol.qualified_name(),
                    signature: symbol.signature().to_string(),
                    kind: symbol.kind(),
                    location: symbol.location().clone(),
                })
                .collect(),
        }
    }
}

/// Collects ranked matches into owned groups, preserving rank order.
pub fn collect_groups<'a>(matches: impl IntoIterator<Item = Match<'a>>) -> Vec<ResultGroup> {
    matches
        .into_iter()
        .map(|m| ResultGroup::from_match(&m))
        .collect()
}

#[cfg(test)]
mod tests {
    use apidex_index::{Declaration, build};

    use super::*;

    #[test]
    fn groups_follow_rank_and_declaration_order() {
        let index = build([
            Declaration::new("pcpp::A::get", SymbolKind::Member, "(int)", "a.html", "1"),
            Declaration::new("pcpp::getValue", SymbolKind::Function, "()", "n.html", "2"),
            Declaration::new("pcpp::B::get", SymbolKind::Member, "()", "b.html", "3"),
        ])
        .unwrap();

        let groups = collect_groups(index.search("get"));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].display_key, "get");
        assert_eq!(groups[0].match_kind, MatchKind::Exact);
        let names: Vec<&str> = groups[0]
            .items
            .iter()
            .map(|i| i.qualified_name.as_str())
            .collect();
        assert_eq!(names, vec!["pcpp::A::get", "pcpp::B::get"]);
        assert_eq!(groups[1].items[0].location.to_string(), "n.html#2");
    }

    #[test]
    fn serializes_for_json_output() {
        let index = build([Declaration::new(
            "ns::f",
            SymbolKind::Function,
            "(int)",
            "ns.html",
            "a1",
        )])
        .unwrap();
        let groups = collect_groups(index.search("f"));
        let json = serde_json::to_value(&groups).unwrap();
        assert_eq!(json[0]["match_kind"], "exact");
        assert_eq!(json[0]["items"][0]["kind"], "function");
        assert_eq!(json[0]["items"][0]["location"]["anchor"], "a1");
    }
}
