//! Rendering and JSON serialization for CLI output.

use std::mem;

pub use apidex_highlight::{dim, header, subheader, success, warning};
use apidex_highlight::{Highlighter, mark_match};
use apidex_present::{Presentation, ResultGroup, ResultItem, ResultView};
use serde::Serialize;

/// A [`ResultView`] that renders colored text into a buffer.
pub struct TerminalView {
    /// Signature highlighter.
    highlighter: Highlighter,
    /// Prefix for printed links.
    base_url: Option<String>,
    /// Query being rendered, for match marking.
    query: String,
    /// Text rendered since the last clear.
    buffer: String,
}

impl TerminalView {
    /// Creates a view whose links are prefixed with `base_url`.
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            highlighter: Highlighter::new(),
            base_url,
            query: String::new(),
            buffer: String::new(),
        }
    }

    /// Sets the query used to mark matches in group headers.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Text rendered since the last clear.
    pub fn rendered(&self) -> &str {
        &self.buffer
    }
}

impl ResultView for TerminalView {
    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn group(&mut self, group: &ResultGroup) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(&format!(
            "{} {}\n",
            header(&mark_match(&group.display_key, &self.query)),
            dim(&format!("({})", group.match_kind))
        ));
    }

    fn item(&mut self, _group: &ResultGroup, item: &ResultItem) {
        let declaration = self
            .highlighter
            .highlight_signature(&item.qualified_name, &item.signature);
        self.buffer.push_str(&format!(
            "   {declaration} {}\n      {}\n",
            dim(&format!("[{}]", item.kind)),
            dim(&item.location.href(self.base_url.as_deref()))
        ));
    }

    fn no_matches(&mut self, query: &str) {
        self.buffer
            .push_str(&format!("{}\n", dim(&format!("No matches for '{query}'."))));
    }

    fn unavailable(&mut self) {
        self.buffer.push_str(&format!(
            "{}\n",
            warning("Search unavailable: the index could not be loaded.")
        ));
    }
}

/// A [`ResultView`] that keeps rendered groups for serialization.
#[derive(Default)]
pub struct JsonView {
    /// Groups rendered since the last clear.
    groups: Vec<ResultGroup>,
}

impl JsonView {
    /// Groups rendered since the last clear.
    pub fn take_groups(&mut self) -> Vec<ResultGroup> {
        mem::take(&mut self.groups)
    }
}

impl ResultView for JsonView {
    fn clear(&mut self) {
        self.groups.clear();
    }

    fn group(&mut self, group: &ResultGroup) {
        self.groups.push(group.clone());
    }

    fn item(&mut self, _group: &ResultGroup, _item: &ResultItem) {}

    fn no_matches(&mut self, _query: &str) {}

    fn unavailable(&mut self) {}
}

/// JSON output for a single query's results.
#[derive(Serialize)]
pub struct JsonQueryResults {
    /// The original query string.
    pub query: String,
    /// Whether an index was available to search.
    pub available: bool,
    /// Result groups in rank order.
    pub results: Vec<ResultGroup>,
    /// Number of result groups.
    pub total_matches: usize,
}

impl JsonQueryResults {
    /// Builds the JSON record for one presented query.
    pub fn new(query: &str, presentation: Presentation, results: Vec<ResultGroup>) -> Self {
        Self {
            query: query.to_string(),
            available: presentation != Presentation::Unavailable,
            total_matches: results.len(),
            results,
        }
    }
}

/// JSON output for `apidex search`.
#[derive(Serialize)]
pub struct JsonSearchOutput {
    /// Results grouped by query.
    pub queries: Vec<JsonQueryResults>,
}

#[cfg(test)]
mod tests {
    use apidex_index::{Location, MatchKind, SymbolKind};

    use super::*;

    fn group() -> ResultGroup {
        ResultGroup {
            display_key: "getLayerOfType".into(),
            match_kind: MatchKind::Substring,
            items: vec![ResultItem {
                qualified_name: "pcpp::Packet::getLayerOfType".into(),
                signature: "(bool reverseOrder=false) const".into(),
                kind: SymbolKind::Member,
                location: Location {
                    page_id: "classpcpp_1_1_packet.html".into(),
                    anchor: "a1b".into(),
                },
            }],
        }
    }

    #[test]
    fn terminal_view_renders_links_and_clears() {
        let mut view = TerminalView::new(Some("https://docs.example/".into()));
        view.set_query("layer");
        let g = group();
        view.group(&g);
        view.item(&g, &g.items[0]);
        let text = view.rendered();
        assert!(text.contains("https://docs.example/classpcpp_1_1_packet.html#a1b"));
        assert!(text.contains("[member]"));
        assert!(text.contains("(substring)"));

        view.clear();
        assert!(view.rendered().is_empty());
    }

    #[test]
    fn terminal_empty_states_differ() {
        let mut view = TerminalView::new(None);
        view.no_matches("zzz");
        assert!(view.rendered().contains("No matches for 'zzz'"));
        view.clear();
        view.unavailable();
        assert!(view.rendered().contains("Search unavailable"));
    }

    #[test]
    fn json_records_availability() {
        let record = JsonQueryResults::new("x", Presentation::Unavailable, Vec::new());
        assert!(!record.available);
        let record = JsonQueryResults::new("layer", Presentation::Rendered(1), vec![group()]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["available"], true);
        assert_eq!(json["total_matches"], 1);
        assert_eq!(json["results"][0]["display_key"], "getLayerOfType");
    }
}
