//! HTML fragment rendering for embedding results in a generated page.

use crate::{
    groups::{ResultGroup, ResultItem},
    view::ResultView,
};

/// Escapes text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A [`ResultView`] that builds an HTML fragment.
#[derive(Debug, Clone)]
pub struct HtmlView {
    /// Prefix for every link.
    base_url: Option<String>,
    /// `data-state` of the list: `results`, `no-matches`, `unavailable`, or `empty`.
    state: &'static str,
    /// Rendered groups.
    body: String,
    /// Whether a group element is open.
    open_group: bool,
}

impl HtmlView {
    /// Creates an empty view whose links are prefixed with `base_url`.
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url,
            state: "empty",
            body: String::new(),
            open_group: false,
        }
    }

    /// The fragment for everything rendered since the last clear.
    pub fn to_html(&self) -> String {
        let mut out = format!(
            "<div class=\"apidex-results\" data-state=\"{}\">\n",
            self.state
        );
        out.push_str(&self.body);
        if self.open_group {
            out.push_str("  </div>\n");
        }
        out.push_str("</div>\n");
        out
    }

    /// Closes the open group element, if any.
    fn close_group(&mut self) {
        if self.open_group {
            self.body.push_str("  </div>\n");
            self.open_group = false;
        }
    }
}

impl ResultView for HtmlView {
    fn clear(&mut self) {
        self.body.clear();
        self.open_group = false;
        self.state = "empty";
    }

    fn group(&mut self, group: &ResultGroup) {
        self.close_group();
        self.state = "results";
        self.body.push_str(&format!(
            "  <div class=\"apidex-group\" data-match=\"{}\">\n    <div class=\"apidex-key\">{}</div>\n",
            group.match_kind,
            escape(&group.display_key)
        ));
        self.open_group = true;
    }

    fn item(&mut self, _group: &ResultGroup, item: &ResultItem) {
        let href = item.location.href(self.base_url.as_deref());
        self.body.push_str(&format!(
            "    <a class=\"apidex-item\" href=\"{}\" data-kind=\"{}\"><span class=\"apidex-name\">{}</span>",
            escape(&href),
            item.kind,
            escape(&item.qualified_name)
        ));
        if !item.signature.is_empty() {
            self.body.push_str(&format!(
                "<span class=\"apidex-signature\">{}</span>",
                escape(&item.signature)
            ));
        }
        self.body.push_str("</a>\n");
    }

    fn no_matches(&mut self, _query: &str) {
        self.state = "no-matches";
    }

    fn unavailable(&mut self) {
        self.state = "unavailable";
    }
}

/// Renders result groups as a fragment.
pub fn render_html(groups: &[ResultGroup], base_url: Option<&str>) -> String {
    let mut view = HtmlView::new(base_url.map(str::to_string));
    for group in groups {
        view.group(group);
        for item in &group.items {
            view.item(group, item);
        }
    }
    view.to_html()
}

#[cfg(test)]
mod tests {
    use apidex_index::{Location, MatchKind, SymbolKind};

    use super::*;

    fn group() -> ResultGroup {
        ResultGroup {
            display_key: "operator<".into(),
            match_kind: MatchKind::Exact,
            items: vec![
                ResultItem {
                    qualified_name: "pcpp::IPv4Address::operator<".into(),
                    signature: "(const IPv4Address &rhs) const".into(),
                    kind: SymbolKind::Member,
                    location: Location {
                        page_id: "classpcpp_1_1_i_pv4_address.html".into(),
                        anchor: "a3f".into(),
                    },
                },
                ResultItem {
                    qualified_name: "pcpp::operator<".into(),
                    signature: String::new(),
                    kind: SymbolKind::Function,
                    location: Location {
                        page_id: "namespacepcpp.html".into(),
                        anchor: "a7".into(),
                    },
                },
            ],
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"a<b> & "c" 'd'"#),
            "a&lt;b&gt; &amp; &quot;c&quot; &#39;d&#39;"
        );
    }

    #[test]
    fn renders_groups_with_links() {
        let html = render_html(&[group()], Some("https://docs.example/api/"));
        assert_eq!(
            html,
            "<div class=\"apidex-results\" data-state=\"results\">\n\
             \x20 <div class=\"apidex-group\" data-match=\"exact\">\n\
             \x20   <div class=\"apidex-key\">operator&lt;</div>\n\
             \x20   <a class=\"apidex-item\" href=\"https://docs.example/api/classpcpp_1_1_i_pv4_address.html#a3f\" data-kind=\"member\">\
             <span class=\"apidex-name\">pcpp::IPv4Address::operator&lt;</span>\
             <span class=\"apidex-signature\">(const IPv4Address &amp;rhs) const</span></a>\n\
             \x20   <a class=\"apidex-item\" href=\"https://docs.example/api/namespacepcpp.html#a7\" data-kind=\"function\">\
             <span class=\"apidex-name\">pcpp::operator&lt;</span></a>\n\
             \x20 </div>\n\
             </div>\n"
        );
    }

    #[test]
    fn empty_states_render_empty_lists() {
        let mut view = HtmlView::new(None);
        view.no_matches("zzz");
        assert_eq!(
            view.to_html(),
            "<div class=\"apidex-results\" data-state=\"no-matches\">\n</div>\n"
        );

        view.clear();
        view.unavailable();
        assert!(view.to_html().contains("data-state=\"unavailable\""));
    }

    #[test]
    fn clear_discards_previous_results() {
        let mut view = HtmlView::new(None);
        let g = group();
        view.group(&g);
        view.item(&g, &g.items[0]);
        view.clear();
        assert_eq!(
            view.to_html(),
            "<div class=\"apidex-results\" data-state=\"empty\">\n</div>\n"
        );
    }

    #[test]
    fn relative_links_without_base() {
        let html = render_html(&[group()], None);
        assert!(html.contains("href=\"namespacepcpp.html#a7\""));
    }
}
