//! Host seams: the rendering surface and the navigation hook.

use apidex_index::Location;

use crate::groups::{ResultGroup, ResultItem};

/// A surface results are rendered onto.
///
/// The presenter always calls [`clear`](ResultView::clear) first, then either one
/// `group`/`item` run per result group, [`no_matches`](ResultView::no_matches), or
/// [`unavailable`](ResultView::unavailable).
pub trait ResultView {
    /// Removes everything previously rendered.
    fn clear(&mut self);

    /// Renders a group header.
    fn group(&mut self, group: &ResultGroup);

    /// Renders one symbol under the most recent group header.
    fn item(&mut self, group: &ResultGroup, item: &ResultItem);

    /// Renders the empty state for a query that matched nothing.
    fn no_matches(&mut self, query: &str);

    /// Renders the empty state for a missing or unreadable index.
    fn unavailable(&mut self);
}

/// The host's navigation mechanism.
pub trait Navigator {
    /// Navigates to a page anchor.
    fn navigate(&mut self, location: &Location);
}

/// A navigator that records every location it is handed, most recent last.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    /// Locations in navigation order.
    pub visited: Vec<Location>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, location: &Location) {
        self.visited.push(location.clone());
    }
}
