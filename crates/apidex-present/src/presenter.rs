//! The presenter: debounced input in, rendered groups out, selections to navigation.

use std::time::{Duration, Instant};

use apidex_config::Config;
use apidex_index::{Location, SearchOptions, SymbolError};
use tracing::debug;

use crate::{
    debounce::{Debouncer, RequestId, SearchRequest},
    error::SelectError,
    groups::{ResultGroup, collect_groups},
    handle::IndexHandle,
    view::{Navigator, ResultView},
};

/// What a presentation pass did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Rendered this many result groups.
    Rendered(usize),
    /// The query matched nothing.
    NoMatches,
    /// There is no index to search.
    Unavailable,
    /// A newer input arrived first; the view was left alone.
    Stale,
    /// The query was empty; the view was cleared.
    Empty,
}

/// Settings a presenter runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenterOptions {
    /// Search cap and kind filter.
    pub search: SearchOptions,
    /// Quiet period between the last keystroke and the search.
    pub debounce: Duration,
}

impl Default for PresenterOptions {
    fn default() -> Self {
        Self {
            search: SearchOptions::default(),
            debounce: Duration::from_millis(200),
        }
    }
}

impl PresenterOptions {
    /// Reads `[search]` and `[presenter]` settings.
    ///
    /// `debounce_ms` only matters to hosts that feed keystrokes through
    /// [`Presenter::input`]; one-shot callers go through [`Presenter::submit_now`].
    pub fn from_config(config: &Config) -> Result<Self, SymbolError> {
        Ok(Self {
            search: SearchOptions::from_settings(&config.search)?,
            debounce: Duration::from_millis(config.presenter.debounce_ms),
        })
    }
}

/// One keystroke: the full query text after the edit, and when it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    /// Query text.
    pub query: String,
    /// Event time.
    pub at: Instant,
}

/// Drives a [`ResultView`] from user input.
#[derive(Debug)]
pub struct Presenter<V, N> {
    /// Rendering surface.
    view: V,
    /// Navigation hook.
    navigator: N,
    /// Index being searched.
    handle: IndexHandle,
    /// Keystroke debouncer.
    debouncer: Debouncer,
    /// Search cap and filter.
    search: SearchOptions,
    /// Groups currently on the view, for selection.
    shown: Vec<ResultGroup>,
}

impl<V: ResultView, N: Navigator> Presenter<V, N> {
    /// Creates a presenter over a view, a navigator, and an index.
    pub fn new(view: V, navigator: N, handle: IndexHandle, options: PresenterOptions) -> Self {
        Self {
            view,
            navigator,
            handle,
            debouncer: Debouncer::new(options.debounce),
            search: options.search,
            shown: Vec::new(),
        }
    }

    /// Records a keystroke. The search runs once [`tick`](Self::tick) passes its deadline.
    pub fn input(&mut self, query: impl Into<String>, now: Instant) -> RequestId {
        self.debouncer.on_input(query, now)
    }

    /// Presents the pending request if it is due.
    pub fn tick(&mut self, now: Instant) -> Option<Presentation> {
        let request = self.debouncer.poll(now)?;
        Some(self.present(&request))
    }

    /// When the next [`tick`](Self::tick) can do work.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Searches and renders, unless a newer input has arrived since `request`.
    pub fn present(&mut self, request: &SearchRequest) -> Presentation {
        if !self.debouncer.is_latest(request.id) {
            debug!(query = %request.query, "dropping stale search");
            return Presentation::Stale;
        }

        self.view.clear();
        self.shown.clear();

        if request.query.is_empty() {
            return Presentation::Empty;
        }
        let Some(index) = self.handle.index() else {
            self.view.unavailable();
            return Presentation::Unavailable;
        };

        let groups = collect_groups(index.search_with(&request.query, &self.search));
        if groups.is_empty() {
            self.view.no_matches(&request.query);
            return Presentation::NoMatches;
        }
        for group in &groups {
            self.view.group(group);
            for item in &group.items {
                self.view.item(group, item);
            }
        }
        self.shown = groups;
        Presentation::Rendered(self.shown.len())
    }

    /// Searches immediately, bypassing the quiet period (e.g. on Enter).
    pub fn submit_now(&mut self, query: impl Into<String>, now: Instant) -> Presentation {
        self.input(query, now);
        match self.debouncer.flush() {
            Some(request) => self.present(&request),
            None => Presentation::Stale,
        }
    }

    /// Replays a keystroke stream in time order, then flushes the last pending input.
    ///
    /// Returns every presentation that ran, in order.
    pub fn run<I: IntoIterator<Item = InputEvent>>(&mut self, events: I) -> Vec<Presentation> {
        let mut presentations = Vec::new();
        for event in events {
            presentations.extend(self.tick(event.at));
            self.input(event.query, event.at);
        }
        if let Some(request) = self.debouncer.flush() {
            presentations.push(self.present(&request));
        }
        presentations
    }

    /// Swaps in a new index. Rendered results are kept until the next presentation.
    pub fn replace_index(&mut self, handle: IndexHandle) {
        self.handle = handle;
    }

    /// Resolves a rendered item and hands its location to the navigator.
    pub fn select(&mut self, group: usize, item: usize) -> Result<Location, SelectError> {
        let location = self.resolve(group, item)?.clone();
        self.navigator.navigate(&location);
        Ok(location)
    }

    /// Looks up a rendered item's location without navigating.
    pub fn resolve(&self, group: usize, item: usize) -> Result<&Location, SelectError> {
        let shown = self.shown.get(group).ok_or(SelectError::NoSuchGroup {
            group,
            available: self.shown.len(),
        })?;
        let target = shown.items.get(item).ok_or_else(|| SelectError::NoSuchItem {
            display_key: shown.display_key.clone(),
            item,
            available: shown.items.len(),
        })?;
        Ok(&target.location)
    }

    /// Groups currently rendered.
    pub fn results(&self) -> &[ResultGroup] {
        &self.shown
    }

    /// The index being searched.
    pub fn handle(&self) -> &IndexHandle {
        &self.handle
    }

    /// The rendering surface.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The rendering surface, mutably, for host-side view state.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The navigation hook.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Consumes the presenter, returning the view and navigator.
    pub fn into_parts(self) -> (V, N) {
        (self.view, self.navigator)
    }
}
