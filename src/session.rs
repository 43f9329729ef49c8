//! Per-page search state machine.
//!
//! A [`SearchSession`] is fed raw input through [`on_query_changed`] and talks
//! to the UI only through a [`RenderBoundary`]. Searches run once typing
//! settles; an empty query hides results immediately without waiting.
//!
//! ```text
//!  Idle ──keystroke──▶ Pending ──timer──▶ Displaying
//!                       │  ▲                  │
//!                       └──┘ keystroke        │ dismissal
//!  any ──empty query──▶ Hidden ◀──────────────┘
//! ```
//!
//! [`on_query_changed`]: SearchSession::on_query_changed

use crate::catalog::Catalog;
use crate::config::SearchConfig;
use crate::debounce::{Debouncer, Scheduler};
use crate::render::{RenderBoundary, RenderedResult};
use crate::search::{Highlighter, is_searchable, match_documents, normalize};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing typed yet.
    Idle,
    /// Input changed; a search is waiting for typing to settle.
    Pending,
    /// Results (possibly the empty-result message) are on screen.
    Displaying,
    /// Results were cleared, either by an empty query or a dismissal.
    Hidden,
}

/// State shared between the session and its pending timer task.
struct Shared<R> {
    catalog: Rc<Catalog>,
    highlighter: Highlighter,
    renderer: RefCell<R>,
    state: Cell<SessionState>,
    searches: Cell<u64>,
}

impl<R: RenderBoundary> Shared<R> {
    /// Normalize, match, highlight, then render. Runs only for settled input.
    fn run_search(&self, raw: &str) {
        let query = normalize(raw);
        let matched = match_documents(&self.catalog, &query);
        self.searches.set(self.searches.get() + 1);

        tracing::debug!("Search '{}' returned {} results", query, matched.len());

        let mut renderer = self.renderer.borrow_mut();
        if matched.is_empty() {
            renderer.show_empty(raw);
        } else {
            let results: Vec<RenderedResult> = matched
                .documents()
                .iter()
                .map(|doc| RenderedResult {
                    title: self.highlighter.highlight(&doc.title, &query),
                    url: doc.url.clone(),
                    description: self.highlighter.highlight(&doc.description, &query),
                })
                .collect();
            renderer.show(&results, raw);
        }
        self.state.set(SessionState::Displaying);
    }
}

/// Live search for one page view.
pub struct SearchSession<S: Scheduler, R: RenderBoundary> {
    shared: Rc<Shared<R>>,
    debouncer: Debouncer<S>,
    delay: Duration,
    query: String,
}

impl<S: Scheduler, R: RenderBoundary> std::fmt::Debug for SearchSession<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("query", &self.query)
            .field("state", &self.shared.state.get())
            .field("delay", &self.delay)
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

impl<S: Scheduler, R: RenderBoundary + 'static> SearchSession<S, R> {
    /// Create a session with the default settle delay and `<mark>` highlighting.
    pub fn new(catalog: Rc<Catalog>, scheduler: S, renderer: R) -> Self {
        Self::with_config(catalog, scheduler, renderer, &SearchConfig::default())
    }

    pub fn with_config(
        catalog: Rc<Catalog>,
        scheduler: S,
        renderer: R,
        config: &SearchConfig,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                catalog,
                highlighter: config.highlighter(),
                renderer: RefCell::new(renderer),
                state: Cell::new(SessionState::Idle),
                searches: Cell::new(0),
            }),
            debouncer: Debouncer::new(scheduler),
            delay: config.settle_delay(),
            query: String::new(),
        }
    }

    /// Input boundary: call once per keystroke with the full field contents.
    ///
    /// A query that normalizes to fewer than two characters cancels any pending
    /// search and hides results right away. Anything else (re)arms the debounced
    /// search; only the last query of a burst is ever searched.
    pub fn on_query_changed(&mut self, raw: &str) {
        raw.clone_into(&mut self.query);

        if !is_searchable(&normalize(raw)) {
            self.debouncer.cancel();
            self.hide();
            return;
        }

        self.shared.state.set(SessionState::Pending);
        let shared = Rc::clone(&self.shared);
        let raw = raw.to_string();
        self.debouncer
            .schedule(move || shared.run_search(&raw), self.delay);
    }

    /// Dismissal boundary: hide results without touching the query.
    pub fn hide(&self) {
        self.shared.renderer.borrow_mut().hide();
        self.shared.state.set(SessionState::Hidden);
    }

    /// The raw text most recently received.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> SessionState {
        self.shared.state.get()
    }

    /// How many searches have actually run.
    pub fn searches_run(&self) -> u64 {
        self.shared.searches.get()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.shared.catalog
    }

    pub fn renderer(&self) -> Ref<'_, R> {
        self.shared.renderer.borrow()
    }

    pub fn renderer_mut(&self) -> RefMut<'_, R> {
        self.shared.renderer.borrow_mut()
    }
}
