//! Client-side search for a small, hand-curated documentation catalog.
//!
//! As a visitor types, a [`SearchSession`] waits for input to settle, filters
//! the [`Catalog`] by substring, highlights the hits and hands them to a
//! [`RenderBoundary`]. The clock is injected through [`Scheduler`], so the whole
//! pipeline runs deterministically under test with a [`ManualScheduler`].
//!
//! ```
//! use site_search::{Catalog, ManualScheduler, RecordingRenderer, RenderEvent, SearchSession};
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let clock = ManualScheduler::new();
//! let catalog = Rc::new(Catalog::builtin().unwrap());
//! let mut session = SearchSession::new(catalog, clock.clone(), RecordingRenderer::new());
//!
//! session.on_query_changed("zz");
//! session.on_query_changed("zzz");
//! clock.advance(Duration::from_millis(300));
//!
//! assert_eq!(session.searches_run(), 1);
//! assert_eq!(
//!     session.renderer().last(),
//!     Some(&RenderEvent::ShowEmpty { query: "zzz".to_string() })
//! );
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod error;
pub mod render;
pub mod search;
pub mod session;
pub mod tracing;

pub use catalog::{Catalog, Document};
pub use config::SearchConfig;
pub use debounce::{
    DEFAULT_SETTLE_DELAY, Debouncer, ManualHandle, ManualScheduler, Scheduler, Task,
    TokioScheduler,
};
pub use error::{CatalogError, ConfigError};
pub use render::{
    OutputFormat, RecordingRenderer, RenderBoundary, RenderEvent, RenderedResult,
    TerminalRenderer,
};
pub use search::{
    HighlightMarker, Highlighter, MIN_QUERY_CHARS, MatchResult, highlight, is_searchable,
    fold, match_documents, normalize,
};
pub use session::{SearchSession, SessionState};
