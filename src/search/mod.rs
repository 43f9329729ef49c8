//! Query pipeline: normalization, matching and highlighting.
//!
//! These are pure functions over an immutable [`Catalog`](crate::Catalog); the
//! timing of when they run is owned by [`SearchSession`](crate::SearchSession).

// Module declarations
pub(crate) mod highlight;
pub(crate) mod matcher;
pub(crate) mod normalize;

// Public re-exports (used via lib.rs)
pub use highlight::{HighlightMarker, Highlighter, highlight};
pub use matcher::{MIN_QUERY_CHARS, MatchResult, is_searchable, match_documents};
pub use normalize::{fold, normalize};
