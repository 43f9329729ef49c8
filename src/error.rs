//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for site-search operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods in the loaders and the binary.
pub type Result<T> = anyhow::Result<T>;

/// A catalog that violates its construction invariants.
///
/// These are configuration errors: a catalog that fails validation must never
/// be used to serve searches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A document has an empty (or whitespace-only) title.
    #[error("document #{index} ({url}) has an empty title")]
    EmptyTitle { index: usize, url: String },
    /// A document has an empty (or whitespace-only) URL.
    #[error("document #{index} ('{title}') has an empty url")]
    EmptyUrl { index: usize, title: String },
    /// Two documents share the same URL.
    #[error("documents #{first} and #{second} share the url '{url}'")]
    DuplicateUrl {
        url: String,
        first: usize,
        second: usize,
    },
}

/// Error returned when loading a catalog or config file fails.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or does not match the expected shape.
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: toml::de::Error,
    },
    /// The file parsed but describes an invalid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
