//! Tunable search settings, loaded from TOML.

use crate::debounce::DEFAULT_SETTLE_DELAY;
use crate::error::ConfigError;
use crate::search::{HighlightMarker, Highlighter};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings for a [`SearchSession`](crate::SearchSession).
///
/// Every field has a default, so an empty file is a valid config:
///
/// ```toml
/// debounce_ms = 300
///
/// [highlight]
/// open = "<mark>"
/// close = "</mark>"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Settle time after the last keystroke before searching.
    pub debounce_ms: u64,
    /// Markup wrapped around matched text.
    pub highlight: HighlightMarker,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: u64::try_from(DEFAULT_SETTLE_DELAY.as_millis()).unwrap_or(300),
            highlight: HighlightMarker::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|source| ConfigError::Parse {
            what: "config".to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn highlighter(&self) -> Highlighter {
        Highlighter::new(self.highlight.clone())
    }
}
