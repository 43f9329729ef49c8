//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `site`: a session over the built-in catalog driven by a virtual clock
//! - `catalog`: the built-in catalog on its own
//!
//! [`TempWorkspace`] provides a temp directory for tests that load catalog and
//! config files from disk.

use rstest::fixture;
use site_search::{Catalog, ManualScheduler, RecordingRenderer, RenderEvent, SearchSession};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

/// The settle delay sessions use by default.
#[allow(dead_code)] // Used across different integration test crates
pub const SETTLE: Duration = Duration::from_millis(300);

/// A temporary directory that is removed when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes a file and returns its full path.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn create_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(path);
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
        full_path
    }
}

/// A session wired to a virtual clock and a recording renderer.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct Site {
    pub clock: ManualScheduler,
    pub session: SearchSession<ManualScheduler, RecordingRenderer>,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl Site {
    pub fn with_catalog(catalog: Catalog) -> Self {
        let clock = ManualScheduler::new();
        let session =
            SearchSession::new(Rc::new(catalog), clock.clone(), RecordingRenderer::new());
        Self { clock, session }
    }

    /// Feed `text` one character at a time, `gap` apart, like a visitor typing.
    pub fn type_text(&mut self, text: &str, gap: Duration) {
        let mut typed = String::new();
        for ch in text.chars() {
            typed.push(ch);
            self.session.on_query_changed(&typed);
            self.clock.advance(gap);
        }
    }

    /// Let any pending search fire.
    pub fn settle(&self) {
        self.clock.advance(SETTLE);
    }

    /// Drain everything rendered so far.
    pub fn take_events(&self) -> Vec<RenderEvent> {
        self.session.renderer_mut().take()
    }

    /// Titles of the last `Show` event, markup included.
    pub fn shown_titles(&self) -> Vec<String> {
        match self.session.renderer().last() {
            Some(RenderEvent::Show { results, .. }) => {
                results.iter().map(|r| r.title.clone()).collect()
            }
            other => panic!("expected a Show event, got {:?}", other),
        }
    }
}

#[fixture]
#[allow(dead_code)] // Used across different integration test crates
pub fn catalog() -> Catalog {
    Catalog::builtin().expect("built-in catalog must be valid")
}

#[fixture]
#[allow(dead_code)] // Used across different integration test crates
pub fn site() -> Site {
    site_search::tracing::init(false);
    Site::with_catalog(catalog())
}
