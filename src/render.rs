//! The render boundary: everything the search core tells the UI.
//!
//! The core never reads display state; it only calls [`RenderBoundary`].
//! [`TerminalRenderer`] is the boundary used by the command-line front-end and
//! [`RecordingRenderer`] captures calls for embedders' tests.

use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

/// One hit as handed to the UI, with both displayed fields highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedResult {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// Consumed interface implemented by the surrounding UI.
pub trait RenderBoundary {
    /// Display a non-empty, ordered result list for `query`.
    fn show(&mut self, results: &[RenderedResult], query: &str);

    /// Display the explicit "no results for `query`" state.
    fn show_empty(&mut self, query: &str);

    /// Clear and hide the result panel.
    fn hide(&mut self);
}

/// A single call received by a boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    Show {
        query: String,
        results: Vec<RenderedResult>,
    },
    ShowEmpty {
        query: String,
    },
    Hide,
}

/// Keeps every call in order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&RenderEvent> {
        self.events.last()
    }

    pub fn take(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }
}

impl RenderBoundary for RecordingRenderer {
    fn show(&mut self, results: &[RenderedResult], query: &str) {
        self.events.push(RenderEvent::Show {
            query: query.to_string(),
            results: results.to_vec(),
        });
    }

    fn show_empty(&mut self, query: &str) {
        self.events.push(RenderEvent::ShowEmpty {
            query: query.to_string(),
        });
    }

    fn hide(&mut self) {
        self.events.push(RenderEvent::Hide);
    }
}

/// How [`TerminalRenderer`] prints events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Writes render events to any [`Write`] sink.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &RenderEvent) {
        let rendered = match self.format {
            OutputFormat::Text => format_text(event),
            OutputFormat::Json => match serde_json::to_string(event) {
                Ok(line) => line + "\n",
                Err(e) => {
                    tracing::warn!("Failed to serialize render event: {}", e);
                    return;
                }
            },
        };

        if let Err(e) = self
            .out
            .write_all(rendered.as_bytes())
            .and_then(|()| self.out.flush())
        {
            tracing::warn!("Failed to write results: {}", e);
        }
    }
}

impl<W: Write> RenderBoundary for TerminalRenderer<W> {
    fn show(&mut self, results: &[RenderedResult], query: &str) {
        self.emit(&RenderEvent::Show {
            query: query.to_string(),
            results: results.to_vec(),
        });
    }

    fn show_empty(&mut self, query: &str) {
        self.emit(&RenderEvent::ShowEmpty {
            query: query.to_string(),
        });
    }

    fn hide(&mut self) {
        self.emit(&RenderEvent::Hide);
    }
}

/// Format an event as a readable listing.
fn format_text(event: &RenderEvent) -> String {
    match event {
        RenderEvent::Show { query, results } => {
            let mut output = format!("Search results for '{}' ({}):\n\n", query, results.len());
            for (idx, result) in results.iter().enumerate() {
                // Writing to a String cannot fail.
                let _ = writeln!(output, "{}. {}  {}", idx + 1, result.title, result.url);
                if !result.description.is_empty() {
                    let _ = writeln!(output, "   {}", result.description);
                }
                output.push('\n');
            }
            output
        }
        RenderEvent::ShowEmpty { query } => format!("No results found for \"{}\"\n\n", query),
        RenderEvent::Hide => "(results hidden)\n\n".to_string(),
    }
}
