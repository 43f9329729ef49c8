//! Case-insensitive literal highlighting.
//!
//! The query is never compiled into a pattern: occurrences are found with a plain
//! substring scan over a case-folded copy of the text, then mapped back onto the
//! original characters so the output keeps the text's own casing.

use super::normalize::fold;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Markup placed around each highlighted occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightMarker {
    pub open: String,
    pub close: String,
}

impl Default for HighlightMarker {
    fn default() -> Self {
        Self {
            open: "<mark>".to_string(),
            close: "</mark>".to_string(),
        }
    }
}

/// Wraps query occurrences in a [`HighlightMarker`].
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    marker: HighlightMarker,
}

impl Highlighter {
    pub fn new(marker: HighlightMarker) -> Self {
        Self { marker }
    }

    pub fn marker(&self) -> &HighlightMarker {
        &self.marker
    }

    /// Wrap every non-overlapping, case-insensitive occurrence of `query` in `text`.
    ///
    /// Text outside the matches is copied verbatim. An empty query, or one that
    /// does not occur, returns `text` unchanged.
    pub fn highlight(&self, text: &str, query: &str) -> String {
        let ranges = find_occurrences(text, query);
        if ranges.is_empty() {
            return text.to_string();
        }

        let extra = ranges.len() * (self.marker.open.len() + self.marker.close.len());
        let mut output = String::with_capacity(text.len() + extra);
        let mut cursor = 0;
        for range in ranges {
            output.push_str(&text[cursor..range.start]);
            output.push_str(&self.marker.open);
            output.push_str(&text[range.clone()]);
            output.push_str(&self.marker.close);
            cursor = range.end;
        }
        output.push_str(&text[cursor..]);
        output
    }
}

/// Highlight with the default `<mark>` marker.
pub fn highlight(text: &str, query: &str) -> String {
    Highlighter::default().highlight(text, query)
}

/// Byte ranges of `text` covering each occurrence of `query`, left to right.
///
/// Folding is per character, so a character whose lowercase form is longer
/// (`İ` -> `i̇`) still maps back to exactly one original character. A match that
/// starts or ends inside such an expansion is widened to the whole character.
pub(crate) fn find_occurrences(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle = fold(query);
    if needle.is_empty() {
        return Vec::new();
    }

    // (offset in folded, original byte range)
    let mut spans: Vec<(usize, Range<usize>)> = Vec::with_capacity(text.len());
    let mut folded = String::with_capacity(text.len());
    for (start, ch) in text.char_indices() {
        spans.push((folded.len(), start..start + ch.len_utf8()));
        folded.extend(ch.to_lowercase());
    }

    // Index of the original character that produced the folded byte at `pos`.
    let span_containing =
        |pos: usize| spans.partition_point(|(offset, _)| *offset <= pos) - 1;

    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut last_end = 0;
    for (pos, matched) in folded.match_indices(needle.as_str()) {
        let start = spans[span_containing(pos)].1.start;
        let end = spans[span_containing(pos + matched.len() - 1)].1.end;
        if start < last_end {
            continue;
        }
        ranges.push(start..end);
        last_end = end;
    }
    ranges
}
