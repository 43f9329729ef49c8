//! Substring matching over the catalog.

use crate::catalog::{Catalog, Document};

/// Queries shorter than this (in characters) match nothing.
pub const MIN_QUERY_CHARS: usize = 2;

/// Documents matched by one query, in catalog order.
///
/// Borrows from the catalog; it only lives for a single render cycle.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    query: String,
    documents: Vec<&'a Document>,
}

impl<'a> MatchResult<'a> {
    /// The normalized query that produced these documents.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn documents(&self) -> &[&'a Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Whether `query` is long enough to be worth matching.
pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

/// Filter the catalog by an already-normalized query.
///
/// A document is kept when the query is a substring of its lowercased title,
/// its lowercased description, or any of its keywords. Catalog order is kept;
/// there is no relevance re-sorting.
pub fn match_documents<'a>(catalog: &'a Catalog, query: &str) -> MatchResult<'a> {
    let documents = if is_searchable(query) {
        catalog
            .entries()
            .filter(|(doc, folded)| {
                folded.title.contains(query)
                    || folded.description.contains(query)
                    || doc.keywords.iter().any(|keyword| keyword.contains(query))
            })
            .map(|(doc, _)| doc)
            .collect()
    } else {
        Vec::new()
    };

    tracing::trace!("Query '{}' matched {} documents", query, documents.len());

    MatchResult {
        query: query.to_string(),
        documents,
    }
}
