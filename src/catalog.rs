//! The fixed set of searchable pages.
//!
//! A [`Catalog`] is validated once at construction and never mutated afterwards.
//! Replacing the site content means building a new catalog, not editing one.

use crate::error::{CatalogError, ConfigError};
use crate::search::fold;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One searchable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Display name shown in results.
    pub title: String,
    /// Destination path, unique within a catalog.
    pub url: String,
    /// One-line summary, may be empty.
    #[serde(default)]
    pub description: String,
    /// Lowercase tokens used only for matching.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Document {
    pub fn new<I, K>(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        keywords: I,
    ) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            title: title.into(),
            url: url.into(),
            description: description.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Lowercased copies of the displayed fields, computed once per document.
#[derive(Debug, Clone)]
pub(crate) struct FoldedFields {
    pub(crate) title: String,
    pub(crate) description: String,
}

/// Ordered, validated, read-only collection of documents.
///
/// Insertion order is significant: it is the order results are returned in.
#[derive(Debug, Clone)]
pub struct Catalog {
    documents: Vec<Document>,
    folded: Vec<FoldedFields>,
}

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "document", default)]
    documents: Vec<Document>,
}

impl Catalog {
    /// Build a catalog, rejecting empty titles, empty URLs and duplicate URLs.
    ///
    /// Keywords are lowercased and deduplicated (first occurrence wins).
    pub fn new(documents: impl IntoIterator<Item = Document>) -> Result<Self, CatalogError> {
        let mut documents: Vec<Document> = documents.into_iter().collect();
        let mut seen: AHashMap<String, usize> = AHashMap::with_capacity(documents.len());

        for (index, doc) in documents.iter_mut().enumerate() {
            if doc.url.trim().is_empty() {
                return Err(CatalogError::EmptyUrl {
                    index,
                    title: doc.title.clone(),
                });
            }
            if doc.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle {
                    index,
                    url: doc.url.clone(),
                });
            }
            if let Some(&first) = seen.get(&doc.url) {
                return Err(CatalogError::DuplicateUrl {
                    url: doc.url.clone(),
                    first,
                    second: index,
                });
            }
            seen.insert(doc.url.clone(), index);

            let mut keywords: Vec<String> = Vec::with_capacity(doc.keywords.len());
            for keyword in doc.keywords.drain(..) {
                let keyword = fold(&keyword);
                if !keywords.contains(&keyword) {
                    keywords.push(keyword);
                }
            }
            doc.keywords = keywords;
        }

        let folded = documents
            .iter()
            .map(|doc| FoldedFields {
                title: fold(&doc.title),
                description: fold(&doc.description),
            })
            .collect();

        tracing::debug!("Built catalog with {} documents", documents.len());

        Ok(Self { documents, folded })
    }

    /// The site's compiled-in catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(BUILTIN.iter().map(|(title, url, description, keywords)| {
            Document::new(*title, *url, *description, keywords.iter().copied())
        }))
    }

    /// Parse a catalog from TOML made of `[[document]]` tables.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(source).map_err(|source| ConfigError::Parse {
            what: "catalog".to_string(),
            source,
        })?;
        Ok(Self::new(file.documents)?)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&source)?;
        tracing::info!(
            "Loaded {} documents from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// All documents in catalog order.
    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Find a document by its URL.
    pub fn get(&self, url: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.url == url)
    }

    /// Documents paired with their lowercased fields, in catalog order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&Document, &FoldedFields)> {
        self.documents.iter().zip(self.folded.iter())
    }
}

type BuiltinEntry = (&'static str, &'static str, &'static str, &'static [&'static str]);

const BUILTIN: &[BuiltinEntry] = &[
    (
        "Home",
        "/",
        "OpenDLP-LK - Open-source Data Loss Prevention for Sri Lankan enterprises",
        &["home", "dlp", "data loss prevention", "pdpa", "sri lanka"],
    ),
    (
        "About",
        "/about.html",
        "Learn about OpenDLP-LK mission and community",
        &["about", "mission", "community", "contributors"],
    ),
    (
        "Getting Started",
        "/getting-started.html",
        "Quick start guide to implement DLP",
        &["getting started", "quick start", "guide", "tutorial"],
    ),
    (
        "Implementation Guide",
        "/implementation/",
        "5-phase DLP implementation roadmap",
        &["implementation", "guide", "phases", "roadmap"],
    ),
    (
        "Phase 1: Planning",
        "/implementation/phase1-planning.html",
        "Planning and assessment phase",
        &["planning", "assessment", "stakeholders", "gap analysis"],
    ),
    (
        "Phase 2: Discovery",
        "/implementation/phase2-discovery.html",
        "Data discovery and classification",
        &["discovery", "classification", "data inventory", "sensitive data"],
    ),
    (
        "Phase 3: Policy",
        "/implementation/phase3-policy.html",
        "Policy development and controls",
        &["policy", "controls", "rules", "procedures"],
    ),
    (
        "Phase 4: Pilot",
        "/implementation/phase4-pilot.html",
        "Pilot deployment and rollout",
        &["pilot", "rollout", "deployment", "testing"],
    ),
    (
        "Phase 5: Monitoring",
        "/implementation/phase5-monitoring.html",
        "Continuous monitoring and improvement",
        &["monitoring", "continuous", "improvement", "maintenance"],
    ),
    (
        "Implementation Checklist",
        "/implementation/checklist.html",
        "Complete task-by-task checklist",
        &["checklist", "tasks", "todo", "implementation"],
    ),
    (
        "PDPA Compliance",
        "/pdpa-compliance/",
        "Sri Lankan PDPA compliance guide",
        &["pdpa", "compliance", "regulations", "legal", "sri lanka"],
    ),
    (
        "Resources",
        "/resources/",
        "Templates, patterns, tools and guides",
        &["resources", "templates", "tools", "patterns", "downloads"],
    ),
    (
        "Data Champions Program",
        "/data-champions/",
        "Train department leaders in data protection",
        &["champions", "training", "certification", "leaders"],
    ),
    (
        "Community",
        "/community/",
        "Join the OpenDLP-LK community",
        &["community", "contribute", "discussions", "events"],
    ),
];
