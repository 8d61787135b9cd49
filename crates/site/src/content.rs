//! Content items produced by the generator and handed to hooks.

use carnet_core::{CarnetError, Metadata, TagRegistry, read_document, slugify};
use serde_json::Value as JsonValue;

/// Kind of a content object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Published article.
    Article,
    /// Unpublished article.
    Draft,
    /// Standalone page.
    Page,
    /// Anything else the generator tracks (static files, ...).
    Static,
}

impl ContentKind {
    /// Article-like kinds carry summaries and featured images.
    pub fn is_article_like(self) -> bool {
        matches!(self, Self::Article | Self::Draft | Self::Page)
    }

    fn label(self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::Draft => "Draft",
            Self::Page => "Page",
            Self::Static => "Static",
        }
    }
}

/// One content object. Hooks may only change the summary override and
/// `featured_image`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    kind: ContentKind,
    slug: String,
    metadata: Metadata,
    content: String,
    summary: Option<String>,
    /// Representative image, set by the representative-image hook.
    pub featured_image: Option<String>,
}

impl ContentItem {
    /// Creates an item from already rendered HTML.
    pub fn new(kind: ContentKind, metadata: Metadata, content: impl Into<String>) -> Self {
        let slug = derive_slug(&metadata);
        Self {
            kind,
            slug,
            metadata,
            content: content.into(),
            summary: None,
            featured_image: None,
        }
    }

    /// Reads a Markdown source: metadata header, Liquid tags, HTML body.
    pub fn from_source(
        kind: ContentKind,
        source: &str,
        tags: &TagRegistry,
    ) -> Result<Self, CarnetError> {
        let document = read_document(source, tags)?;
        Ok(Self::new(kind, document.metadata, document.html))
    }

    /// Sets an explicit summary, as an author-written summary would.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Kind of this item.
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// URL slug: `metadata.slug`, else the slugified title.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Header metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// A metadata value as a string, if it is one.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(JsonValue::as_str)
    }

    /// Rendered body HTML.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Effective summary: the override, else `metadata.summary`, else the body.
    ///
    /// The body is returned whole; truncating it to a summary length is left
    /// to the site generator.
    pub fn summary(&self) -> &str {
        self.summary
            .as_deref()
            .or_else(|| self.metadata_str("summary"))
            .unwrap_or(&self.content)
    }

    /// Replaces the effective summary.
    pub fn set_summary(&mut self, summary: String) {
        self.summary = Some(summary);
    }
}

impl std::fmt::Display for ContentItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} '{}'>", self.kind.label(), self.slug)
    }
}

fn derive_slug(metadata: &Metadata) -> String {
    if let Some(slug) = metadata.get("slug").and_then(JsonValue::as_str) {
        return slug.to_string();
    }
    metadata
        .get("title")
        .and_then(JsonValue::as_str)
        .map(slugify)
        .unwrap_or_default()
}
