//! Reading a Markdown content document into metadata and HTML.

use markdown::message::{Message, Place};

use crate::error::CarnetError;
use crate::liquid::expand_liquid_tags;
use crate::metadata::{Metadata, extract_metadata};
use crate::tags::TagRegistry;

/// A content document after metadata extraction and rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Header metadata (keys as written for YAML, lowercased for `Key: value`).
    pub metadata: Metadata,
    /// Rendered body HTML.
    pub html: String,
}

/// Extracts metadata, expands Liquid tags and renders the body to HTML.
pub fn read_document(source: &str, registry: &TagRegistry) -> Result<Document, CarnetError> {
    let extraction = extract_metadata(source)?;
    let body = &source[extraction.body_start..];
    let expanded = expand_liquid_tags(body, registry)?;
    let html = render_markdown(&expanded)?;

    Ok(Document {
        metadata: extraction.metadata,
        html,
    })
}

/// Renders GitHub-flavored Markdown to HTML, passing raw HTML through.
///
/// Tag output is raw HTML, so it must survive compilation untouched.
pub fn render_markdown(input: &str) -> Result<String, CarnetError> {
    let options = markdown::Options {
        parse: markdown::ParseOptions::gfm(),
        compile: markdown::CompileOptions {
            allow_dangerous_html: true,
            ..markdown::CompileOptions::gfm()
        },
    };

    markdown::to_html_with_options(input, &options).map_err(|err| {
        let (line, column) = message_location(&err);
        CarnetError::markdown(err.to_string(), line, column)
    })
}

/// (line, column) of a markdown-rs message, 1-indexed.
fn message_location(message: &Message) -> (usize, usize) {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => (point.line, point.column),
            Place::Position(position) => (position.start.line, position.start.column),
        },
        None => (1, 1),
    }
}
