use thiserror::Error;

use crate::metadata::MetadataError;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors raised by a single Liquid tag invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The markup did not match the tag grammar at all.
    #[error("Error processing input. Expected syntax: {syntax}")]
    UnparsableDirective {
        /// Tag name (`figure`, `img`, ...)
        tag: String,
        /// Human readable syntax of the tag
        syntax: &'static str,
    },
}

impl TagError {
    /// Create an unparsable-directive error for `tag`.
    pub fn unparsable(tag: impl Into<String>, syntax: &'static str) -> Self {
        Self::UnparsableDirective {
            tag: tag.into(),
            syntax,
        }
    }
}

/// Errors that can occur while reading a content document.
#[derive(Debug, Error)]
pub enum CarnetError {
    /// A Liquid tag failed to render.
    #[error("Tag '{name}' failed at {location}: {source}")]
    Tag {
        /// Tag name
        name: String,
        /// Location of the opening `{%`
        location: SourceLocation,
        /// Underlying tag error
        #[source]
        source: TagError,
    },
    /// Metadata header could not be read.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    /// markdown-rs rejected the document.
    #[error("Markdown error at {location}: {message}")]
    Markdown {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
}

impl CarnetError {
    /// Create a tag error located at `line`.
    pub fn tag(name: impl Into<String>, line: usize, column: usize, source: TagError) -> Self {
        Self::Tag {
            name: name.into(),
            location: SourceLocation::new(line, column),
            source,
        }
    }

    /// Create a markdown error with location
    pub fn markdown(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Markdown {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_is_line_and_column() {
        assert_eq!(SourceLocation::new(3, 7).to_string(), "3:7");
    }

    #[test]
    fn markdown_error_reports_location() {
        let err = CarnetError::markdown("Unexpected end", 2, 5);
        assert_eq!(err.to_string(), "Markdown error at 2:5: Unexpected end");
    }

    #[test]
    fn unparsable_message_carries_syntax() {
        let err = TagError::unparsable("figure", "{% figure src %}");
        assert_eq!(
            err.to_string(),
            "Error processing input. Expected syntax: {% figure src %}"
        );
    }

    #[test]
    fn tag_error_reports_name_and_location() {
        let err = CarnetError::tag("img", 4, 1, TagError::unparsable("img", "{% img %}"));
        assert!(err.to_string().starts_with("Tag 'img' failed at 4:1"));
    }
}
