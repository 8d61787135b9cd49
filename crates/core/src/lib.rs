#![deny(missing_docs)]
//! carnet core: Liquid tags, metadata headers and Markdown reading.

/// Code fence tracking for the Liquid preprocessor.
pub mod code_fence;
/// Document reading (metadata, tags, Markdown).
pub mod document;
/// Core error types.
pub mod error;
/// Liquid tag expansion.
pub mod liquid;
/// Metadata header extraction.
pub mod metadata;
/// Slug generation.
pub mod slug;
/// Liquid tags and their registry.
pub mod tags;

pub use code_fence::{FenceTracker, fenced_ranges};
pub use document::{Document, read_document, render_markdown};
pub use error::{CarnetError, SourceLocation, TagError};
pub use liquid::expand_liquid_tags;
pub use metadata::{Metadata, MetadataError, MetadataExtraction, extract_metadata};
pub use slug::slugify;
pub use tags::{FigureTag, ImgTag, LiquidTag, TagAttributes, TagRegistry};
