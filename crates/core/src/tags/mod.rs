//! Liquid-style tags (`{% name markup %}`) and their registry.
//!
//! - `figure`: an `<img>` wrapped in `<figure>` with an optional `<figcaption>`.
//! - `img`: a bare `<img>` with optional title and alt text.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::error::TagError;

/// Figure tag.
pub mod figure;
/// Image tag.
pub mod img;

pub use figure::FigureTag;
pub use img::ImgTag;

/// A tag that turns its markup into an HTML fragment.
pub trait LiquidTag {
    /// Name used inside `{% ... %}`.
    fn name(&self) -> &'static str;

    /// Renders `markup` (the text after the tag name, trimmed).
    fn render(&self, markup: &str) -> Result<String, TagError>;
}

/// Tags available to the Liquid preprocessor, keyed by name.
#[derive(Default)]
pub struct TagRegistry {
    tags: HashMap<&'static str, Box<dyn LiquidTag>>,
}

impl TagRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `figure` and `img`.
    pub fn with_builtin_tags() -> Self {
        let mut registry = Self::new();
        registry.register(FigureTag);
        registry.register(ImgTag);
        registry
    }

    /// Registers a tag, replacing any tag with the same name.
    pub fn register<T: LiquidTag + 'static>(&mut self, tag: T) {
        self.tags.insert(tag.name(), Box::new(tag));
    }

    /// Looks up a tag by name.
    pub fn get(&self, name: &str) -> Option<&dyn LiquidTag> {
        self.tags.get(name).map(|tag| tag.as_ref())
    }

    /// Returns true if no tag is registered.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Registered tag names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tags.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tags", &self.names())
            .finish()
    }
}

/// Insertion-ordered `<img>` attributes collected from a tag's markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAttributes {
    entries: Vec<(&'static str, String)>,
}

impl TagAttributes {
    /// Creates an empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, trimming the value. Empty values are ignored.
    ///
    /// An existing key keeps its position.
    pub fn set(&mut self, key: &'static str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.entries.push((key, value.to_string())),
        }
    }

    /// Returns the value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Renders `<img key="value" ...>`. Values are not escaped.
    pub fn to_img_tag(&self) -> String {
        let mut tag = String::from("<img");
        for (key, value) in self.iter() {
            write!(tag, " {}=\"{}\"", key, value).ok();
        }
        tag.push('>');
        tag
    }
}

/// Collects the named groups of an image-tag match, in pattern order.
fn collect_groups(caps: &regex::Captures<'_>, names: &[&'static str]) -> TagAttributes {
    let mut attrs = TagAttributes::new();
    for &name in names {
        if let Some(m) = caps.name(name) {
            attrs.set(name, m.as_str());
        }
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_has_figure_and_img() {
        let registry = TagRegistry::with_builtin_tags();
        assert_eq!(registry.names(), vec!["figure", "img"]);
        assert!(registry.get("figure").is_some());
        assert!(registry.get("video").is_none());
    }

    #[test]
    fn register_replaces_same_name() {
        struct Loud;
        impl LiquidTag for Loud {
            fn name(&self) -> &'static str {
                "figure"
            }
            fn render(&self, markup: &str) -> Result<String, TagError> {
                Ok(markup.to_uppercase())
            }
        }

        let mut registry = TagRegistry::with_builtin_tags();
        registry.register(Loud);
        let tag = registry.get("figure").unwrap();
        assert_eq!(tag.render("abc").unwrap(), "ABC");
    }

    #[test]
    fn attributes_keep_order_and_skip_blanks() {
        let mut attrs = TagAttributes::new();
        attrs.set("src", " /a.png ");
        attrs.set("width", "   ");
        attrs.set("alt", "A");
        attrs.set("src", "/b.png");
        assert_eq!(attrs.to_img_tag(), r#"<img src="/b.png" alt="A">"#);
        assert_eq!(attrs.remove("alt").as_deref(), Some("A"));
        assert_eq!(attrs.get("alt"), None);
    }
}
