//! `{% figure [class name(s)] [http[s]:/]/path/to/image [width [height]] [caption] %}`
//!
//! ```text
//! {% figure /images/ninja.png Ninja Attack! %}
//! <figure><img src="/images/ninja.png" alt="Ninja Attack!"><figcaption>Ninja Attack!</figcaption></figure>
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use super::{LiquidTag, TagAttributes, collect_groups};
use crate::error::TagError;

/// Expected syntax, reported when the markup cannot be parsed.
pub const FIGURE_SYNTAX: &str = r#"{% figure [class name(s)] [http[s]:/]/path/to/image [width [height]] [figure caption | "figure caption" ["alt text"]] %}"#;

// The class group swallows any leading text followed by whitespace, so a
// class name can only be recognized when it precedes the image path.
static FIGURE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<class>\S.*\s+)?(?P<src>(?:https?://|/|\S+/)\S+)(?:\s+(?P<width>\d+))?(?:\s+(?P<height>\d+))?(?P<caption>\s+.+)?",
    )
    .expect("figure pattern is valid")
});

const GROUPS: &[&str] = &["class", "src", "width", "height", "caption"];

/// The `figure` Liquid tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct FigureTag;

/// A parsed figure directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    /// `<img>` attributes: class, src, width, height, alt.
    pub attrs: TagAttributes,
    /// Caption text, also used as the alt text.
    pub caption: Option<String>,
}

impl Figure {
    /// Parses figure markup.
    pub fn parse(markup: &str) -> Result<Self, TagError> {
        let caps = FIGURE_PATTERN
            .captures(markup)
            .ok_or_else(|| TagError::unparsable("figure", FIGURE_SYNTAX))?;

        let mut attrs = collect_groups(&caps, GROUPS);
        let caption = attrs.remove("caption");
        if let Some(caption) = &caption {
            attrs.set("alt", caption);
        }

        Ok(Self { attrs, caption })
    }

    /// Renders the `<figure>` element.
    pub fn to_html(&self) -> String {
        let img = self.attrs.to_img_tag();
        match &self.caption {
            Some(caption) => format!("<figure>{img}<figcaption>{caption}</figcaption></figure>"),
            None => format!("<figure>{img}</figure>"),
        }
    }
}

impl LiquidTag for FigureTag {
    fn name(&self) -> &'static str {
        "figure"
    }

    fn render(&self, markup: &str) -> Result<String, TagError> {
        Figure::parse(markup).map(|figure| figure.to_html())
    }
}
