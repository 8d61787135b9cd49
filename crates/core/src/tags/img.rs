//! `{% img [class name(s)] [http[s]:/]/path/to/image [width [height]] [title text | "title text" ["alt text"]] %}`

use once_cell::sync::Lazy;
use regex::Regex;

use super::{LiquidTag, TagAttributes, collect_groups};
use crate::error::TagError;

/// Expected syntax, reported when the markup cannot be parsed.
pub const IMG_SYNTAX: &str = r#"{% img [class name(s)] [http[s]:/]/path/to/image [width [height]] [title text | "title text" ["alt text"]] %}"#;

static IMG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<class>\S.*\s+)?(?P<src>(?:https?://|/|\S+/)\S+)(?:\s+(?P<width>\d+))?(?:\s+(?P<height>\d+))?(?P<title>\s+.+)?",
    )
    .expect("img pattern is valid")
});

static TITLE_ALT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:"|')(?P<title>[^"']+)?(?:"|')\s+(?:"|')(?P<alt>[^"']+)?(?:"|')"#)
        .expect("title/alt pattern is valid")
});

const GROUPS: &[&str] = &["class", "src", "width", "height", "title"];

/// The `img` Liquid tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImgTag;

/// Parses `img` markup into ordered attributes: class, src, width, height, title, alt.
pub fn parse_img(markup: &str) -> Result<TagAttributes, TagError> {
    let caps = IMG_PATTERN
        .captures(markup)
        .ok_or_else(|| TagError::unparsable("img", IMG_SYNTAX))?;
    let mut attrs = collect_groups(&caps, GROUPS);

    if let Some(title) = attrs.get("title").map(str::to_owned) {
        if let Some(quoted) = TITLE_ALT_PATTERN.captures(&title) {
            attrs.remove("title");
            // Keep title ahead of alt when both quoted parts are present.
            if let Some(t) = quoted.name("title") {
                attrs.set("title", t.as_str());
            }
            if let Some(a) = quoted.name("alt") {
                attrs.set("alt", a.as_str());
            }
        }
        if attrs.get("alt").is_none()
            && let Some(title) = attrs.get("title").map(str::to_owned)
        {
            attrs.set("alt", &title);
        }
    }

    Ok(attrs)
}

impl LiquidTag for ImgTag {
    fn name(&self) -> &'static str {
        "img"
    }

    fn render(&self, markup: &str) -> Result<String, TagError> {
        parse_img(markup).map(|attrs| attrs.to_img_tag())
    }
}
