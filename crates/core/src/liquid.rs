//! Liquid tag expansion for Markdown sources.
//!
//! Every `{% name markup %}` span is handed to the tag registered under
//! `name` and replaced by the returned HTML. Unknown tags, and spans that
//! start inside a fenced code block, are copied through unchanged.

use std::borrow::Cow;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::code_fence::fenced_ranges;
use crate::error::CarnetError;
use crate::tags::TagRegistry;

static LIQUID_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{%.*?%\}").expect("liquid tag pattern is valid"));

/// Expands registered Liquid tags in `input`.
///
/// Returns the input unchanged (borrowed) when nothing was expanded. The
/// first failing tag aborts the expansion with its name and position.
pub fn expand_liquid_tags<'a>(
    input: &'a str,
    registry: &TagRegistry,
) -> Result<Cow<'a, str>, CarnetError> {
    if registry.is_empty() || !input.contains("{%") {
        return Ok(Cow::Borrowed(input));
    }

    let fenced = fenced_ranges(input);
    let mut output = String::with_capacity(input.len());
    let mut copied_up_to = 0usize;
    let mut expanded = 0usize;

    for m in LIQUID_TAG.find_iter(input) {
        if in_ranges(&fenced, m.start()) {
            continue;
        }
        let inner = &m.as_str()[2..m.as_str().len() - 2];
        let Some((name, markup)) = split_tag(inner) else {
            continue;
        };
        let Some(tag) = registry.get(name) else {
            log::debug!("Leaving unknown liquid tag '{}' untouched", name);
            continue;
        };

        let html = tag.render(markup).map_err(|err| {
            let (line, column) = line_column(input, m.start());
            CarnetError::tag(name, line, column, err)
        })?;

        output.push_str(&input[copied_up_to..m.start()]);
        output.push_str(&html);
        copied_up_to = m.end();
        expanded += 1;
    }

    if expanded == 0 {
        return Ok(Cow::Borrowed(input));
    }
    output.push_str(&input[copied_up_to..]);
    Ok(Cow::Owned(output))
}

/// Splits `  figure left /a.png  ` into (`figure`, `left /a.png`).
fn split_tag(inner: &str) -> Option<(&str, &str)> {
    let trimmed = inner.trim_start();
    let name_end = trimmed
        .find(char::is_whitespace)
        .unwrap_or(trimmed.len());
    if name_end == 0 {
        return None;
    }
    Some((&trimmed[..name_end], trimmed[name_end..].trim()))
}

fn in_ranges(ranges: &[Range<usize>], offset: usize) -> bool {
    ranges.iter().any(|r| r.contains(&offset))
}

/// 1-indexed line and column (in chars) of a byte offset.
fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let before = &input[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count() + 1)
}
