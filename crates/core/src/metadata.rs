//! Metadata headers at the top of a content document.
//!
//! Two header styles are accepted: a YAML block fenced by `---` lines, or
//! Pelican-style `Key: value` lines ending at the first blank line.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// String-keyed metadata of a content document.
pub type Metadata = Map<String, JsonValue>;

static HEADER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ ]{0,3}(?P<key>[A-Za-z0-9_-]+):\s*(?P<value>.*)$")
        .expect("header line pattern is valid")
});

/// Result of splitting a document into metadata and body.
#[derive(Debug, Default)]
pub struct MetadataExtraction {
    /// Parsed metadata; empty when the document has no header.
    pub metadata: Metadata,
    /// Byte offset inside the original document where the body begins.
    pub body_start: usize,
}

/// Errors emitted while reading a metadata header.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Unclosed YAML fence (e.g., missing terminating `---`).
    #[error("Unterminated YAML metadata block: expected closing '---'")]
    Unterminated,
    /// YAML failed to parse.
    #[error("Metadata parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Metadata must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Splits `input` into its metadata header and body offset.
pub fn extract_metadata(input: &str) -> Result<MetadataExtraction, MetadataError> {
    let (text, bom_len) = match input.strip_prefix('\u{feff}') {
        Some(stripped) => (stripped, '\u{feff}'.len_utf8()),
        None => (input, 0),
    };

    let mut extraction = match yaml_block(text)? {
        Some((block, body_start)) => MetadataExtraction {
            metadata: parse_yaml(block)?,
            body_start,
        },
        None => header_lines(text),
    };
    if extraction.body_start > 0 {
        extraction.body_start += bom_len;
    }
    Ok(extraction)
}

fn parse_yaml(block: &str) -> Result<Metadata, MetadataError> {
    if block.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| MetadataError::Parse(err.to_string()))?;
    match serde_json::to_value(yaml).map_err(|err| MetadataError::Parse(err.to_string()))? {
        JsonValue::Null => Ok(Metadata::new()),
        JsonValue::Object(map) => Ok(map),
        _ => Err(MetadataError::InvalidRootType),
    }
}

/// Locates a `---` fenced block preceded only by blank lines.
fn yaml_block(text: &str) -> Result<Option<(&str, usize)>, MetadataError> {
    let mut lines = lines_with_offsets(text).skip_while(|(_, line, _)| line.trim().is_empty());

    let Some((_, first, block_start)) = lines.next() else {
        return Ok(None);
    };
    if first.trim_end() != "---" {
        return Ok(None);
    }

    for (start, line, next) in lines {
        if line.trim_end() == "---" {
            let block = text[block_start..start].trim_end_matches(['\r', '\n']);
            return Ok(Some((block, next)));
        }
    }
    Err(MetadataError::Unterminated)
}

fn header_lines(text: &str) -> MetadataExtraction {
    let mut metadata = Metadata::new();
    let mut last_key: Option<String> = None;
    let mut body_start = 0usize;

    for (start, line, next) in lines_with_offsets(text) {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if last_key.is_some() {
                body_start = next;
            }
            break;
        }

        if let Some(caps) = HEADER_LINE.captures(line) {
            let key = caps["key"].to_lowercase();
            metadata.insert(key.clone(), JsonValue::String(caps["value"].trim().to_string()));
            last_key = Some(key);
            body_start = next;
            continue;
        }

        // Continuation lines are indented by four or more spaces.
        if line.starts_with("    ")
            && let Some(key) = &last_key
            && let Some(JsonValue::String(value)) = metadata.get_mut(key)
        {
            value.push(' ');
            value.push_str(line.trim());
            body_start = next;
            continue;
        }

        body_start = start;
        break;
    }

    if last_key.is_none() {
        body_start = 0;
    }
    MetadataExtraction {
        metadata,
        body_start,
    }
}

/// Yields (line_start, line_without_newline, next_line_start).
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str, usize)> {
    let mut offset = 0usize;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        (start, raw.trim_end_matches('\n'), offset)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(input: &str) -> MetadataExtraction {
        extract_metadata(input).expect("metadata extraction should succeed")
    }

    #[test]
    fn returns_empty_when_no_header() {
        let result = extract("# Title\nBody");
        assert_eq!(result.body_start, 0);
        assert!(result.metadata.is_empty());
    }

    #[test]
    fn parses_yaml_block() {
        let input = "---\ntitle: Lisbonne\nimage: /images/lisbonne.jpg\n---\nBody";
        let result = extract(input);
        assert_eq!(result.body_start, input.find("Body").unwrap());
        assert_eq!(
            result.metadata.get("image").and_then(JsonValue::as_str),
            Some("/images/lisbonne.jpg")
        );
    }

    #[test]
    fn parses_pelican_header_lines() {
        let input = "Title: Porto\nDate: 2019-05-02\nImage: /images/porto.jpg\n\nBody";
        let result = extract(input);
        assert_eq!(result.body_start, input.find("Body").unwrap());
        assert_eq!(
            result.metadata.get("title").and_then(JsonValue::as_str),
            Some("Porto")
        );
        assert_eq!(
            result.metadata.get("image").and_then(JsonValue::as_str),
            Some("/images/porto.jpg")
        );
    }

    #[test]
    fn header_continuation_lines_are_joined() {
        let input = "Summary: Une longue\n    journée\n\nBody";
        let result = extract(input);
        assert_eq!(
            result.metadata.get("summary").and_then(JsonValue::as_str),
            Some("Une longue journée")
        );
    }

    #[test]
    fn header_stops_at_non_header_line() {
        let input = "Title: Sintra\nPlain paragraph";
        let result = extract(input);
        assert_eq!(result.metadata.len(), 1);
        assert_eq!(&input[result.body_start..], "Plain paragraph");
    }

    #[test]
    fn empty_yaml_block_is_empty_metadata() {
        let input = "---\n---\n# Body";
        let result = extract(input);
        assert!(result.metadata.is_empty());
        assert_eq!(result.body_start, input.find("# Body").unwrap());
    }

    #[test]
    fn bom_is_skipped() {
        let input = "\u{feff}---\nfoo: bar\n---\nBody";
        let result = extract(input);
        assert_eq!(result.body_start, input.find("Body").unwrap());
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let err = extract_metadata("---\ninvalid: [unterminated\n---\n").unwrap_err();
        assert!(matches!(err, MetadataError::Parse(_)), "{err:?}");
    }

    #[test]
    fn errors_on_unterminated_block() {
        let err = extract_metadata("---\ntitle: test").unwrap_err();
        assert!(matches!(err, MetadataError::Unterminated));
    }

    #[test]
    fn errors_on_sequence_root() {
        let err = extract_metadata("---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, MetadataError::InvalidRootType));
    }
}
