//! Fenced code block tracking.
//!
//! Liquid tags written inside a fenced block are documentation, not
//! directives, so the preprocessor needs to know which byte ranges of a
//! document are fenced.

use std::ops::Range;

/// Line-by-line tracker for CommonMark fenced code blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FenceTracker {
    open: Option<OpenFence>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenFence {
    marker: char,
    length: usize,
}

impl FenceTracker {
    /// Creates a tracker positioned outside any fence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line and reports whether it belongs to a fence,
    /// opening and closing delimiter lines included.
    pub fn advance(&mut self, line: &str) -> bool {
        let (columns, bytes) = leading_indent(line);
        // 4+ columns is an indented code block, never a fence delimiter
        if columns > 3 {
            return self.open.is_some();
        }
        let rest = &line[bytes..];

        match self.open {
            None => {
                if let Some((marker, length)) = fence_run(rest) {
                    // Backtick info strings may not contain backticks
                    if marker == '`' && rest[length..].contains('`') {
                        return false;
                    }
                    self.open = Some(OpenFence { marker, length });
                    return true;
                }
                false
            }
            Some(open) => {
                if let Some((marker, length)) = fence_run(rest)
                    && marker == open.marker
                    && length >= open.length
                    && rest[length..].trim().is_empty()
                {
                    self.open = None;
                }
                true
            }
        }
    }
}

/// Byte ranges of `text` covered by fenced code blocks.
///
/// An unterminated fence runs to the end of the document.
pub fn fenced_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut tracker = FenceTracker::new();
    let mut offset = 0usize;

    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let content = line.trim_end_matches(['\n', '\r']);
        if !tracker.advance(content) {
            continue;
        }
        match ranges.last_mut() {
            Some(last) if last.end == start => last.end = offset,
            _ => ranges.push(start..offset),
        }
    }

    ranges
}

/// Returns (visual_columns, byte_offset) for leading whitespace.
/// Tabs advance to the next 4-column stop.
fn leading_indent(line: &str) -> (usize, usize) {
    let mut col = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => col += 1,
            b'\t' => col += 4 - (col % 4),
            _ => break,
        }
        bytes += 1;
    }
    (col, bytes)
}

fn fence_run(text: &str) -> Option<(char, usize)> {
    let first = text.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let length = text.chars().take_while(|c| *c == first).count();
    (length >= 3).then_some((first, length))
}
