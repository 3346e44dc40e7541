//! Lightweight segment splitting for single-pass resolution.

use crate::expr::{is_accessor_trigger, is_separator};

/// Splits raw path text into trimmed segments without building an expression.
///
/// Splitting stops at the first accessor trigger. Segments are trimmed and may
/// be empty (for repeated or trailing separators); callers treat empty
/// segments as no-ops.
///
/// # Examples
///
/// ```
/// use nodepath::expr::RawSegments;
///
/// let segments = RawSegments::new("/a/ b //c@Title");
/// assert!(segments.is_rooted());
/// assert_eq!(segments.collect::<Vec<_>>(), ["a", "b", "", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct RawSegments<'a> {
    rest: &'a str,
    rooted: bool,
    done: bool,
}

impl<'a> RawSegments<'a> {
    /// Starts splitting `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let path = text
            .find(is_accessor_trigger)
            .map_or(text, |end| &text[..end]);
        let rooted = path.starts_with(is_separator);
        // Both separators are one byte wide.
        let rest = if rooted { &path[1..] } else { path };
        Self {
            rest,
            rooted,
            done: path.is_empty(),
        }
    }

    /// True when the text starts with a separator at its very first character.
    #[must_use]
    pub fn is_rooted(&self) -> bool {
        self.rooted
    }
}

impl<'a> Iterator for RawSegments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        if let Some(end) = self.rest.find(is_separator) {
            let segment = &self.rest[..end];
            self.rest = &self.rest[end + 1..];
            Some(segment.trim())
        } else {
            self.done = true;
            Some(self.rest.trim())
        }
    }
}
