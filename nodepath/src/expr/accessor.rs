//! The seam to the member-accessor grammar.
//!
//! Everything after the first `@` or `[` in a path expression belongs to a
//! separate grammar this crate does not define. The parser hands the full
//! input and the byte offset of the trigger character to an
//! [`AccessorParser`] and stores whatever handle it returns.

use serde::Serialize;
use thiserror::Error;

/// Failure reported by an accessor parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AccessorError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl AccessorError {
    /// Creates an accessor error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parses the member-accessor suffix of a path expression.
///
/// `offset` is the byte offset in `text` of the `@` or `[` that ended the
/// path portion, so `&text[offset..]` is the accessor text.
///
/// Closures with the matching signature implement this trait:
///
/// ```
/// use nodepath::expr::{AccessorError, PathExpressionParser};
///
/// let parser = PathExpressionParser::with_accessor(|text: &str, offset: usize| {
///     text[offset..]
///         .strip_prefix('@')
///         .map(str::to_string)
///         .ok_or_else(|| AccessorError::new("indexers are not supported"))
/// });
///
/// let expr = parser.parse("a@Title").unwrap().unwrap();
/// assert_eq!(expr.accessor().map(String::as_str), Some("Title"));
/// assert!(parser.parse("a[0]").is_err());
/// ```
pub trait AccessorParser {
    /// The parsed accessor representation.
    type Handle;

    /// Parses the accessor beginning at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the accessor text is malformed.
    fn parse_accessor(&self, text: &str, offset: usize) -> Result<Self::Handle, AccessorError>;
}

impl<F, H> AccessorParser for F
where
    F: Fn(&str, usize) -> Result<H, AccessorError>,
{
    type Handle = H;

    fn parse_accessor(&self, text: &str, offset: usize) -> Result<H, AccessorError> {
        self(text, offset)
    }
}

/// Accessor text captured verbatim, starting at its trigger character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RawAccessor {
    text: String,
    offset: usize,
}

impl RawAccessor {
    /// The accessor text, including the leading `@` or `[`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the accessor within the original input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Default accessor parser: keeps the suffix as an uninterpreted string.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawAccessorParser;

impl AccessorParser for RawAccessorParser {
    type Handle = RawAccessor;

    fn parse_accessor(&self, text: &str, offset: usize) -> Result<RawAccessor, AccessorError> {
        let suffix = text
            .get(offset..)
            .ok_or_else(|| AccessorError::new(format!("offset {offset} is out of bounds")))?;
        Ok(RawAccessor {
            text: suffix.to_string(),
            offset,
        })
    }
}
