//! Path expression scanner.
//!
//! A single left-to-right pass over the input with one character of
//! lookahead. The scanner is an explicit state enum plus a cursor; segment
//! extraction is the pure function [`accept`].

use std::ops::Range;

use crate::error::{Error, ParseError, Result};
use crate::expr::accessor::{AccessorParser, RawAccessorParser};
use crate::expr::expression::{Anchor, PathExpression};
use crate::expr::{is_accessor_trigger, is_reserved, is_separator};

/// Computes the character range of a finished token.
///
/// `token_start` is where the token began, `cursor` is one past the last
/// consumed character, `trailing_whitespace` counts whitespace seen since
/// the last non-whitespace character and `backspace` (0 or 1) excludes the
/// delimiter that ended the token. Returns `None` for an empty token, which
/// is how repeated and trailing separators are absorbed.
///
/// # Examples
///
/// ```
/// use nodepath::expr::parser::accept;
///
/// // "ab/" with the separator just consumed
/// assert_eq!(accept(0, 3, 0, 1), Some(0..2));
/// // "ab  /" drops the trailing whitespace
/// assert_eq!(accept(0, 5, 2, 1), Some(0..2));
/// // "/" directly after another separator
/// assert_eq!(accept(1, 2, 0, 1), None);
/// ```
#[must_use]
pub fn accept(
    token_start: usize,
    cursor: usize,
    trailing_whitespace: usize,
    backspace: usize,
) -> Option<Range<usize>> {
    let end = cursor.checked_sub(trailing_whitespace + backspace)?;
    (end > token_start).then_some(token_start..end)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    None,
    Slash,
    Segment,
    AnchorCurrent,
    AnchorParent,
    Exit,
}

struct Scanner<'t> {
    text: &'t str,
    chars: Vec<(usize, char)>,
    state: ScanState,
    anchor: Anchor,
    segments: Vec<String>,
    token_start: usize,
    trailing_whitespace: usize,
    anchor_whitespace: bool,
}

impl<'t> Scanner<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            text,
            chars: text.char_indices().collect(),
            state: ScanState::None,
            anchor: Anchor::None,
            segments: Vec::new(),
            token_start: 0,
            trailing_whitespace: 0,
            anchor_whitespace: false,
        }
    }

    /// Runs to completion; returns the character position of the accessor
    /// trigger if one ended the scan.
    fn run(&mut self) -> std::result::Result<Option<usize>, ParseError> {
        for position in 0..self.chars.len() {
            let ch = self.chars[position].1;
            let before = self.state;
            self.step(position, ch)?;
            if self.state != before {
                log::trace!("scan {before:?} -> {:?} on {ch:?} at {position}", self.state);
            }
            if self.state == ScanState::Exit {
                return Ok(Some(position));
            }
        }
        if self.state == ScanState::Segment {
            self.emit(self.chars.len(), 0);
        }
        Ok(None)
    }

    fn step(&mut self, position: usize, ch: char) -> std::result::Result<(), ParseError> {
        match self.state {
            ScanState::None => match ch {
                c if c.is_whitespace() => {}
                '.' => {
                    self.anchor = Anchor::Current;
                    self.anchor_whitespace = false;
                    self.state = ScanState::AnchorCurrent;
                }
                c if is_separator(c) => {
                    self.anchor = Anchor::Root;
                    self.state = ScanState::Slash;
                }
                c if is_accessor_trigger(c) => self.state = ScanState::Exit,
                c if is_reserved(c) => return Err(illegal(c, position)),
                _ => self.enter_segment(position),
            },
            ScanState::AnchorCurrent => match ch {
                c if c.is_whitespace() => self.anchor_whitespace = true,
                '.' if !self.anchor_whitespace => {
                    self.anchor = Anchor::Parent;
                    self.state = ScanState::AnchorParent;
                }
                c if is_separator(c) => self.state = ScanState::Slash,
                c => return Err(unexpected(c, position, "'.' or a separator")),
            },
            ScanState::AnchorParent => match ch {
                c if c.is_whitespace() => {}
                c if is_separator(c) => self.state = ScanState::Slash,
                c => return Err(unexpected(c, position, "a separator")),
            },
            ScanState::Slash => match ch {
                c if c.is_whitespace() || is_separator(c) => {}
                c if is_accessor_trigger(c) => self.state = ScanState::Exit,
                c if is_reserved(c) => return Err(illegal(c, position)),
                _ => self.enter_segment(position),
            },
            ScanState::Segment => match ch {
                c if is_accessor_trigger(c) => {
                    self.emit(position + 1, 1);
                    self.state = ScanState::Exit;
                }
                c if is_separator(c) => {
                    self.emit(position + 1, 1);
                    self.state = ScanState::Slash;
                }
                c if is_reserved(c) => return Err(illegal(c, position)),
                c if c.is_whitespace() => self.trailing_whitespace += 1,
                _ => self.trailing_whitespace = 0,
            },
            ScanState::Exit => {}
        }
        Ok(())
    }

    fn enter_segment(&mut self, position: usize) {
        self.token_start = position;
        self.trailing_whitespace = 0;
        self.state = ScanState::Segment;
    }

    fn emit(&mut self, cursor: usize, backspace: usize) {
        if let Some(range) = accept(self.token_start, cursor, self.trailing_whitespace, backspace) {
            let start = self.chars[range.start].0;
            let end = self
                .chars
                .get(range.end)
                .map_or(self.text.len(), |&(offset, _)| offset);
            self.segments.push(self.text[start..end].to_string());
        }
        self.trailing_whitespace = 0;
    }
}

fn illegal(character: char, position: usize) -> ParseError {
    ParseError::IllegalCharacter {
        character,
        position,
    }
}

fn unexpected(character: char, position: usize, expected: &'static str) -> ParseError {
    if is_reserved(character) {
        illegal(character, position)
    } else {
        ParseError::UnexpectedCharacter {
            character,
            position,
            expected,
        }
    }
}

/// Parses path text into [`PathExpression`]s.
///
/// The parser itself holds no scanning state, so one instance may be shared
/// freely, including across threads when the accessor parser allows it.
///
/// Three entry points differ only in how failures are reported:
///
/// - [`parse`](Self::parse) returns an [`Error`]
/// - [`try_parse`](Self::try_parse) never fails, malformed text yields `None`
/// - [`parse_with`](Self::parse_with) passes the failure to a callback and
///   yields `None`
///
/// All three yield `None` for empty input, which is not an error.
///
/// # Examples
///
/// ```
/// use nodepath::expr::{Anchor, PathExpressionParser};
///
/// let parser = PathExpressionParser::new();
///
/// let expr = parser.parse("../a@Name.Sub").unwrap().unwrap();
/// assert_eq!(expr.anchor(), Anchor::Parent);
/// assert_eq!(expr.segments(), ["a"]);
/// assert_eq!(expr.accessor().unwrap().text(), "@Name.Sub");
///
/// let err = parser.parse("a*b").unwrap_err();
/// assert_eq!(err.to_string(), "illegal character '*' at position 1");
///
/// let mut reported = None;
/// assert!(parser.parse_with("a*b", |e| reported = Some(e.position())).is_none());
/// assert_eq!(reported, Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathExpressionParser<A = RawAccessorParser> {
    accessor: A,
}

impl PathExpressionParser {
    /// Creates a parser that captures accessor suffixes verbatim.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accessor: RawAccessorParser,
        }
    }
}

impl<A: AccessorParser> PathExpressionParser<A> {
    /// Creates a parser that delegates accessor suffixes to `accessor`.
    pub fn with_accessor(accessor: A) -> Self {
        Self { accessor }
    }

    /// The accessor parser in use.
    pub fn accessor_parser(&self) -> &A {
        &self.accessor
    }

    /// Parses `text`, returning `Ok(None)` for empty input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] carrying the offending character and its
    /// position, or the accessor parser's failure.
    pub fn parse(&self, text: &str) -> Result<Option<PathExpression<A::Handle>>> {
        self.scan(text).map_err(Error::from)
    }

    /// Parses optional text; absent text is treated like empty text.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse).
    pub fn parse_optional(&self, text: Option<&str>) -> Result<Option<PathExpression<A::Handle>>> {
        text.map_or(Ok(None), |text| self.parse(text))
    }

    /// Parses `text`, returning `None` for empty or malformed input.
    pub fn try_parse(&self, text: &str) -> Option<PathExpression<A::Handle>> {
        self.scan(text).ok().flatten()
    }

    /// Parses `text`, reporting a failure through `on_error` and yielding
    /// `None` instead of an error.
    pub fn parse_with<F>(&self, text: &str, on_error: F) -> Option<PathExpression<A::Handle>>
    where
        F: FnOnce(&ParseError),
    {
        match self.scan(text) {
            Ok(expr) => expr,
            Err(err) => {
                on_error(&err);
                None
            }
        }
    }

    fn scan(
        &self,
        text: &str,
    ) -> std::result::Result<Option<PathExpression<A::Handle>>, ParseError> {
        let mut scanner = Scanner::new(text);
        let exit = scanner.run()?;

        let accessor = match exit {
            Some(position) => {
                let offset = scanner.chars[position].0;
                let handle = self
                    .accessor
                    .parse_accessor(text, offset)
                    .map_err(|e| ParseError::Accessor {
                        offset,
                        message: e.message,
                    })?;
                Some((handle, offset))
            }
            None => None,
        };

        if scanner.anchor == Anchor::None && scanner.segments.is_empty() && accessor.is_none() {
            return Ok(None);
        }

        Ok(Some(PathExpression::from_parts(
            scanner.anchor,
            scanner.segments,
            accessor,
        )))
    }
}
