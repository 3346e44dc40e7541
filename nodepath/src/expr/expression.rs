//! The immutable output of the path parser.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::expr::accessor::RawAccessor;
use crate::expr::{is_accessor_trigger, is_reserved, PathExpressionParser, SEPARATOR};

/// How resolution of a path expression starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// No anchor token: segments are relative to the starting node.
    #[default]
    None,
    /// Leading separator: resolution starts at the tree root.
    Root,
    /// Leading `.`: resolution starts at the starting node.
    Current,
    /// Leading `..`: resolution starts at the starting node's parent.
    Parent,
}

impl Anchor {
    /// The textual token that introduces this anchor in canonical form.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Root => "/",
            Self::Current => ".",
            Self::Parent => "..",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Root => write!(f, "root"),
            Self::Current => write!(f, "current"),
            Self::Parent => write!(f, "parent"),
        }
    }
}

/// A parsed path: anchor, segments and an optional accessor handle.
///
/// Expressions are created once per parse and never change afterwards. They
/// carry no reference to any tree until handed to
/// [`Tree::find_expression`](crate::tree::Tree::find_expression).
///
/// # Examples
///
/// ```
/// use nodepath::expr::{Anchor, PathExpression};
///
/// let expr = PathExpression::new(Anchor::Root, vec!["a".into(), "b".into()]).unwrap();
/// assert_eq!(expr.canonical_path(), "/a/b");
/// assert_eq!(expr.to_string(), "/a/b");
///
/// let parsed: PathExpression = "/a/b".parse().unwrap();
/// assert_eq!(parsed, expr);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathExpression<H = RawAccessor> {
    anchor: Anchor,
    segments: Vec<String>,
    canonical_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    accessor: Option<H>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accessor_offset: Option<usize>,
}

impl<H> PathExpression<H> {
    /// Builds an expression from parts without an accessor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a segment is empty, contains
    /// surrounding whitespace or contains a reserved character.
    pub fn new(anchor: Anchor, segments: Vec<String>) -> Result<Self> {
        for segment in &segments {
            validate_segment(segment)?;
        }
        Ok(Self::from_parts(anchor, segments, None))
    }

    pub(crate) fn from_parts(
        anchor: Anchor,
        segments: Vec<String>,
        accessor: Option<(H, usize)>,
    ) -> Self {
        let canonical_path = canonical_path(anchor, &segments);
        let (accessor, accessor_offset) = match accessor {
            Some((handle, offset)) => (Some(handle), Some(offset)),
            None => (None, None),
        };
        Self {
            anchor,
            segments,
            canonical_path,
            accessor,
            accessor_offset,
        }
    }

    /// The anchor the expression starts from.
    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// The ordered path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The canonical textual form, without the accessor suffix.
    ///
    /// Re-parsing it yields the same anchor and segments, except for an
    /// input that is only an accessor (`@Title`, `[0]`): its canonical path
    /// is empty and parses to no expression.
    #[must_use]
    pub fn canonical_path(&self) -> &str {
        &self.canonical_path
    }

    /// The accessor handle, if the input carried an accessor suffix.
    #[must_use]
    pub fn accessor(&self) -> Option<&H> {
        self.accessor.as_ref()
    }

    /// Byte offset in the original input where the accessor started.
    #[must_use]
    pub fn accessor_offset(&self) -> Option<usize> {
        self.accessor_offset
    }

    /// Returns true if the expression has neither segments nor an accessor.
    #[must_use]
    pub fn is_bare_anchor(&self) -> bool {
        self.segments.is_empty() && self.accessor.is_none()
    }

    /// Drops the accessor handle, keeping anchor and segments.
    #[must_use]
    pub fn into_path_only(self) -> PathExpression<H> {
        Self {
            accessor: None,
            accessor_offset: None,
            ..self
        }
    }
}

impl<H> fmt::Display for PathExpression<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_path)
    }
}

impl FromStr for PathExpression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PathExpressionParser::new()
            .parse(s)?
            .ok_or_else(|| Error::Validation {
                field: "path".to_string(),
                message: "empty path expression".to_string(),
            })
    }
}

fn canonical_path(anchor: Anchor, segments: &[String]) -> String {
    let joined = segments.join("/");
    match anchor {
        Anchor::None => joined,
        Anchor::Root => format!("{SEPARATOR}{joined}"),
        Anchor::Current | Anchor::Parent if joined.is_empty() => anchor.token().to_string(),
        Anchor::Current | Anchor::Parent => format!("{}{SEPARATOR}{joined}", anchor.token()),
    }
}

fn validate_segment(segment: &str) -> Result<()> {
    let invalid = |message: String| Error::Validation {
        field: "segment".to_string(),
        message,
    };
    if segment.trim().is_empty() {
        return Err(invalid("segments must not be empty".to_string()));
    }
    if segment.trim() != segment {
        return Err(invalid(format!(
            "segment '{segment}' has surrounding whitespace"
        )));
    }
    if let Some(ch) = segment
        .chars()
        .find(|&c| is_reserved(c) || is_accessor_trigger(c))
    {
        return Err(invalid(format!(
            "segment '{segment}' contains reserved character '{ch}'"
        )));
    }
    Ok(())
}
