//! Path expressions: parsing compact node addresses.
//!
//! A path expression is a leading anchor followed by separator-delimited
//! segments and an optional member-accessor suffix:
//!
//! - `/a/b`: absolute, resolved from the tree root
//! - `./a/b` or `a/b`: relative to the starting node
//! - `../a/b`: relative to the starting node's parent
//! - `a/b@Name.Sub` or `a/b[0]`: everything from the first `@` or `[` is
//!   handed to an [`AccessorParser`] and never interpreted here
//!
//! Both `/` and `\` act as separators. The characters
//! `/ \ * ? ! @ # $ % ^ &` may not appear in a segment.
//!
//! # Examples
//!
//! ```
//! use nodepath::expr::{Anchor, PathExpressionParser};
//!
//! let parser = PathExpressionParser::new();
//! let expr = parser.parse("../a/b").unwrap().unwrap();
//! assert_eq!(expr.anchor(), Anchor::Parent);
//! assert_eq!(expr.segments(), ["a", "b"]);
//! assert_eq!(expr.canonical_path(), "../a/b");
//!
//! // Empty input is not an error, it is simply no expression.
//! assert!(parser.parse("").unwrap().is_none());
//! ```

pub mod accessor;
mod expression;
pub mod parser;
mod segments;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use accessor::{AccessorError, AccessorParser, RawAccessor, RawAccessorParser};
pub use expression::{Anchor, PathExpression};
pub use parser::PathExpressionParser;
pub use segments::RawSegments;

/// The path separator, also the name of every tree's root node.
pub const SEPARATOR: char = '/';

/// Characters that may never appear in a node name or path segment.
pub const RESERVED_CHARS: [char; 11] = ['/', '\\', '*', '?', '!', '@', '#', '$', '%', '^', '&'];

/// Returns true for either accepted separator, `/` or `\`.
#[must_use]
pub fn is_separator(ch: char) -> bool {
    ch == '/' || ch == '\\'
}

/// Returns true for a character that may not appear in a name.
#[must_use]
pub fn is_reserved(ch: char) -> bool {
    RESERVED_CHARS.contains(&ch)
}

/// Returns true for a character that starts the member-accessor suffix.
#[must_use]
pub fn is_accessor_trigger(ch: char) -> bool {
    ch == '@' || ch == '['
}
