#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # nodepath
//!
//! Hierarchical path resolution over in-memory trees of named nodes.
//!
//! The crate has two halves that meet in the resolver:
//!
//! - [`expr`]: a lexer/parser that turns text such as `../reports/Q1@Title`
//!   into a [`PathExpression`] (an [`Anchor`], name segments and an optional
//!   accessor handed to a pluggable [`expr::AccessorParser`]).
//! - [`tree`]: an arena [`Tree`] whose nodes own case-insensitively keyed
//!   children, cache their full paths, and resolve path text with
//!   [`Tree::find`], [`Tree::find_with`] and [`Tree::find_root`].
//!
//! "Not found" is never an error: resolution returns `Ok(None)`. The only
//! structural error is a parent-chain cycle found by [`Tree::find_root`].
//!
//! ## Thread safety
//!
//! **The tree provides no internal locking.** Reading through `&Tree` from
//! many threads is safe. Structural mutation requires `&mut Tree`; callers
//! that need to mutate a shared tree must put it behind their own
//! `RwLock` or swap whole immutable trees. Parsing holds no shared state and
//! may be called from any thread.
//!
//! ## Examples
//!
//! ```
//! use nodepath::{Anchor, PathExpressionParser, Tree};
//!
//! let mut tree = Tree::new(());
//! let reports = tree.insert(tree.root(), "reports", ()).unwrap();
//! let q1 = tree.insert(reports, "Q1", ()).unwrap();
//!
//! let expr = PathExpressionParser::new()
//!     .parse("../reports/q1@Title")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(expr.anchor(), Anchor::Parent);
//! assert_eq!(expr.segments(), ["reports", "q1"]);
//! assert_eq!(expr.accessor().unwrap().text(), "@Title");
//!
//! assert_eq!(tree.find_expression(reports, &expr).unwrap(), Some(q1));
//! assert_eq!(tree.find(q1, "").unwrap(), Some(q1));
//! assert_eq!(tree.find(q1, "/missing").unwrap(), None);
//! ```

pub mod config;
pub mod error;
pub mod expr;
pub mod logging;
pub mod tree;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, ParseError, Result};
pub use expr::{Anchor, PathExpression, PathExpressionParser};
pub use logging::{init_logger, LogLevel, Logger};
pub use tree::{NodeId, NodeRef, Tree};
