//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `parse`: Parse a path expression and show its parts
//! - `find`: Resolve a path expression against a tree file
//! - `tree`: List the nodes of a tree file
//! - `check_name`: Check whether a string is a valid node name
//! - `completions`: Generate shell completion scripts

pub mod check_name;
pub mod completions;
pub mod find;
pub mod parse;
pub mod tree;

pub use check_name::CheckNameCommand;
pub use completions::CompletionsCommand;
pub use find::FindCommand;
pub use parse::ParseCommand;
pub use tree::TreeCommand;
