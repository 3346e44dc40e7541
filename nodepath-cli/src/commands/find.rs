//! Find command implementation.
//!
//! Loads a tree file, picks the starting node and resolves one path
//! expression against it.

use crate::error::CliError;
use crate::utils::{
    emit, load_configuration, load_tree, resolve_start, tree_file, GlobalOptions, NodeEntry,
};
use clap::Args;
use nodepath::PathExpressionParser;
use std::path::PathBuf;

/// Resolve a path expression against a tree file.
#[derive(Args)]
pub struct FindCommand {
    /// The expression to resolve
    #[arg(value_name = "EXPR", allow_hyphen_values = true)]
    pub expression: String,

    /// Tree file to load (overrides the configured tree)
    #[arg(long, value_name = "FILE")]
    pub tree: Option<PathBuf>,

    /// Path of the node to start from (defaults to the configured start or the root)
    #[arg(long, value_name = "PATH")]
    pub from: Option<String>,
}

impl FindCommand {
    /// Execute the find command.
    ///
    /// Prints the full path of the resolved node. A path that does not
    /// resolve is a semantic failure (exit code 1).
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = config.output_format_or_default();

        // Malformed input is reported before the tree file is read.
        let Some(expression) = PathExpressionParser::new().parse(&self.expression)? else {
            return Err(CliError::InvalidArguments(
                "expression must not be empty".to_string(),
            ));
        };

        let tree = load_tree(&tree_file(self.tree, &config)?)?;
        let start = resolve_start(&tree, self.from.as_deref(), &config)?;

        let found = tree.find_expression_with(start, &expression, |step| {
            log::info!(
                "step {}: '{}' {} -> {}",
                step.index,
                step.segment,
                tree.get(step.previous).map_or("?", |n| n.full_path()),
                tree.get(step.current).map_or("?", |n| n.full_path()),
            );
            step.current
        })?;

        let node = found.and_then(|id| tree.get(id)).ok_or_else(|| {
            CliError::SemanticFailure(format!("no node at '{}'", expression.canonical_path()))
        })?;

        let entry = NodeEntry::from(node);
        emit(format, &entry, &entry.path)
    }
}
