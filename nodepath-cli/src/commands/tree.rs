//! Tree command implementation.

use crate::error::CliError;
use crate::utils::{
    emit, load_configuration, load_tree, resolve_start, tree_file, GlobalOptions, NodeEntry,
};
use clap::Args;
use std::path::PathBuf;

/// List the nodes of a tree file.
///
/// Nodes are listed depth-first, parents before children, in insertion order.
#[derive(Args)]
pub struct TreeCommand {
    /// Tree file to load (overrides the configured tree)
    #[arg(long, value_name = "FILE")]
    pub tree: Option<PathBuf>,

    /// Path of the node to list from (defaults to the configured start or the root)
    #[arg(long, value_name = "PATH")]
    pub from: Option<String>,
}

impl TreeCommand {
    /// Execute the tree command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = config.output_format_or_default();

        let tree = load_tree(&tree_file(self.tree, &config)?)?;
        let start = resolve_start(&tree, self.from.as_deref(), &config)?;

        let entries: Vec<NodeEntry> = tree.walk(start).map(NodeEntry::from).collect();
        let text = entries
            .iter()
            .map(|entry| entry.path.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        emit(format, &entries, &text)
    }
}
