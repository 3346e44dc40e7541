//! Utility functions for CLI operations.
//!
//! This module provides helpers shared across CLI commands: configuration
//! loading, tree file loading, start node resolution and output formatting.

use crate::error::CliError;
use nodepath::config::OutputFormat;
use nodepath::{Config, ConfigBuilder, Error as LibError, NodeId, NodeRef, Tree};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Key in a tree file that sets a node's title.
pub const TITLE_KEY: &str = "_title";
/// Key in a tree file that sets a node's description.
pub const DESCRIPTION_KEY: &str = "_description";
/// Key in a tree file that sets a node's icon.
pub const ICON_KEY: &str = "_icon";

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Additional configuration file.
    pub config: Option<PathBuf>,

    /// Output format requested on the command line.
    pub format: Option<OutputFormat>,
}

/// Load layered configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. The `--config` file
/// 4. Project and user configuration files
/// 5. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }
    if global.format.is_some() {
        builder = builder.with_config(Config {
            output_format: global.format,
            ..Default::default()
        });
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Picks the tree file from the command line or the configuration.
pub fn tree_file(explicit: Option<PathBuf>, config: &Config) -> Result<PathBuf, CliError> {
    explicit.or_else(|| config.tree.clone()).ok_or_else(|| {
        CliError::InvalidArguments(
            "no tree file given (use --tree or set `tree` in the configuration)".to_string(),
        )
    })
}

/// Reads a YAML tree file.
///
/// Keys are node names; values are nested mappings or null. The keys
/// `_title`, `_description` and `_icon` set display properties of the
/// enclosing node instead of creating children.
pub fn load_tree(path: &Path) -> Result<Tree, CliError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CliError::Library(LibError::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read tree file: {e}"),
        })
    })?;
    let tree = parse_tree(&contents)?;
    log::info!(
        "loaded {} nodes from {}",
        tree.node_count(),
        path.display()
    );
    Ok(tree)
}

/// Builds a tree from YAML text. See [`load_tree`].
pub fn parse_tree(contents: &str) -> Result<Tree, CliError> {
    let document: Value = serde_yaml::from_str(contents)?;
    let mut tree = Tree::new(());
    let root = tree.root();
    match document {
        Value::Null => {}
        Value::Mapping(mapping) => add_children(&mut tree, root, &mapping)?,
        _ => return Err(tree_shape("the document must be a mapping of node names")),
    }
    Ok(tree)
}

fn add_children(tree: &mut Tree, parent: NodeId, mapping: &Mapping) -> Result<(), CliError> {
    for (key, value) in mapping {
        let Some(name) = key.as_str() else {
            return Err(tree_shape("node names must be strings"));
        };

        match name {
            TITLE_KEY | DESCRIPTION_KEY | ICON_KEY => {
                let text = value
                    .as_str()
                    .ok_or_else(|| tree_shape(&format!("'{name}' must be a string")))?
                    .to_string();
                match name {
                    TITLE_KEY => tree.set_title(parent, Some(text))?,
                    DESCRIPTION_KEY => tree.set_description(parent, Some(text))?,
                    _ => tree.set_icon(parent, Some(text))?,
                }
            }
            _ => {
                let child = tree.insert(parent, name, ())?;
                match value {
                    Value::Null => {}
                    Value::Mapping(nested) => add_children(tree, child, nested)?,
                    _ => {
                        return Err(tree_shape(&format!(
                            "'{name}' must map to child nodes or be empty"
                        )))
                    }
                }
            }
        }
    }
    Ok(())
}

fn tree_shape(message: &str) -> CliError {
    CliError::Library(LibError::Validation {
        field: "tree".to_string(),
        message: message.to_string(),
    })
}

/// Resolves the node commands start from.
///
/// Uses `explicit`, then the configured `start`, then the root.
pub fn resolve_start(
    tree: &Tree,
    explicit: Option<&str>,
    config: &Config,
) -> Result<NodeId, CliError> {
    let start = explicit.unwrap_or_else(|| config.start_or_root());
    tree.find(tree.root(), start)?
        .ok_or_else(|| CliError::SemanticFailure(format!("starting node '{start}' not found")))
}

/// Serializable summary of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeEntry {
    /// The node's full path.
    pub path: String,
    /// The node's title, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The node's description, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The node's icon, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl From<NodeRef<'_, ()>> for NodeEntry {
    fn from(node: NodeRef<'_, ()>) -> Self {
        Self {
            path: node.full_path().to_string(),
            title: node.title().map(str::to_string),
            description: node.description().map(str::to_string),
            icon: node.icon().map(str::to_string),
        }
    }
}

/// Prints `value` in the requested format; text output uses `text`.
pub fn emit<T: Serialize>(format: OutputFormat, value: &T, text: &str) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}
