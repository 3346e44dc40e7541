//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CheckNameCommand, CompletionsCommand, FindCommand, ParseCommand, TreeCommand,
};
use clap::{Parser, Subcommand};
use nodepath::config::OutputFormat;
use std::path::PathBuf;

/// Command-line tool for parsing and resolving node path expressions.
#[derive(Parser)]
#[command(name = "nodepath")]
#[command(version, about = "Parse and resolve node path expressions", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Additional configuration file
    #[arg(long, value_name = "PATH", global = true, env = "NODEPATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (text, json, yaml)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Parse a path expression and show its parts
    Parse(ParseCommand),

    /// Resolve a path expression against a tree file
    Find(FindCommand),

    /// List the nodes of a tree file
    Tree(TreeCommand),

    /// Check whether a string is a valid node name
    CheckName(CheckNameCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
