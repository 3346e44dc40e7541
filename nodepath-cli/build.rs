//! Build script for nodepath-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    let tree_args = || {
        [
            Arg::new("tree")
                .long("tree")
                .help("Tree file to load (overrides the configured tree)")
                .value_name("FILE"),
            Arg::new("from")
                .long("from")
                .help("Path of the node to start from")
                .value_name("PATH"),
        ]
    };

    Command::new("nodepath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse and resolve node path expressions")
        .long_about(
            "Command-line tool for parsing hierarchical path expressions and resolving them against a tree of named nodes",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Additional configuration file")
                .value_name("PATH")
                .global(true)
                .env("NODEPATH_CONFIG"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format (text, json, yaml)")
                .value_name("FORMAT")
                .global(true),
        )
        .subcommands(vec![
            Command::new("parse")
                .about("Parse a path expression and show its parts")
                .long_about("Print the anchor, segments, canonical path and accessor of an expression")
                .arg(Arg::new("EXPR").required(true)),
            Command::new("find")
                .about("Resolve a path expression against a tree file")
                .long_about("Print the full path of the node an expression resolves to; exits 1 if none")
                .arg(Arg::new("EXPR").required(true))
                .args(tree_args()),
            Command::new("tree")
                .about("List the nodes of a tree file")
                .long_about("Print the full path of every node below the starting node")
                .args(tree_args()),
            Command::new("check-name")
                .about("Check whether a string is a valid node name")
                .long_about("Exit 0 if the name can be used for a node, 1 otherwise")
                .arg(Arg::new("NAME").required(true)),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell")
                .arg(Arg::new("SHELL").required(true)),
        ])
}

fn main() -> io::Result<()> {
    // Generate man pages at build time
    let out_dir = std::env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::other("OUT_DIR not set"))?;
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    // Generate main nodepath.1 man page
    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;

    fs::write(man_dir.join("nodepath.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
