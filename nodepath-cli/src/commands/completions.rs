//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary
const BIN_NAME: &str = "nodepath";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();
        let bin_name = BIN_NAME;

        if !global.quiet {
            print_instructions(self.shell);
        }

        generate(self.shell, &mut cmd, bin_name, &mut io::stdout());

        Ok(())
    }
}

fn print_instructions(shell: Shell) {
    eprintln!("# Generating {shell} completion script");
    eprintln!("# Run the following command to enable completions:");

    match shell {
        Shell::Bash => {
            eprintln!(
                "#   nodepath completions bash > ~/.local/share/bash-completion/completions/nodepath"
            );
            eprintln!("# Or source it directly in ~/.bashrc:");
            eprintln!("#   eval \"$(nodepath completions bash)\"");
        }
        Shell::Zsh => {
            eprintln!("#   nodepath completions zsh > ~/.zsh/completions/_nodepath");
            eprintln!("# Make sure ~/.zsh/completions is in your $fpath");
            eprintln!("# Or add to ~/.zshrc:");
            eprintln!("#   eval \"$(nodepath completions zsh)\"");
        }
        Shell::Fish => {
            eprintln!(
                "#   nodepath completions fish > ~/.config/fish/completions/nodepath.fish"
            );
            eprintln!("# Or add to config.fish:");
            eprintln!("#   nodepath completions fish | source");
        }
        Shell::PowerShell => {
            eprintln!("#   nodepath completions powershell > $PROFILE");
            eprintln!("# Or run:");
            eprintln!("#   nodepath completions powershell | Out-String | Invoke-Expression");
        }
        Shell::Elvish => {
            // No extra setup needed
        }
        _ => {
            // Future shells added to clap_complete
        }
    }

    eprintln!();
}
