//! Check-name command implementation.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use nodepath::tree::validate_name;
use nodepath::Error as LibError;

/// Check whether a string is a valid node name.
///
/// Exits 0 for a valid name and 1 otherwise, printing the reason.
#[derive(Args)]
pub struct CheckNameCommand {
    /// The candidate name
    #[arg(value_name = "NAME", allow_hyphen_values = true)]
    pub name: String,
}

impl CheckNameCommand {
    /// Execute the check-name command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match validate_name(&self.name) {
            Ok(()) => {
                if !global.quiet {
                    println!("'{}' is a valid node name", self.name);
                }
                Ok(())
            }
            Err(LibError::InvalidName { name, reason }) => Err(CliError::SemanticFailure(
                format!("'{name}' is not a valid node name: {reason}"),
            )),
            Err(other) => Err(other.into()),
        }
    }
}
