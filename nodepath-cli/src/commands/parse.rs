//! Parse command implementation.
//!
//! Parses a path expression without touching any tree and prints its
//! anchor, segments, canonical path and accessor.

use crate::error::CliError;
use crate::utils::{emit, load_configuration, GlobalOptions};
use clap::Args;
use nodepath::{PathExpression, PathExpressionParser};

/// Parse a path expression and show its parts.
#[derive(Args)]
pub struct ParseCommand {
    /// The expression to parse
    #[arg(value_name = "EXPR", allow_hyphen_values = true)]
    pub expression: String,
}

impl ParseCommand {
    /// Execute the parse command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = config.output_format_or_default();

        let parsed = PathExpressionParser::new().parse(&self.expression)?;
        let text = parsed
            .as_ref()
            .map_or_else(|| "no expression".to_string(), describe);
        emit(format, &parsed, &text)
    }
}

fn describe(expr: &PathExpression) -> String {
    let mut lines = vec![
        format!("anchor: {}", expr.anchor()),
        format!("segments: {}", expr.segments().join(", ")),
        format!("canonical: {}", expr.canonical_path()),
    ];
    if let Some(accessor) = expr.accessor() {
        lines.push(format!(
            "accessor: {} (offset {})",
            accessor.text(),
            accessor.offset()
        ));
    }
    lines.join("\n")
}
