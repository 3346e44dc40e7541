//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::expr::PathExpressionParser;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use nodepath::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { start: Some("/a*b".to_string()), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
#[derive(Debug)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref tree) = config.tree {
            if tree.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "tree".into(),
                    message: "Tree file path cannot be empty".into(),
                });
            }
        }

        if let Some(ref start) = config.start {
            Self::validate_start(start)?;
        }

        Ok(())
    }

    /// Checks that `start` is a plain node address.
    fn validate_start(start: &str) -> Result<()> {
        let invalid = |message: String| Error::Validation {
            field: "start".into(),
            message,
        };

        match PathExpressionParser::new().parse(start) {
            Ok(Some(expr)) if expr.accessor().is_some() => Err(invalid(format!(
                "'{start}' must address a node, not a member"
            ))),
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(invalid("Starting path cannot be empty".into())),
            Err(e) => Err(invalid(format!("'{start}' is not a valid path: {e}"))),
        }
    }
}
