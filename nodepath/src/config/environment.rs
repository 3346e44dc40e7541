//! Environment variable handling for configuration overrides.
//!
//! This module applies `NODEPATH_*` environment variables on top of the values
//! read from configuration files.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Overrides `tree`.
pub const TREE_ENV: &str = "NODEPATH_TREE";
/// Overrides `start`.
pub const START_ENV: &str = "NODEPATH_START";
/// Overrides `output_format`.
pub const OUTPUT_FORMAT_ENV: &str = "NODEPATH_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use nodepath::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
#[derive(Debug)]
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Empty variables are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `NODEPATH_OUTPUT_FORMAT` is not a known format.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(tree) = Self::var(TREE_ENV) {
            config.tree = Some(PathBuf::from(tree));
        }

        if let Some(start) = Self::var(START_ENV) {
            config.start = Some(start);
        }

        if let Some(format) = Self::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(Self::parse_output_format(&format)?);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.trim().is_empty())
    }

    fn parse_output_format(s: &str) -> Result<OutputFormat> {
        s.trim().parse().map_err(|message| Error::Validation {
            field: OUTPUT_FORMAT_ENV.into(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn set(vars: &[(&'static str, Option<&str>)]) -> Self {
            let saved = [TREE_ENV, START_ENV, OUTPUT_FORMAT_ENV]
                .into_iter()
                .map(|name| (name, env::var(name).ok()))
                .collect();
            for name in [TREE_ENV, START_ENV, OUTPUT_FORMAT_ENV] {
                env::remove_var(name);
            }
            for (name, value) in vars {
                if let Some(value) = value {
                    env::set_var(name, value);
                }
            }
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(
            EnvironmentConfig::parse_output_format(" JSON ").unwrap(),
            OutputFormat::Json
        );
        let err = EnvironmentConfig::parse_output_format("table").unwrap_err();
        assert!(err.to_string().contains(OUTPUT_FORMAT_ENV));
    }

    #[test]
    #[serial]
    fn test_apply_overrides_no_env_vars() {
        let _guard = EnvGuard::set(&[]);
        let mut config = Config {
            start: Some("/keep".to_string()),
            ..Default::default()
        };
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config.start, Some("/keep".to_string()));
        assert_eq!(config.tree, None);
    }

    #[test]
    #[serial]
    fn test_apply_overrides_all_vars() {
        let _guard = EnvGuard::set(&[
            (TREE_ENV, Some("/tmp/tree.yaml")),
            (START_ENV, Some("/reports")),
            (OUTPUT_FORMAT_ENV, Some("yaml")),
        ]);
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();

        assert_eq!(config.tree, Some(PathBuf::from("/tmp/tree.yaml")));
        assert_eq!(config.start, Some("/reports".to_string()));
        assert_eq!(config.output_format, Some(OutputFormat::Yaml));
    }

    #[test]
    #[serial]
    fn test_empty_var_is_ignored() {
        let _guard = EnvGuard::set(&[(START_ENV, Some("  "))]);
        let mut config = Config {
            start: Some("/keep".to_string()),
            ..Default::default()
        };
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config.start, Some("/keep".to_string()));
    }

    #[test]
    #[serial]
    fn test_invalid_format_is_error() {
        let _guard = EnvGuard::set(&[(OUTPUT_FORMAT_ENV, Some("csv"))]);
        let mut config = Config::default();
        assert!(EnvironmentConfig::apply_overrides(&mut config).is_err());
    }
}
