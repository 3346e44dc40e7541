//! Configuration schema definitions.
//!
//! This module defines the configuration structure shared by the library and
//! the `nodepath` command-line tool.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// File name of the project configuration discovered by walking up from the
/// working directory.
pub const PROJECT_CONFIG_FILE: &str = "nodepath.yaml";

/// File name of the user configuration inside the user config directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Complete configuration structure.
///
/// Every field is optional so that partial files can be layered.
///
/// # Examples
///
/// ```
/// use nodepath::config::{Config, OutputFormat};
///
/// let config: Config = serde_yaml::from_str("start: /reports\noutput_format: json\n").unwrap();
/// assert_eq!(config.start.as_deref(), Some("/reports"));
/// assert_eq!(config.output_format, Some(OutputFormat::Json));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tree file to load when none is given on the command line.
    pub tree: Option<PathBuf>,

    /// Path of the node that relative expressions start from.
    pub start: Option<String>,

    /// Output format for command results.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// The configured output format, or text.
    #[must_use]
    pub fn output_format_or_default(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// The configured starting path, or the root.
    #[must_use]
    pub fn start_or_root(&self) -> &str {
        self.start.as_deref().unwrap_or("/")
    }
}

/// Output format for command results.
///
/// # Examples
///
/// ```
/// use nodepath::config::OutputFormat;
///
/// let format: OutputFormat = "JSON".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output format.
    Json,
    /// YAML output format.
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output_format_or_default(), OutputFormat::Text);
        assert_eq!(config.start_or_root(), "/");
    }

    #[test]
    fn test_full_config() {
        let yaml = "tree: trees/main.yaml\nstart: /docs\noutput_format: yaml\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tree, Some(PathBuf::from("trees/main.yaml")));
        assert_eq!(config.start_or_root(), "/docs");
        assert_eq!(config.output_format, Some(OutputFormat::Yaml));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("ports: 5000\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("Yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_serialize_output_format() {
        let config = Config {
            output_format: Some(OutputFormat::Json),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("output_format: json"));
    }
}
