//! Configuration system for nodepath.
//!
//! This module provides layered configuration with support for:
//! - YAML configuration files (user config and project `nodepath.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`NODEPATH_*`)
//! 3. An explicit file (via `ConfigBuilder::with_config_file`)
//! 4. Project config (`nodepath.yaml`, nearest ancestor directory)
//! 5. User config (`~/.nodepath/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use nodepath::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! println!("starting at {}", config.start_or_root());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use nodepath::config::{Config, ConfigBuilder, OutputFormat};
//!
//! let custom = Config {
//!     start: Some("/reports".to_string()),
//!     output_format: Some(OutputFormat::Json),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.output_format_or_default(), OutputFormat::Json);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat};
pub use validator::ConfigValidator;
