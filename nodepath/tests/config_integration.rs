//! Integration tests for the configuration system.
//!
//! Tests that modify environment variables are marked with `#[serial]` so
//! they run one at a time; the environment is process-global.

use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use nodepath::config::{Config, ConfigBuilder, ConfigLoader, OutputFormat};
use nodepath::error::Error;

/// Helper to create a temporary config file.
fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// RAII guard for setting and restoring environment variables.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

fn clear_nodepath_env_vars() -> Vec<EnvGuard> {
    ["NODEPATH_TREE", "NODEPATH_START", "NODEPATH_OUTPUT_FORMAT"]
        .iter()
        .map(|k| EnvGuard::remove(k))
        .collect()
}

/// A builder isolated from the real home directory.
fn isolated(work: &Path, user: &Path) -> ConfigBuilder {
    ConfigBuilder::new()
        .with_working_dir(work)
        .with_user_dir(user)
}

#[test]
fn test_file_discovery_upward_traversal() {
    let temp = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    let child = temp.path().join("nested").join("deeply");
    fs::create_dir_all(&child).unwrap();
    create_temp_config(temp.path(), "nodepath.yaml", "start: /parent\n");

    let config = isolated(&child, user.path()).skip_env().build().unwrap();
    assert_eq!(config.start.as_deref(), Some("/parent"));
}

#[test]
fn test_nearest_project_config_wins() {
    let temp = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    let child = temp.path().join("child");
    fs::create_dir(&child).unwrap();
    create_temp_config(temp.path(), "nodepath.yaml", "start: /grandparent\n");
    create_temp_config(&child, "nodepath.yaml", "output_format: json\n");

    let config = isolated(&child, user.path()).skip_env().build().unwrap();
    assert_eq!(config.output_format, Some(OutputFormat::Json));
    assert_eq!(config.start, None);
}

#[test]
fn test_user_config_is_lowest_file_layer() {
    let temp = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    create_temp_config(
        user.path(),
        "config.yaml",
        "tree: /trees/default.yaml\nstart: /user\n",
    );
    create_temp_config(temp.path(), "nodepath.yaml", "start: /project\n");

    let config = isolated(temp.path(), user.path()).skip_env().build().unwrap();
    assert_eq!(config.tree, Some(PathBuf::from("/trees/default.yaml")));
    assert_eq!(config.start.as_deref(), Some("/project"));
}

#[test]
fn test_invalid_yaml_reports_file() {
    let temp = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    create_temp_config(temp.path(), "nodepath.yaml", "start: [unclosed\n");

    let err = isolated(temp.path(), user.path())
        .skip_env()
        .build()
        .unwrap_err();
    match err {
        Error::Validation { field, message } => {
            assert!(field.ends_with("nodepath.yaml"), "{field}");
            assert!(message.contains("Invalid YAML"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_field_rejected() {
    let temp = TempDir::new().unwrap();
    let path = create_temp_config(temp.path(), "nodepath.yaml", "project: legacy\n");
    assert!(ConfigLoader::load_file(&path).is_err());
}

#[test]
fn test_start_validation_applies_to_files() {
    let temp = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    create_temp_config(temp.path(), "nodepath.yaml", "start: /bad*name\n");

    let err = isolated(temp.path(), user.path())
        .skip_env()
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "start"));
}

#[test]
#[serial]
fn test_env_overrides_files() {
    let _clear = clear_nodepath_env_vars();
    let temp = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    create_temp_config(temp.path(), "nodepath.yaml", "start: /file\noutput_format: text\n");

    let _start = EnvGuard::new("NODEPATH_START", "/env");
    let _format = EnvGuard::new("NODEPATH_OUTPUT_FORMAT", "yaml");

    let config = isolated(temp.path(), user.path()).build().unwrap();
    assert_eq!(config.start.as_deref(), Some("/env"));
    assert_eq!(config.output_format, Some(OutputFormat::Yaml));
}

#[test]
#[serial]
fn test_programmatic_overrides_env() {
    let _clear = clear_nodepath_env_vars();
    let _tree = EnvGuard::new("NODEPATH_TREE", "/env/tree.yaml");

    let config = ConfigBuilder::new()
        .skip_files()
        .with_config(Config {
            tree: Some(PathBuf::from("/cli/tree.yaml")),
            ..Default::default()
        })
        .build()
        .unwrap();
    assert_eq!(config.tree, Some(PathBuf::from("/cli/tree.yaml")));
}

#[test]
#[serial]
fn test_invalid_env_is_error() {
    let _clear = clear_nodepath_env_vars();
    let _format = EnvGuard::new("NODEPATH_OUTPUT_FORMAT", "table");

    let err = ConfigBuilder::new().skip_files().build().unwrap_err();
    assert!(err.to_string().contains("NODEPATH_OUTPUT_FORMAT"));
}

#[test]
#[serial]
fn test_skip_env_ignores_variables() {
    let _clear = clear_nodepath_env_vars();
    let _start = EnvGuard::new("NODEPATH_START", "/env");

    let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
    assert_eq!(config, Config::default());
}
