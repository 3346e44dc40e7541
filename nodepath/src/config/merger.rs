//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use nodepath::config::{Config, ConfigMerger};
///
/// let low = Config { start: Some("/low".to_string()), ..Default::default() };
/// let high = Config { start: Some("/high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.start, Some("/high".to_string()));
/// ```
#[derive(Debug)]
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Each field of `source` that is `Some` replaces the target's value.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.tree.is_some() {
            target.tree.clone_from(&source.tree);
        }

        if source.start.is_some() {
            target.start.clone_from(&source.start);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}
