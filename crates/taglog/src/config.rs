//! crates/taglog/src/config.rs
//! Shared threshold and tag observed by every logger of a registry.

mod source;

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use arc_swap::ArcSwap;

use crate::level::Level;

pub use source::{ConfigError, ConfigSource, EnvSource, Layered, Properties, env_key};

/// Key holding the initial threshold as a level name.
pub const DEFAULT_LOG_LEVEL_KEY: &str = "taglog.defaultLogLevel";
/// Key holding the tag passed to the sink.
pub const LOG_TAG_KEY: &str = "taglog.logTag";
/// Tag used when configuration does not provide one.
pub const DEFAULT_TAG: &str = "taglog";
/// Properties file consulted by [`LoggerConfig::load`].
pub const CONFIGURATION_FILE: &str = "taglog.properties";
/// Environment variable overriding the location of [`CONFIGURATION_FILE`].
pub const CONFIG_PATH_ENV: &str = "TAGLOG_CONFIG";

/// Process-wide logging state shared by reference between loggers.
///
/// The threshold lives in an atomic integer holding the level's native code
/// and the tag in an [`ArcSwap`], so readers never block and never observe a
/// partially written value. Threshold and tag are independent cells; a reader
/// may see a new threshold together with an old tag.
///
/// # Examples
///
/// ```
/// use taglog::{Level, LoggerConfig};
///
/// let config = LoggerConfig::default();
/// assert_eq!(config.threshold(), Level::Info);
/// assert_eq!(config.tag().as_str(), "taglog");
///
/// config.set_threshold(Level::Trace);
/// config.set_tag("Demo");
/// assert!(config.is_enabled(Level::Trace));
/// assert_eq!(config.tag().as_str(), "Demo");
/// ```
#[derive(Debug)]
pub struct LoggerConfig {
    threshold: AtomicI32,
    tag: ArcSwap<String>,
}

impl LoggerConfig {
    /// Creates a configuration with explicit values.
    pub fn new(threshold: Level, tag: impl Into<String>) -> Self {
        Self {
            threshold: AtomicI32::new(threshold.native_code()),
            tag: ArcSwap::from_pointee(tag.into()),
        }
    }

    /// Seeds a configuration from a key-value source.
    ///
    /// An absent level key keeps the default threshold; a present but
    /// unrecognised value selects [`Level::Info`]. An absent tag key selects
    /// [`DEFAULT_TAG`].
    pub fn from_source<S>(source: &S) -> Self
    where
        S: ConfigSource + ?Sized,
    {
        let threshold = source
            .get(DEFAULT_LOG_LEVEL_KEY)
            .map_or_else(Level::default, |token| Level::from_config_token(&token));
        let tag = source
            .get(LOG_TAG_KEY)
            .unwrap_or_else(|| DEFAULT_TAG.to_owned());
        Self::new(threshold, tag)
    }

    /// Loads configuration the way a host does at startup.
    ///
    /// Environment variables take precedence over `taglog.properties` in the
    /// working directory (or the file named by `TAGLOG_CONFIG`). A missing or
    /// unreadable file is ignored.
    pub fn load() -> Self {
        let path = env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(CONFIGURATION_FILE), PathBuf::from);
        Self::load_with(EnvSource::capture(), &path)
    }

    /// Loads configuration from `path`, layered under `overrides`.
    pub fn load_with<S>(overrides: S, path: &Path) -> Self
    where
        S: ConfigSource + Send + Sync + 'static,
    {
        let mut layered = Layered::new().with(overrides);
        match Properties::read(path) {
            Ok(props) => {
                tracing::debug!(
                    path = %path.display(),
                    entries = props.len(),
                    "loaded logger properties"
                );
                layered = layered.with(props);
            }
            Err(err) => {
                tracing::debug!(error = %err, "logger properties unavailable, using defaults");
            }
        }
        Self::from_source(&layered)
    }

    /// Returns the current threshold.
    pub fn threshold(&self) -> Level {
        Level::from_native_code(self.threshold.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Replaces the threshold for every logger sharing this configuration.
    pub fn set_threshold(&self, level: Level) {
        self.threshold.store(level.native_code(), Ordering::Release);
    }

    /// Returns the current tag.
    pub fn tag(&self) -> Arc<String> {
        self.tag.load_full()
    }

    /// Replaces the tag for every logger sharing this configuration.
    pub fn set_tag(&self, tag: impl Into<String>) {
        self.tag.store(Arc::new(tag.into()));
    }

    /// Reports whether `level` passes the current threshold.
    pub fn is_enabled(&self, level: Level) -> bool {
        level.is_enabled(self.threshold())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new(Level::default(), DEFAULT_TAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn defaults_are_info_and_default_tag() {
        let config = LoggerConfig::default();
        assert_eq!(config.threshold(), Level::Info);
        assert_eq!(config.tag().as_str(), DEFAULT_TAG);
    }

    #[test]
    fn from_source_reads_both_keys() {
        let config = LoggerConfig::from_source(&source(&[
            (DEFAULT_LOG_LEVEL_KEY, "Verbose"),
            (LOG_TAG_KEY, "TestLogTag"),
        ]));
        assert_eq!(config.threshold(), Level::Trace);
        assert_eq!(config.tag().as_str(), "TestLogTag");
    }

    #[test]
    fn from_source_falls_back_on_unknown_level() {
        let config = LoggerConfig::from_source(&source(&[(DEFAULT_LOG_LEVEL_KEY, "chatty")]));
        assert_eq!(config.threshold(), Level::Info);
        assert_eq!(config.tag().as_str(), DEFAULT_TAG);
    }

    #[test]
    fn from_empty_source_uses_defaults() {
        let config = LoggerConfig::from_source(&HashMap::<String, String>::new());
        assert_eq!(config.threshold(), Level::Info);
        assert_eq!(config.tag().as_str(), DEFAULT_TAG);
    }

    #[test]
    fn setters_replace_values() {
        let config = LoggerConfig::new(Level::Error, "a");
        assert!(!config.is_enabled(Level::Warn));

        config.set_threshold(Level::Debug);
        config.set_tag(String::from("b"));

        assert!(config.is_enabled(Level::Warn));
        assert!(config.is_enabled(Level::Debug));
        assert!(!config.is_enabled(Level::Trace));
        assert_eq!(config.tag().as_str(), "b");
    }

    #[test]
    fn load_with_missing_file_keeps_overrides() {
        let overrides = EnvSource::from_vars([("TAGLOG_DEFAULT_LOG_LEVEL", "warn")]);
        let config = LoggerConfig::load_with(overrides, Path::new("/no/such/taglog.properties"));
        assert_eq!(config.threshold(), Level::Warn);
        assert_eq!(config.tag().as_str(), DEFAULT_TAG);
    }
}
