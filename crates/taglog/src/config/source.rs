//! crates/taglog/src/config/source.rs
//! Key-value sources consulted when seeding a [`LoggerConfig`](super::LoggerConfig).

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A read-only key-value lookup used during configuration.
///
/// Sources are consulted once at startup. A missing key is not an error;
/// callers fall back to their defaults.
pub trait ConfigSource {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Error raised when a properties file cannot be read.
#[derive(Debug, Error)]
#[error("failed to read logger properties from {path}")]
pub struct ConfigError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl ConfigError {
    /// Returns the path that failed to load.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Entries parsed from a `.properties` document.
///
/// The accepted syntax is the common subset of Java-style properties:
///
/// - blank lines and lines starting with `#` or `!` are ignored;
/// - the key ends at the first unescaped `=`, `:` or whitespace;
/// - a backslash in the key escapes the next character, so `a\=b` is the
///   key `a=b`;
/// - whitespace around the separator is trimmed;
/// - a trailing backslash joins the next line onto the value.
///
/// ```
/// use taglog::{ConfigSource, Properties};
///
/// let props = Properties::parse("# comment\nlevel = debug\ntag: Demo\n");
/// assert_eq!(props.get("level").as_deref(), Some("debug"));
/// assert_eq!(props.get("tag").as_deref(), Some("Demo"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Parses properties text. Malformed lines are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        let mut pending = String::new();

        for raw in text.lines() {
            let line = if pending.is_empty() {
                raw.trim_start()
            } else {
                raw.trim()
            };

            if pending.is_empty() && (line.is_empty() || line.starts_with(['#', '!'])) {
                continue;
            }

            if let Some(continued) = strip_continuation(line) {
                pending.push_str(continued);
                continue;
            }

            pending.push_str(line);
            if let Some((key, value)) = split_entry(&pending) {
                entries.insert(key, value.to_owned());
            }
            pending.clear();
        }

        if !pending.is_empty() {
            if let Some((key, value)) = split_entry(&pending) {
                entries.insert(key, value.to_owned());
            }
        }

        Self { entries }
    }

    /// Reads and parses a properties file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Returns the number of parsed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no entries were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigSource for Properties {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Returns the line without its continuation backslash, if it has one.
///
/// An even run of trailing backslashes is a sequence of escaped backslashes,
/// not a continuation.
fn strip_continuation(line: &str) -> Option<&str> {
    let trailing = line.bytes().rev().take_while(|&b| b == b'\\').count();
    if trailing % 2 == 1 {
        Some(&line[..line.len() - 1])
    } else {
        None
    }
}

/// Splits a logical line into its unescaped key and trimmed value.
fn split_entry(line: &str) -> Option<(String, &str)> {
    let mut key = String::new();
    let mut escaped = false;
    let mut end = line.len();
    for (idx, ch) in line.char_indices() {
        if escaped {
            key.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if matches!(ch, '=' | ':' | ' ' | '\t') {
            end = idx;
            break;
        } else {
            key.push(ch);
        }
    }
    if key.is_empty() {
        return None;
    }

    let rest = line[end..].trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    Some((key, rest.trim()))
}

/// Snapshot of process environment variables exposed as a [`ConfigSource`].
///
/// Dotted camel-case keys are looked up under their upper snake-case form,
/// so `taglog.defaultLogLevel` reads `TAGLOG_DEFAULT_LOG_LEVEL`.
#[derive(Clone, Debug, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    #[must_use]
    pub fn capture() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_vars(
            vars.into_iter()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Builds a source from explicit variable pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(&env_key(key)).cloned()
    }
}

/// Converts a dotted camel-case key into an environment variable name.
///
/// ```
/// assert_eq!(taglog::env_key("taglog.defaultLogLevel"), "TAGLOG_DEFAULT_LOG_LEVEL");
/// assert_eq!(taglog::env_key("taglog.logTag"), "TAGLOG_LOG_TAG");
/// ```
#[must_use]
pub fn env_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for ch in key.chars() {
        if ch.is_ascii_alphanumeric() {
            if ch.is_ascii_uppercase() && prev_lower {
                out.push('_');
            }
            out.push(ch.to_ascii_uppercase());
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        } else {
            out.push('_');
            prev_lower = false;
        }
    }
    out
}

/// Consults several sources in order; the first one holding a key wins.
#[derive(Default)]
pub struct Layered {
    layers: Vec<Box<dyn ConfigSource + Send + Sync>>,
}

impl Layered {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source with lower priority than every source already added.
    pub fn with(mut self, source: impl ConfigSource + Send + Sync + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }
}

impl ConfigSource for Layered {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}

impl std::fmt::Debug for Layered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layered")
            .field("layers", &self.layers.len())
            .finish()
    }
}
