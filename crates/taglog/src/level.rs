//! crates/taglog/src/level.rs
//! Severity levels and their fixed mapping to platform-native codes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Native code for the most verbose platform priority.
pub const VERBOSE_CODE: i32 = 2;
/// Native code for debug output.
pub const DEBUG_CODE: i32 = 3;
/// Native code for informational output.
pub const INFO_CODE: i32 = 4;
/// Native code for warnings.
pub const WARN_CODE: i32 = 5;
/// Native code for errors.
pub const ERROR_CODE: i32 = 6;

/// Severity of a log call, ordered from most to least verbose.
///
/// Each level maps one-to-one onto a platform-native severity code. The
/// mapping never changes at runtime and preserves ordering, so gating reduces
/// to a numeric comparison of native codes.
///
/// # Examples
///
/// ```
/// use taglog::Level;
///
/// assert!(Level::Warn.is_enabled(Level::Info));
/// assert!(!Level::Debug.is_enabled(Level::Info));
/// assert_eq!(Level::Trace.native_code(), 2);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(i32)]
pub enum Level {
    /// Finest-grained diagnostics; maps to the platform's verbose priority.
    Trace = VERBOSE_CODE,
    /// Debugging output.
    Debug = DEBUG_CODE,
    /// Informational messages.
    #[default]
    Info = INFO_CODE,
    /// Recoverable problems.
    Warn = WARN_CODE,
    /// Failures.
    Error = ERROR_CODE,
}

impl Level {
    /// All levels in ascending order of severity.
    pub const ALL: [Self; 5] = [Self::Trace, Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Returns the platform-native severity code for this level.
    #[must_use]
    pub const fn native_code(self) -> i32 {
        self as i32
    }

    /// Maps a platform-native severity code back to a level.
    #[must_use]
    pub const fn from_native_code(code: i32) -> Option<Self> {
        match code {
            VERBOSE_CODE => Some(Self::Trace),
            DEBUG_CODE => Some(Self::Debug),
            INFO_CODE => Some(Self::Info),
            WARN_CODE => Some(Self::Warn),
            ERROR_CODE => Some(Self::Error),
            _ => None,
        }
    }

    /// Reports whether a call at this level passes the given threshold.
    #[must_use]
    pub const fn is_enabled(self, threshold: Self) -> bool {
        self.native_code() >= threshold.native_code()
    }

    /// Returns the lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Parses a threshold token read from configuration.
    ///
    /// Tokens are matched case-insensitively; `verbose` is accepted as an
    /// alias for [`Level::Trace`]. Anything unrecognised falls back to
    /// [`Level::Info`] so a bad configuration value never disables logging.
    ///
    /// ```
    /// use taglog::Level;
    ///
    /// assert_eq!(Level::from_config_token("VERBOSE"), Level::Trace);
    /// assert_eq!(Level::from_config_token("Warn"), Level::Warn);
    /// assert_eq!(Level::from_config_token("loud"), Level::Info);
    /// ```
    #[must_use]
    pub fn from_config_token(token: &str) -> Self {
        token.parse().unwrap_or(Self::Info)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Level`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown log level: {token}")]
pub struct ParseLevelError {
    token: String,
}

impl ParseLevelError {
    /// Returns the rejected token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let level = if trimmed.eq_ignore_ascii_case("trace")
            || trimmed.eq_ignore_ascii_case("verbose")
        {
            Self::Trace
        } else if trimmed.eq_ignore_ascii_case("debug") {
            Self::Debug
        } else if trimmed.eq_ignore_ascii_case("info") {
            Self::Info
        } else if trimmed.eq_ignore_ascii_case("warn") {
            Self::Warn
        } else if trimmed.eq_ignore_ascii_case("error") {
            Self::Error
        } else {
            return Err(ParseLevelError {
                token: s.to_owned(),
            });
        };
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_native_codes() {
        for pair in Level::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].native_code() < pair[1].native_code());
        }
    }

    #[test]
    fn native_codes_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_native_code(level.native_code()), Some(level));
        }
        assert_eq!(Level::from_native_code(0), None);
        assert_eq!(Level::from_native_code(7), None);
    }

    #[test]
    fn threshold_gates_lower_levels() {
        assert!(Level::Error.is_enabled(Level::Error));
        assert!(!Level::Warn.is_enabled(Level::Error));
        for level in Level::ALL {
            assert!(level.is_enabled(Level::Trace), "{level} should pass trace");
        }
    }

    #[test]
    fn parse_accepts_known_tokens_case_insensitively() {
        let cases = [
            ("trace", Level::Trace),
            ("VERBOSE", Level::Trace),
            ("Debug", Level::Debug),
            ("info", Level::Info),
            (" warn ", Level::Warn),
            ("ERROR", Level::Error),
        ];
        for (token, expected) in cases {
            assert_eq!(token.parse::<Level>(), Ok(expected), "token '{token}'");
        }
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        let err = "warning".parse::<Level>().unwrap_err();
        assert_eq!(err.token(), "warning");
        assert_eq!(err.to_string(), "unknown log level: warning");
        assert!("".parse::<Level>().is_err());
    }

    #[test]
    fn config_token_defaults_to_info() {
        assert_eq!(Level::from_config_token(""), Level::Info);
        assert_eq!(Level::from_config_token("fatal"), Level::Info);
        assert_eq!(Level::from_config_token("error"), Level::Error);
    }

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(Level::Warn.to_string(), "warn");
        assert_eq!(format!("{}", Level::Trace), "trace");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Level::Debug).expect("serialize");
        assert_eq!(json, "\"debug\"");
        let parsed: Level = serde_json::from_str("\"error\"").expect("deserialize");
        assert_eq!(parsed, Level::Error);
    }
}
