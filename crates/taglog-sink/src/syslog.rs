//! crates/taglog-sink/src/syslog.rs
//! syslog(3) sink for Unix hosts.
//!
//! Calls libc `openlog`/`syslog` directly. syslog(3) keeps one connection
//! per process, so the first [`SyslogSink`] opens it and every later sink
//! shares it. The connection stays open until the process exits. Each record
//! is sent as `<tag>: <message>` at the priority matching its native code.

#![allow(unsafe_code)]

use std::ffi::{CStr, CString};
use std::fmt;
use std::sync::OnceLock;

use taglog::{Cause, Level, Sink};

/// Default ident passed to `openlog(3)`.
pub const DEFAULT_SYSLOG_IDENT: &str = "taglog";
const DEFAULT_SYSLOG_IDENT_C: &CStr = c"taglog";

/// Syslog facility codes from `<syslog.h>`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogFacility {
    /// User-level messages (LOG_USER).
    #[default]
    User = libc::LOG_USER,
    /// System daemons (LOG_DAEMON).
    Daemon = libc::LOG_DAEMON,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

const FACILITY_NAMES: [(&str, SyslogFacility); 10] = [
    ("user", SyslogFacility::User),
    ("daemon", SyslogFacility::Daemon),
    ("local0", SyslogFacility::Local0),
    ("local1", SyslogFacility::Local1),
    ("local2", SyslogFacility::Local2),
    ("local3", SyslogFacility::Local3),
    ("local4", SyslogFacility::Local4),
    ("local5", SyslogFacility::Local5),
    ("local6", SyslogFacility::Local6),
    ("local7", SyslogFacility::Local7),
];

impl SyslogFacility {
    /// Parses a facility name case-insensitively.
    ///
    /// ```
    /// use taglog_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("kernel"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        FACILITY_NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|&(_, facility)| facility)
    }

    /// Returns the lowercase facility name.
    pub fn as_str(self) -> &'static str {
        FACILITY_NAMES
            .iter()
            .find(|&&(_, facility)| facility == self)
            .map_or("user", |&(name, _)| name)
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syslog severities used by [`SyslogSink`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogPriority {
    /// Error conditions (LOG_ERR).
    Error = libc::LOG_ERR,
    /// Warning conditions (LOG_WARNING).
    Warning = libc::LOG_WARNING,
    /// Informational messages (LOG_INFO).
    Info = libc::LOG_INFO,
    /// Debug-level messages (LOG_DEBUG).
    Debug = libc::LOG_DEBUG,
}

impl SyslogPriority {
    /// Maps a native severity code onto a syslog priority.
    ///
    /// Trace and debug share `LOG_DEBUG`. Unknown codes are sent as
    /// `LOG_INFO`.
    #[must_use]
    pub const fn from_native_code(code: i32) -> Self {
        match Level::from_native_code(code) {
            Some(Level::Trace | Level::Debug) => Self::Debug,
            Some(Level::Info) | None => Self::Info,
            Some(Level::Warn) => Self::Warning,
            Some(Level::Error) => Self::Error,
        }
    }
}

/// Ident and facility of the process-wide syslog connection.
#[derive(Debug)]
struct Connection {
    // syslog(3) keeps this pointer, so it lives in a static.
    ident: CString,
    facility: SyslogFacility,
}

static CONNECTION: OnceLock<Connection> = OnceLock::new();

/// Sink forwarding records to syslog(3).
///
/// Only one syslog connection exists per process. The first call to
/// [`SyslogSink::open`] fixes its ident and facility; later calls return
/// sinks sharing that connection and ignore their arguments. Dropping a sink
/// leaves the connection open for the others.
///
/// ```no_run
/// use std::sync::Arc;
/// use taglog::LoggerRegistry;
/// use taglog_sink::syslog::{SyslogFacility, SyslogSink};
///
/// let sink = Arc::new(SyslogSink::open("my-daemon", SyslogFacility::Daemon));
/// let registry = LoggerRegistry::new(sink);
/// registry.get_logger("my_daemon::server").info("started");
/// ```
#[derive(Debug)]
pub struct SyslogSink {
    connection: &'static Connection,
}

impl SyslogSink {
    /// Returns a sink on the process syslog connection, opening it with
    /// `ident` and `facility` if no sink has opened it yet.
    ///
    /// An ident containing NUL bytes is replaced by [`DEFAULT_SYSLOG_IDENT`].
    pub fn open(ident: &str, facility: SyslogFacility) -> Self {
        let connection = CONNECTION.get_or_init(|| {
            let ident =
                CString::new(ident).unwrap_or_else(|_| DEFAULT_SYSLOG_IDENT_C.to_owned());

            // SAFETY: the ident pointer stays valid for the process lifetime
            // because the `CString` is stored in a static `OnceLock`.
            unsafe {
                libc::openlog(ident.as_ptr(), libc::LOG_PID, facility as libc::c_int);
            }

            Connection { ident, facility }
        });

        Self { connection }
    }

    /// Returns the ident the connection was opened with.
    #[must_use]
    pub fn ident(&self) -> &str {
        self.connection
            .ident
            .to_str()
            .unwrap_or(DEFAULT_SYSLOG_IDENT)
    }

    /// Returns the facility the connection was opened with.
    #[must_use]
    pub const fn facility(&self) -> SyslogFacility {
        self.connection.facility
    }
}

impl Sink for SyslogSink {
    fn write(&self, code: i32, tag: &str, message: &str, cause: Option<&Cause>) {
        let line = match cause {
            Some(cause) => format!("{tag}: {message}: {cause}"),
            None => format!("{tag}: {message}"),
        };
        send(SyslogPriority::from_native_code(code), &line);
    }
}

/// Sends one line to syslog(3). Lines containing NUL bytes are dropped.
fn send(priority: SyslogPriority, line: &str) {
    let Ok(message) = CString::new(line) else {
        return;
    };

    // `%s` keeps `%` in the message from being read as a conversion.
    // SAFETY: both arguments are valid NUL-terminated C strings and syslog is
    // thread-safe once openlog has completed.
    unsafe {
        libc::syslog(priority as libc::c_int, c"%s".as_ptr(), message.as_ptr());
    }
}
