//! crates/taglog/src/record.rs
//! A single enabled log call, enriched with call site and thread.

use std::thread::{self, Thread};

use crate::call_site::CallSite;
use crate::level::Level;
use crate::render::Cause;

/// Everything a logger knows about one enabled call before dispatch.
#[derive(Clone, Debug)]
pub struct LogRecord<'a> {
    level: Level,
    message: &'a str,
    cause: Option<Cause>,
    call_site: CallSite,
    thread: String,
}

impl<'a> LogRecord<'a> {
    /// Builds a record attributed to the current thread.
    pub fn new(level: Level, message: &'a str, cause: Option<Cause>, call_site: CallSite) -> Self {
        Self {
            level,
            message,
            cause,
            call_site,
            thread: thread_descriptor(&thread::current()),
        }
    }

    /// Returns the record's severity.
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Returns the message before enrichment.
    pub const fn message(&self) -> &'a str {
        self.message
    }

    /// Returns the attached cause, if any.
    pub const fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Returns the resolved call site.
    pub const fn call_site(&self) -> &CallSite {
        &self.call_site
    }

    /// Returns the descriptor of the thread that issued the call.
    pub fn thread(&self) -> &str {
        &self.thread
    }

    /// Formats the text handed to the sink:
    /// `<message> [<origin>:<operation>:<line>] <thread>`.
    ///
    /// ```
    /// use taglog::{CallSite, Level, LogRecord};
    ///
    /// let record = LogRecord::new(Level::Info, "ready", None, CallSite::new("Server", "start", 42));
    /// assert!(record.enriched().starts_with("ready [Server:start:42] Thread["));
    /// ```
    pub fn enriched(&self) -> String {
        format!("{} [{}] {}", self.message, self.call_site, self.thread)
    }
}

/// Describes a thread as `Thread[<name>,<id>]`.
///
/// Unnamed threads are reported as `<unnamed>`.
pub fn thread_descriptor(thread: &Thread) -> String {
    format!(
        "Thread[{},{:?}]",
        thread.name().unwrap_or("<unnamed>"),
        thread.id()
    )
}
