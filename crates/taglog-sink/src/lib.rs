#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/taglog-sink/src/lib.rs
//!
//! # Overview
//!
//! `taglog-sink` provides concrete [`taglog::Sink`] implementations:
//!
//! - [`WriterSink`] renders logcat-style lines (`I/Tag: message`) into any
//!   [`std::io::Write`] implementor, terminated according to a [`LineMode`].
//! - [`MemorySink`] records every dispatch for later inspection.
//! - `syslog::SyslogSink` (Unix only) forwards records to syslog(3).
//!
//! # Errors
//!
//! Sinks report nothing back to the logger. Write failures are dropped at the
//! sink so logging never fails the caller.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use taglog::{Level, LoggerConfig, LoggerRegistry};
//! use taglog_sink::MemorySink;
//!
//! let sink = Arc::new(MemorySink::new());
//! let registry = LoggerRegistry::builder(Arc::clone(&sink))
//!     .config(Arc::new(LoggerConfig::new(Level::Debug, "Demo")))
//!     .build();
//!
//! let logger = registry.get_logger("app::db");
//! logger.trace("suppressed");
//! logger.debug("opened pool");
//!
//! let entries = sink.entries();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].level(), Some(Level::Debug));
//! assert_eq!(entries[0].tag, "Demo");
//! ```

mod line_mode;
mod memory;
#[cfg(unix)]
pub mod syslog;
mod writer;

pub use line_mode::LineMode;
pub use memory::{MemorySink, SinkEntry};
pub use writer::{WriterSink, priority_letter};
