//! crates/taglog/src/sink.rs
//! The platform output primitive loggers dispatch to.

use crate::render::Cause;

/// Destination for enriched log records.
///
/// A sink receives the native severity code, the current tag, the enriched
/// message and an optional cause. It reports nothing back: failures are the
/// sink's own business and never reach the logging caller.
pub trait Sink: Send + Sync {
    /// Writes one record.
    fn write(&self, code: i32, tag: &str, message: &str, cause: Option<&Cause>);
}

/// Sink that discards every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn write(&self, _code: i32, _tag: &str, _message: &str, _cause: Option<&Cause>) {}
}
