//! crates/taglog-sink/src/writer.rs
//! Logcat-style line output to any [`io::Write`] target.

use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use taglog::{Cause, Level, Sink};

use crate::line_mode::LineMode;

/// Sink that renders each record as `<P>/<tag>: <message>`.
///
/// `P` is the single-letter priority (`V`, `D`, `I`, `W`, `E`, or `?` for an
/// unknown code). A cause follows on its own line together with its
/// `source()` chain, one `Caused by:` line per link. Lines are separated and
/// terminated according to the sink's [`LineMode`]. Write errors are
/// swallowed so a broken writer never disturbs the logging caller.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use taglog::{Level, LoggerConfig, LoggerRegistry};
/// use taglog_sink::WriterSink;
///
/// let sink = Arc::new(WriterSink::new(Vec::new()));
/// let registry = LoggerRegistry::builder(Arc::clone(&sink))
///     .config(Arc::new(LoggerConfig::new(Level::Info, "Demo")))
///     .build();
///
/// registry.get_logger("app").warn("low memory");
///
/// let output = String::from_utf8(sink.take_writer()).unwrap();
/// assert!(output.starts_with("W/Demo: low memory ["));
/// ```
pub struct WriterSink<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
}

impl<W> WriterSink<W> {
    /// Creates a sink that terminates each line with `\n`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::Lf)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_mode,
        }
    }

    /// Returns the current [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Consumes the sink and returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Default> WriterSink<W> {
    /// Replaces the writer with a fresh default and returns the old one.
    pub fn take_writer(&self) -> W {
        std::mem::take(&mut *self.lock())
    }
}

impl WriterSink<io::Stderr> {
    /// Creates a sink writing to standard error with the platform's line
    /// ending.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_line_mode(io::stderr(), LineMode::native())
    }
}

impl<W> WriterSink<W>
where
    W: Write,
{
    fn write_record(
        &self,
        code: i32,
        tag: &str,
        message: &str,
        cause: Option<&Cause>,
    ) -> io::Result<()> {
        let separator = self.line_mode.separator();
        let mut writer = self.lock();
        write!(writer, "{}/{tag}: {message}", priority_letter(code))?;
        if let Some(cause) = cause {
            write!(writer, "{separator}{cause}")?;
            let mut source = cause.source();
            while let Some(err) = source {
                write!(writer, "{separator}Caused by: {err}")?;
                source = err.source();
            }
        }
        writer.write_all(self.line_mode.terminator().as_bytes())?;
        writer.flush()
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send,
{
    fn write(&self, code: i32, tag: &str, message: &str, cause: Option<&Cause>) {
        let _ = self.write_record(code, tag, message, cause);
    }
}

impl<W> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("line_mode", &self.line_mode)
            .finish_non_exhaustive()
    }
}

/// Returns the single-letter priority used in logcat output.
#[must_use]
pub const fn priority_letter(code: i32) -> char {
    match Level::from_native_code(code) {
        Some(Level::Trace) => 'V',
        Some(Level::Debug) => 'D',
        Some(Level::Info) => 'I',
        Some(Level::Warn) => 'W',
        Some(Level::Error) => 'E',
        None => '?',
    }
}
