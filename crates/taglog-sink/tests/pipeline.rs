//! Integration tests driving real sinks through a logger registry.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::sync::Arc;

use taglog::{Arg, Cause, Level, LoggerConfig, LoggerRegistry};
use taglog_sink::{LineMode, MemorySink, WriterSink};

fn config(threshold: Level, tag: &str) -> Arc<LoggerConfig> {
    Arc::new(LoggerConfig::new(threshold, tag))
}

mod service {
    use std::hint::black_box;

    use taglog::{Arg, Logger};

    #[inline(never)]
    pub fn start(logger: &Logger, port: u16) {
        logger.info_args("listening on {}", &[Arg::value(&port)]);
        black_box(logger);
    }
}

// ============================================================================
// MemorySink Tests
// ============================================================================

/// Verifies enabled calls land in the memory sink with code, tag and call site.
#[test]
fn memory_sink_records_enabled_calls() {
    let sink = Arc::new(MemorySink::new());
    let registry = LoggerRegistry::builder(Arc::clone(&sink))
        .config(config(Level::Info, "Svc"))
        .build();
    let logger = registry.get_logger("pipeline::service");

    service::start(&logger, 8080);
    logger.debug("suppressed");

    let entries = sink.take();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.level(), Some(Level::Info));
    assert_eq!(entry.tag, "Svc");
    assert!(
        entry.message.starts_with("listening on 8080 [service:start:"),
        "{}",
        entry.message
    );
}

/// Verifies the cause reaches the memory sink by identity.
#[test]
fn memory_sink_keeps_trailing_cause() {
    let sink = Arc::new(MemorySink::new());
    let registry = LoggerRegistry::builder(Arc::clone(&sink))
        .config(config(Level::Trace, "Svc"))
        .build();
    let cause: Cause = Arc::new(io::Error::other("refused"));

    registry
        .get_logger("pipeline")
        .error_args("connect {} failed", &[Arg::value(&"db"), Arg::Cause(Arc::clone(&cause))]);

    let entry = sink.take().pop().expect("entry");
    assert!(Arc::ptr_eq(entry.cause.as_ref().expect("cause"), &cause));
}

// ============================================================================
// WriterSink Tests
// ============================================================================

/// Verifies records are appended to a file as logcat lines.
#[test]
fn writer_sink_appends_lines_to_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .expect("open log file");

    let sink = Arc::new(WriterSink::new(file));
    let registry = LoggerRegistry::builder(Arc::clone(&sink))
        .config(config(Level::Debug, "File"))
        .build();
    let logger = registry.get_logger("pipeline");

    logger.debug("first");
    logger.trace("hidden");
    logger.error_cause("second", Arc::new(io::Error::other("bad sector")));

    let mut text = String::new();
    File::open(&path)
        .expect("reopen")
        .read_to_string(&mut text)
        .expect("read log");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3, "{text}");
    assert!(lines[0].starts_with("D/File: first ["));
    assert!(lines[1].starts_with("E/File: second ["));
    assert_eq!(lines[2], "bad sector");
}

/// Verifies an unterminated writer sink emits records back to back.
#[test]
fn writer_sink_unterminated_records() {
    let sink = Arc::new(WriterSink::with_line_mode(Vec::new(), LineMode::Unterminated));
    let registry = LoggerRegistry::builder(Arc::clone(&sink))
        .config(config(Level::Info, "T"))
        .build();

    registry.get_logger("pipeline").info("one");
    registry.get_logger("pipeline").info("two");

    let output = String::from_utf8(sink.take_writer()).expect("utf-8");
    assert!(!output.contains('\n'));
    assert!(output.starts_with("I/T: one ["));
    assert_eq!(output.matches("I/T: ").count(), 2);
}

/// Verifies a CRLF writer sink ends every record with `\r\n`.
#[test]
fn writer_sink_crlf_records() {
    let sink = Arc::new(WriterSink::with_line_mode(Vec::new(), LineMode::CrLf));
    let registry = LoggerRegistry::builder(Arc::clone(&sink))
        .config(config(Level::Info, "T"))
        .build();

    registry.get_logger("pipeline").info("one");
    registry.get_logger("pipeline").warn("two");

    let output = String::from_utf8(sink.take_writer()).expect("utf-8");
    let records: Vec<&str> = output.split_terminator("\r\n").collect();
    assert_eq!(records.len(), 2, "{output:?}");
    assert!(records[0].starts_with("I/T: one ["));
    assert!(records[1].starts_with("W/T: two ["));
    assert!(!records.iter().any(|record| record.contains('\n')));
}
