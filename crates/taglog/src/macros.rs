//! crates/taglog/src/macros.rs
//! Convenience macros over [`Logger`](crate::Logger) calls.
//!
//! The macros check the level before building the argument list, so disabled
//! calls do not even borrow their arguments. Arguments are any `Display`
//! values; an optional `; cause` tail attaches an error as the trailing cause.
//!
//! ```
//! use std::io;
//! use std::sync::Arc;
//! use taglog::{Level, LoggerConfig, LoggerRegistry, NullSink};
//!
//! let registry = LoggerRegistry::builder(Arc::new(NullSink))
//!     .config(Arc::new(LoggerConfig::new(Level::Debug, "demo")))
//!     .build();
//! let log = taglog::logger!(registry);
//!
//! taglog::info!(log, "listening on {}:{}", "0.0.0.0", 8080);
//! let cause: taglog::Cause = Arc::new(io::Error::other("refused"));
//! taglog::error!(log, "connect to {} failed", "db"; cause);
//! ```

/// Logs at an explicit [`Level`](crate::Level).
///
/// `log!(logger, level, template, args...)` or
/// `log!(logger, level, template, args...; cause)`.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)? ; $cause:expr) => {{
        let logger = &$logger;
        let level = $level;
        if logger.is_enabled(level) {
            logger.log_args(
                level,
                $template,
                &[$($crate::Arg::from(&$arg),)* $crate::Arg::cause($cause)],
            );
        }
    }};
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.is_enabled(level) {
            logger.log_args(level, $template, &[$($crate::Arg::from(&$arg)),*]);
        }
    }};
}

/// Logs at trace level. See [`log!`](crate::log!).
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($rest)+)
    };
}

/// Logs at debug level. See [`log!`](crate::log!).
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($rest)+)
    };
}

/// Logs at info level. See [`log!`](crate::log!).
#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($rest)+)
    };
}

/// Logs at warn level. See [`log!`](crate::log!).
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($rest)+)
    };
}

/// Logs at error level. See [`log!`](crate::log!).
#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($rest)+)
    };
}

/// Returns the logger named after the calling module.
///
/// # Example
/// ```ignore
/// let log = taglog::logger!(registry);
/// assert_eq!(log.name(), module_path!());
/// ```
#[macro_export]
macro_rules! logger {
    ($registry:expr) => {
        $registry.get_logger(::core::module_path!())
    };
}
