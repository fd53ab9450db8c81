//! crates/taglog/src/logger.rs
//! Named logger: gates, renders, resolves the call site and dispatches.

use std::fmt;
use std::sync::Arc;

use crate::call_site::{OriginPattern, ResolveCallSite};
use crate::config::LoggerConfig;
use crate::level::Level;
use crate::marker::Marker;
use crate::record::LogRecord;
use crate::render::{Arg, Cause, Render};
use crate::sink::Sink;

/// Collaborators shared by every logger of one registry.
pub(crate) struct Backend {
    pub(crate) config: Arc<LoggerConfig>,
    pub(crate) sink: Arc<dyn Sink>,
    pub(crate) renderer: Arc<dyn Render>,
    pub(crate) resolver: Arc<dyn ResolveCallSite>,
}

/// Generates the per-level convenience methods.
macro_rules! level_methods {
    ($level:ident, $name:literal, $enabled:ident, $plain:ident, $with_cause:ident, $with_args:ident) => {
        #[doc = concat!("Reports whether ", $name, " calls currently reach the sink.")]
        pub fn $enabled(&self) -> bool {
            self.is_enabled(Level::$level)
        }

        #[doc = concat!("Logs `message` verbatim at ", $name, " level.")]
        pub fn $plain(&self, message: &str) {
            self.log(Level::$level, message);
        }

        #[doc = concat!("Logs `message` verbatim at ", $name, " level with an attached cause.")]
        pub fn $with_cause(&self, message: &str, cause: Cause) {
            self.log_cause(Level::$level, message, cause);
        }

        #[doc = concat!("Renders `template` with `args` and logs it at ", $name, " level.")]
        ///
        /// An unconsumed trailing [`Arg::Cause`] is dispatched as the cause.
        pub fn $with_args(&self, template: &str, args: &[Arg<'_>]) {
            self.log_args(Level::$level, template, args);
        }
    };
}

/// A named logger handed out by a [`LoggerRegistry`](crate::LoggerRegistry).
///
/// Every call first compares its level against the shared threshold. Disabled
/// calls return immediately: the template is not rendered and the stack is
/// not inspected. Enabled calls render the message, attribute it to the
/// innermost stack frame within this logger's scope and make exactly one
/// call to the sink.
pub struct Logger {
    name: String,
    pattern: OriginPattern,
    backend: Arc<Backend>,
}

impl Logger {
    pub(crate) fn new(name: &str, backend: Arc<Backend>) -> Self {
        Self {
            name: name.to_owned(),
            pattern: OriginPattern::new(name),
            backend,
        }
    }

    /// Returns the name this logger was requested under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the compiled origin pattern.
    pub const fn pattern(&self) -> &OriginPattern {
        &self.pattern
    }

    /// Returns the configuration shared with the rest of the registry.
    pub fn config(&self) -> &Arc<LoggerConfig> {
        &self.backend.config
    }

    /// Reports whether calls at `level` currently reach the sink.
    pub fn is_enabled(&self, level: Level) -> bool {
        self.backend.config.is_enabled(level)
    }

    /// Logs `message` verbatim at `level`.
    pub fn log(&self, level: Level, message: &str) {
        if self.is_enabled(level) {
            self.dispatch(level, message, None);
        }
    }

    /// Logs `message` verbatim at `level` with an attached cause.
    pub fn log_cause(&self, level: Level, message: &str, cause: Cause) {
        if self.is_enabled(level) {
            self.dispatch(level, message, Some(cause));
        }
    }

    /// Renders `template` with `args` and logs the result at `level`.
    pub fn log_args(&self, level: Level, template: &str, args: &[Arg<'_>]) {
        if !self.is_enabled(level) {
            return;
        }
        let rendered = self.backend.renderer.render(template, args);
        self.dispatch(level, &rendered.text, rendered.cause);
    }

    /// Same as [`is_enabled`](Self::is_enabled); the marker is ignored.
    pub fn is_enabled_marked(&self, _marker: &Marker, level: Level) -> bool {
        self.is_enabled(level)
    }

    /// Same as [`log`](Self::log); the marker is ignored.
    pub fn log_marked(&self, _marker: &Marker, level: Level, message: &str) {
        self.log(level, message);
    }

    /// Same as [`log_cause`](Self::log_cause); the marker is ignored.
    pub fn log_cause_marked(&self, _marker: &Marker, level: Level, message: &str, cause: Cause) {
        self.log_cause(level, message, cause);
    }

    /// Same as [`log_args`](Self::log_args); the marker is ignored.
    pub fn log_args_marked(&self, _marker: &Marker, level: Level, template: &str, args: &[Arg<'_>]) {
        self.log_args(level, template, args);
    }

    level_methods!(Trace, "trace", is_trace_enabled, trace, trace_cause, trace_args);
    level_methods!(Debug, "debug", is_debug_enabled, debug, debug_cause, debug_args);
    level_methods!(Info, "info", is_info_enabled, info, info_cause, info_args);
    level_methods!(Warn, "warn", is_warn_enabled, warn, warn_cause, warn_args);
    level_methods!(Error, "error", is_error_enabled, error, error_cause, error_args);

    #[inline(never)]
    fn dispatch(&self, level: Level, message: &str, cause: Option<Cause>) {
        let call_site = self.backend.resolver.resolve(&self.pattern);
        let record = LogRecord::new(level, message, cause, call_site);
        let tag = self.backend.config.tag();
        self.backend
            .sink
            .write(level.native_code(), &tag, &record.enriched(), record.cause());
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("threshold", &self.backend.config.threshold())
            .finish_non_exhaustive()
    }
}
