#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `taglog` is a name-based logging facade over a tag-based platform sink.
//! Application code asks a [`LoggerRegistry`] for a [`Logger`] by name and
//! logs at five severities. Each enabled call is rendered from a `{}` template,
//! attributed to the calling function by inspecting the stack and handed to a
//! [`Sink`] as a native severity code, a shared tag, enriched text and an
//! optional cause.
//!
//! # Design
//!
//! - [`Level`] maps each severity onto a fixed native code; gating is a
//!   numeric comparison against the threshold held in [`LoggerConfig`].
//! - [`LoggerConfig`] is shared by `Arc` between every logger of a registry.
//!   Its threshold and tag may be replaced at runtime from any thread.
//! - [`PlaceholderRenderer`] substitutes arguments and extracts a trailing
//!   cause. [`BacktraceResolver`] finds the first stack frame within the
//!   logger's [`OriginPattern`].
//! - [`LoggerRegistry`] keeps one logger per name in a concurrent map.
//!
//! Renderer and resolver run only for enabled calls.
//!
//! # Invariants
//!
//! - A disabled call performs no rendering, no stack inspection and no sink
//!   call.
//! - An enabled call makes exactly one sink call.
//! - Repeated requests for one name return the same `Arc<Logger>`.
//! - No logging call returns an error or panics into the caller.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use taglog::{Arg, Level, LoggerConfig, LoggerRegistry, NullSink};
//!
//! let config = Arc::new(LoggerConfig::new(Level::Info, "Demo"));
//! let registry = LoggerRegistry::builder(Arc::new(NullSink))
//!     .config(Arc::clone(&config))
//!     .build();
//!
//! let logger = registry.get_logger("app::net");
//! assert!(logger.is_info_enabled());
//! assert!(!logger.is_debug_enabled());
//!
//! logger.info_args("connected to {}", &[Arg::value(&"10.0.0.1")]);
//!
//! config.set_threshold(Level::Trace);
//! assert!(logger.is_trace_enabled());
//! ```
//!
//! # See also
//!
//! - The `taglog-sink` crate for writer, memory and syslog sinks.
//! - [`global`] for a process-wide registry slot.

#[cfg(feature = "bridge")]
mod bridge;
mod call_site;
mod config;
pub mod global;
mod level;
mod logger;
mod macros;
mod marker;
mod record;
mod registry;
mod render;
mod sink;

#[cfg(feature = "bridge")]
pub use bridge::{TaglogLayer, init_bridge, init_bridge_with_filter};
pub use call_site::{
    BacktraceResolver, CallSite, Frame, OriginPattern, ResolveCallSite, find_call_site,
    parse_backtrace, short_name,
};
pub use config::{
    CONFIG_PATH_ENV, CONFIGURATION_FILE, ConfigError, ConfigSource, DEFAULT_LOG_LEVEL_KEY,
    DEFAULT_TAG, EnvSource, LOG_TAG_KEY, Layered, LoggerConfig, Properties, env_key,
};
pub use global::SetRegistryError;
pub use level::{
    DEBUG_CODE, ERROR_CODE, INFO_CODE, Level, ParseLevelError, VERBOSE_CODE, WARN_CODE,
};
pub use logger::Logger;
pub use marker::Marker;
pub use record::{LogRecord, thread_descriptor};
pub use registry::{LoggerRegistry, RegistryBuilder};
pub use render::{Arg, Cause, PlaceholderRenderer, Render, Rendered};
pub use sink::{NullSink, Sink};
