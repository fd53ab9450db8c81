//! crates/taglog/src/bridge.rs
//! Bridge from the `tracing` ecosystem into taglog loggers.
//!
//! [`TaglogLayer`] is a `tracing-subscriber` layer that turns every event into
//! a call on the logger named after the event's target, so code written
//! against `tracing` macros ends up in the same sink, with the same tag,
//! threshold and call-site enrichment as direct logger calls.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use taglog::{LoggerRegistry, init_bridge};
//!
//! let registry = LoggerRegistry::new(Arc::new(my_sink));
//! init_bridge(registry.clone())?;
//!
//! tracing::info!("copied {} files", 3);
//! ```

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::level::Level;
use crate::registry::LoggerRegistry;

/// A tracing layer that forwards events to a [`LoggerRegistry`].
#[derive(Clone, Debug)]
pub struct TaglogLayer {
    registry: LoggerRegistry,
}

impl TaglogLayer {
    /// Creates a layer dispatching into `registry`.
    #[must_use]
    pub const fn new(registry: LoggerRegistry) -> Self {
        Self { registry }
    }

    /// Maps a tracing level onto a taglog level.
    pub const fn map_level(level: &tracing::Level) -> Level {
        match *level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

impl<S> Layer<S> for TaglogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    // The threshold can change at runtime, so callsite interest is never cached.
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        !metadata.is_event() || self.registry.config().is_enabled(Self::map_level(metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::map_level(metadata.level());
        if !self.registry.config().is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.registry
            .get_logger(metadata.target())
            .log(level, &visitor.finish());
    }
}

/// Collects the `message` field and appends other fields as `name=value`.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        let mut out = self.message.unwrap_or_default();
        if !self.fields.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&self.fields);
        }
        out
    }

    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", field.name(), value);
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.push_field(field, format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.push_field(field, format_args!("{value}"));
        }
    }
}

/// Installs a global subscriber that forwards every `tracing` event into
/// `registry`.
///
/// Fails if a global subscriber is already set.
pub fn init_bridge(registry: LoggerRegistry) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(TaglogLayer::new(registry))
        .try_init()
}

/// Like [`init_bridge`], with an additional filter layer such as
/// `tracing_subscriber::EnvFilter`.
pub fn init_bridge_with_filter<F>(registry: LoggerRegistry, filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(filter)
        .with(TaglogLayer::new(registry))
        .try_init()
}
